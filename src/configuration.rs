use std::time::Duration;

#[derive(serde::Deserialize)]
pub struct StaticConfiguration {
    pub database: DatabaseConfiguration,
    #[serde(default = "default_host")]
    pub application_host: String,
    pub application_port: u16,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Mongodb,
    Memory,
}

#[derive(serde::Deserialize)]
pub struct DatabaseConfiguration {
    #[serde(default)]
    pub backend: StoreBackend,
    pub username: String,
    pub password: String,
    pub port: u16,
    pub host: String,
    pub database_name: String,
    #[serde(default = "default_collection_name")]
    pub collection_name: String,
    pub max_pool_size: Option<u32>,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl DatabaseConfiguration {
    pub fn connection_string(&self) -> String {
        format!(
            "mongodb://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port
        )
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl StaticConfiguration {
    pub fn address(&self) -> String {
        format!("{}:{}", self.application_host, self.application_port)
    }
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

fn default_log_filter() -> String {
    String::from("info")
}

fn default_collection_name() -> String {
    String::from("persons")
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

/// Reads `configuration.yaml`, then lets `APP_*` environment variables
/// override it (`APP_DATABASE__HOST=db` sets `database.host`).
pub fn get_static_configuration() -> Result<StaticConfiguration, config::ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::File::new("configuration.yaml", config::FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize::<StaticConfiguration>()
}
