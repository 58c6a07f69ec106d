use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::Request;
use axum::routing::{get, post};
use axum::Router;
use mongodb::options::ClientOptions;
use mongodb::{bson::doc, Client, Database};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use configuration::{DatabaseConfiguration, StoreBackend};
use repository::{InMemoryPersonRepository, MongoPersonRepository, PersonRepository, RepositoryError};
use routes::{count_persons, create_person, get_person, health_check, search_persons};

pub use error::StartupError;
pub use routes::AppState;

pub mod configuration;
pub mod error;
pub mod repository;
pub mod routes;
pub mod structs;
pub mod telemetry;
pub mod validation;

const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn run<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Connects and pings, so an unreachable store fails here rather than on the
/// first request.
pub async fn get_database_connection(
    database_config: &DatabaseConfiguration,
) -> Result<Database, mongodb::error::Error> {
    let mut client_options = ClientOptions::parse(database_config.connection_string()).await?;
    client_options.app_name = Some(String::from(env!("CARGO_PKG_NAME")));
    client_options.max_pool_size = database_config.max_pool_size;
    client_options.connect_timeout = Some(database_config.connect_timeout());
    client_options.server_selection_timeout = Some(database_config.connect_timeout());

    let client = Client::with_options(client_options)?;
    let database = client.database(&database_config.database_name);
    database.run_command(doc! { "ping": 1 }, None).await?;
    Ok(database)
}

pub async fn build_repository(
    database_config: &DatabaseConfiguration,
) -> Result<Arc<dyn PersonRepository>, RepositoryError> {
    match database_config.backend {
        StoreBackend::Memory => {
            tracing::warn!("using the in-memory store, data is lost on exit");
            Ok(Arc::new(InMemoryPersonRepository::new()))
        }
        StoreBackend::Mongodb => {
            let database = get_database_connection(database_config).await?;
            let repository =
                MongoPersonRepository::new(&database, &database_config.collection_name).await?;
            tracing::info!(
                host = %database_config.host,
                database = %database_config.database_name,
                collection = %database_config.collection_name,
                "connected to mongodb"
            );
            Ok(Arc::new(repository))
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health-check", get(health_check))
        .route("/persons", post(create_person).get(search_persons))
        .route("/persons/count", get(count_persons))
        .route("/persons/:id", get(get_person))
        .layer(
            ServiceBuilder::new()
                .layer(SetSensitiveRequestHeadersLayer::new([AUTHORIZATION, COOKIE]))
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default();
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %request_id,
                    )
                }))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}
