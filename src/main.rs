use person_registry::configuration::get_static_configuration;
use person_registry::telemetry::{get_subscriber, init_subscriber};
use person_registry::{build_repository, run, AppState, StartupError};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let configuration = get_static_configuration()?;

    let subscriber = get_subscriber(
        String::from("person-registry"),
        configuration.log_filter.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber)?;

    let persons = build_repository(&configuration.database)
        .await
        .inspect_err(|error| tracing::error!(%error, "store unavailable at startup"))?;

    let address = configuration.address();
    let listener = TcpListener::bind(&address).await?;
    info!(%address, "Starting server...");

    run(listener, AppState::new(persons), shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
