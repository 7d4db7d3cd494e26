use shared::error::{ConfigError, InitializationError};
use shared::{init_tracing, initialize_store, load_config, shutdown_listener};
use thiserror::Error;
use tracing::info;
use travel_api::state::AppState;

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    Initialization(#[from] InitializationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), MainError> {
    init_tracing()?;

    let config = load_config()?;
    let store = initialize_store(&config).await?;
    let app = travel_api::app(AppState::new(store), &config.server);

    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr).await?;
    info!(
        name: "server.started",
        addr = %listener.local_addr()?,
        "serving travel sample API"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_listener(None))
        .await?;

    info!(name: "server.stopped", "server shut down");
    Ok(())
}
