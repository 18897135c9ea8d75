pub mod aggregation; // Merged appointment views + patient de-duplication
pub mod api; // JSON HTTP surface
pub mod config;
pub mod db;
pub mod models;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Server error: {0}")]
    Server(#[from] api::ServerError),

    #[error("Cannot listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Run the service until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = config::ServiceConfig::from_env()?;
    let mut server = api::start_server_on(config).await?;
    tracing::info!(addr = %server.addr, "Listening");

    let signal = tokio::signal::ctrl_c().await;
    server.shutdown();
    server.join().await;

    signal.map_err(StartupError::Signal)
}
