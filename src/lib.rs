pub mod api; // Screen API for the web view
pub mod catalog;
pub mod config;
pub mod core_state; // Transport-agnostic state
pub mod doctor; // AI Doctor: diagnosis request builder
pub mod home;
pub mod models;
pub mod prediction; // Prediction service client
pub mod profile;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("Cannot create prediction client: {0}")]
    Prediction(#[from] prediction::PredictionError),
    #[error(transparent)]
    Server(#[from] api::ServerError),
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(#[source] std::io::Error),
}

/// Start eMedic: logging, configuration, prediction client, screen API.
/// Runs until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("eMedic starting v{}", config::APP_VERSION);

    let app_config = config::AppConfig::from_env()?;
    let predictor = prediction::HttpPredictionClient::default_local()?;
    tracing::info!(url = predictor.url(), "Prediction service configured");

    let core = Arc::new(core_state::CoreState::new(Arc::new(predictor)));
    let mut server = api::start_screen_api_server(core, app_config.api_addr).await?;
    tracing::info!(addr = %server.info.server_addr, "Screen API ready");

    tokio::signal::ctrl_c().await.map_err(StartupError::Signal)?;
    server.shutdown();
    tracing::info!("eMedic stopped");
    Ok(())
}
