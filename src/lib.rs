pub mod api; // HTTP API router and server
pub mod config;
pub mod core_state; // Shared state behind every handler
pub mod models;
pub mod db;
pub mod presentation; // ScanResult → display view
pub mod scanner; // Interaction scanner core

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Startup failures surfaced by `run`.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Core(#[from] core_state::CoreError),
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the default
/// filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Load configuration, knowledge base and database, then serve the API
/// until Ctrl-C.
pub async fn run() -> Result<(), RunError> {
    init_tracing();

    tracing::info!("MedSafe starting v{}", config::APP_VERSION);

    let config = config::AppConfig::from_env()?;
    let core = Arc::new(core_state::CoreState::from_config(&config)?);

    tracing::info!(
        db = %config.db_path.display(),
        bundled_knowledge = config.knowledge_dir.is_none(),
        "Core state ready"
    );

    let mut server = api::start_server(core, config.addr).await?;
    tracing::info!(addr = %server.addr(), "Listening");

    tokio::signal::ctrl_c().await?;
    server.shutdown();
    server.stopped().await;

    Ok(())
}
