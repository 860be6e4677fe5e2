//! Sleuthline API Server
//!
//! Run with: cargo run --bin sleuthline
//!
//! # Configuration
//!
//! Read from the first existing config file (see `sleuthline-cli config`),
//! then overridden by environment variables:
//! - `SLEUTHLINE_DATA_DIR`: Timeline directory
//! - `SLEUTHLINE_EXPORT_DIR`: Export artifact directory (default: .)
//! - `SLEUTHLINE_API_HOST`: Host to bind to (default: 127.0.0.1)
//! - `SLEUTHLINE_API_PORT`: Port to listen on (default: 5000)
//! - `SLEUTHLINE_LOG_LEVEL`, `SLEUTHLINE_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full filter directive, takes precedence over the level

use sleuthline::api::{serve, AppState};
use sleuthline::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();

    sleuthline::logging::init(&config.logging)?;

    tracing::info!("Starting Sleuthline API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {:?}", config.storage.data_dir);
    tracing::info!("Export directory: {:?}", config.export.output_dir);
    tracing::info!("Record schema: {}", config.storage.schema);

    let state = AppState::from_config(&config);

    tracing::info!("Starting server on {}:{}", config.api.host, config.api.port);
    serve(state, &config.api).await?;

    tracing::info!("Sleuthline API server stopped");
    Ok(())
}
