//! Bichance Web Host
//!
//! Run with: cargo run --bin bichance
//!
//! # Configuration
//!
//! Read from `bichance.toml` (see `bichance-cli config`) and environment:
//! - `BICHANCE_API_URL`: Backend base URL handed to the frontend
//! - `BICHANCE_HOST`: Host to bind to (default: 0.0.0.0)
//! - `BICHANCE_PORT`: Port to listen on (default: 8080)
//! - `BICHANCE_STATIC_DIR`: Built frontend (default: ./bichance-ui/dist)
//! - `RUST_LOG`: Log filter (default: bichance=info)

use bichance::config::Config;
use bichance::server::{serve, AppState};
use bichance::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    telemetry::init(&config.logging);

    tracing::info!("Starting Bichance web host v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Backend: {}", config.api.base_url);
    tracing::info!("Static files: {:?}", config.server.static_dir);

    let state = AppState::from_config(&config);
    serve(state, &config.bind_addr(), &config.server.cors_origins).await?;

    Ok(())
}
