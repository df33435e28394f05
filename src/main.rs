// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use qr_code_api::{
    api::{start_server, AppState},
    config::ServiceConfig,
    version,
};
use std::env;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("Starting {}", version::get_version_string());

    let config = ServiceConfig::from_env();
    config.validate().map_err(|e| anyhow!(e))?;

    info!("Storage root: {}", config.storage_root.display());
    info!(
        "Expiry window: {} day(s), default sweep: {} day(s)",
        config.expiry_window_days, config.default_sweep_days
    );

    let generator = config.build_generator()?;
    let state = AppState::new(config, generator);

    start_server(state)
        .await
        .map_err(|e| anyhow!("API server failed: {}", e))?;

    info!("Server stopped");
    Ok(())
}
