//! Launch Dashboard server
//!
//! Loads the launch table once and serves the dashboard until interrupted.

use anyhow::Context;
use launch_dash::api::{serve, AppState};
use launch_dash::config::Config;
use launch_dash::dataset::Dataset;
use launch_dash::logging::init_tracing;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_path) = Config::load_default().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    tracing::info!("Launch Dashboard v{}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("No config file found, using defaults"),
    }

    let dataset = match Dataset::load(&config.dataset.path, &config.dataset.loader()) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!(
                path = %config.dataset.path.display(),
                error = %e,
                "Failed to load launch dataset"
            );
            return Err(e).context("Failed to load launch dataset");
        }
    };

    tracing::info!(
        rows = dataset.len(),
        sites = dataset.sites().len(),
        payload_range = %dataset.payload_bounds(),
        "Launch dataset loaded"
    );

    let api_config = config.api.clone();
    let state = AppState::new(Arc::new(dataset), config);

    serve(state, &api_config).await?;

    Ok(())
}
