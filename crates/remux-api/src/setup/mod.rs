//! Application setup and initialization
//!
//! All application initialization logic lives here rather than in main.rs.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use remux_core::Config;
use remux_processing::{ScratchArea, TranscoderLocator};
use std::path::PathBuf;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry()
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Configuration loaded and validated successfully");

    let state = build_state(config).await?;
    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}

/// Build application state: scratch root and transcoder locator.
/// Split out from [`initialize_app`] so tests can build state without
/// touching the global tracing subscriber.
pub async fn build_state(config: Config) -> Result<Arc<AppState>> {
    let scratch = ScratchArea::open(&config.scratch_dir)
        .await
        .context("Failed to open scratch area")?;

    let locator = TranscoderLocator::new(
        config.ffmpeg_path.clone(),
        config
            .ffmpeg_fallback_paths
            .iter()
            .map(PathBuf::from)
            .collect(),
    );

    match locator.resolve() {
        Some(path) => tracing::info!(path = %path.display(), "Transcoder resolved"),
        None => tracing::warn!(
            configured = %config.ffmpeg_path,
            "No transcoder executable found; conversions will fail until one is installed"
        ),
    }

    Ok(Arc::new(AppState {
        is_production: config.is_production(),
        config,
        scratch,
        locator,
    }))
}
