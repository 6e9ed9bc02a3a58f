use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, Json};
use remux_core::AppError;
use remux_processing::Installer;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// Transcoder resolution status.
#[derive(Debug, Serialize, ToSchema)]
pub struct TranscoderStatusResponse {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InstallResponse {
    pub installed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v0/transcoder",
    tag = "transcoder",
    responses(
        (status = 200, description = "Transcoder resolution status", body = TranscoderStatusResponse)
    )
)]
pub async fn transcoder_status(
    State(state): State<Arc<AppState>>,
) -> Json<TranscoderStatusResponse> {
    let resolved = state.locator.resolve();
    if resolved.is_none() {
        tracing::warn!("Transcoder status requested but no executable could be resolved");
    }

    Json(TranscoderStatusResponse {
        available: resolved.is_some(),
        path: resolved.map(|p| p.display().to_string()),
    })
}

/// Explicit-user-action fallback: install the transcoder through the host
/// package manager.
#[utoipa::path(
    post,
    path = "/api/v0/transcoder/install",
    tag = "transcoder",
    responses(
        (status = 200, description = "Transcoder installed", body = InstallResponse),
        (status = 400, description = "Installation disabled", body = ErrorResponse),
        (status = 500, description = "Installer failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "install_transcoder"))]
pub async fn install_transcoder(
    State(state): State<Arc<AppState>>,
) -> Result<Json<InstallResponse>, HttpAppError> {
    if !state.config.install_enabled {
        return Err(AppError::InvalidInput(
            "Transcoder installation is disabled (TRANSCODER_INSTALL_ENABLED=false)".to_string(),
        )
        .into());
    }

    let installer = Installer::detect();
    installer.install().await?;

    let resolved = state.locator.resolve();
    tracing::info!(path = ?resolved, "Transcoder install finished");

    Ok(Json(InstallResponse {
        installed: true,
        path: resolved.map(|p| p.display().to_string()),
    }))
}
