use crate::state::AppState;
use axum::{extract::State, Json};
use remux_core::models::{upload_extensions, MediaCategory, OutputFormat};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

/// One selectable conversion target.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormatInfo {
    pub format: OutputFormat,
    pub category: MediaCategory,
}

/// Everything a client needs to render the conversion form.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormatsResponse {
    pub targets: Vec<FormatInfo>,
    pub upload_extensions: Vec<&'static str>,
    pub max_file_size_bytes: usize,
}

#[utoipa::path(
    get,
    path = "/api/v0/formats",
    tag = "formats",
    responses(
        (status = 200, description = "Selectable target formats and accepted upload extensions", body = FormatsResponse)
    )
)]
pub async fn list_formats(State(state): State<Arc<AppState>>) -> Json<FormatsResponse> {
    let targets = OutputFormat::ALL
        .iter()
        .map(|format| FormatInfo {
            format: *format,
            category: format.category(),
        })
        .collect();

    Json(FormatsResponse {
        targets,
        upload_extensions: upload_extensions(),
        max_file_size_bytes: state.config.max_file_size_bytes,
    })
}
