use crate::error::{ErrorResponse, HttpAppError};
use crate::services::ConversionService;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::Response,
};
use bytes::Bytes;
use remux_core::{AppError, OutputFormat};
use std::sync::Arc;
use utoipa::ToSchema;

/// Multipart form shape, for the OpenAPI spec only.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ConversionForm {
    /// The file to convert
    #[schema(format = Binary, value_type = String)]
    file: String,
    /// Target format token (e.g. "jpeg", "mp3", "mp4")
    format: String,
}

/// Parsed multipart conversion request.
struct ConversionUpload {
    filename: String,
    content: Bytes,
    target: OutputFormat,
}

async fn read_multipart(mut multipart: Multipart) -> Result<ConversionUpload, HttpAppError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut format: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().map(ToString::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().map(ToString::to_string).ok_or_else(|| {
                    AppError::InvalidInput("'file' part must carry a filename".to_string())
                })?;
                let content = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read uploaded file: {}", e))
                })?;
                file = Some((filename, content));
            }
            Some("format") => {
                let token = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read 'format' field: {}", e))
                })?;
                format = Some(token);
            }
            _ => {}
        }
    }

    let (filename, content) =
        file.ok_or_else(|| AppError::InvalidInput("Missing 'file' part".to_string()))?;
    let token =
        format.ok_or_else(|| AppError::InvalidInput("Missing 'format' field".to_string()))?;
    let target = token
        .parse::<OutputFormat>()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    Ok(ConversionUpload {
        filename,
        content,
        target,
    })
}

#[utoipa::path(
    post,
    path = "/api/v0/conversions",
    tag = "conversions",
    request_body(content = inline(ConversionForm), content_type = "multipart/form-data",
        description = "Form parts: 'file' (the upload, with filename) and 'format' (target format token)"),
    responses(
        (status = 200, description = "Converted file", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid input or category mismatch", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 503, description = "Transcoder unavailable", body = ErrorResponse),
        (status = 500, description = "Conversion failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "convert"))]
pub async fn convert_media(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let upload = read_multipart(multipart).await?;

    tracing::debug!(
        filename = %upload.filename,
        format = %upload.target,
        size = upload.content.len(),
        "Conversion requested"
    );

    let service = ConversionService::new(&state);
    let converted = service
        .convert(&upload.filename, &upload.content, upload.target)
        .await?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", converted.filename),
        )
        .body(Body::from(converted.content))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
