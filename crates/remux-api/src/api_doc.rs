//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use remux_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Remux API",
        version = "0.1.0",
        description = "Media file conversion API: upload an image, audio, or video file with a target format and download the converted result. Conversion is delegated to an external transcoder (ffmpeg); cross-category conversions are rejected. All endpoints are versioned under /api/v0/."
    ),
    paths(
        handlers::convert::convert_media,
        handlers::formats::list_formats,
        handlers::transcoder::transcoder_status,
        handlers::transcoder::install_transcoder,
    ),
    components(schemas(
        error::ErrorResponse,
        handlers::formats::FormatInfo,
        handlers::formats::FormatsResponse,
        handlers::transcoder::TranscoderStatusResponse,
        handlers::transcoder::InstallResponse,
        models::MediaCategory,
        models::OutputFormat,
    )),
    tags(
        (name = "conversions", description = "File conversion"),
        (name = "formats", description = "Format discovery"),
        (name = "transcoder", description = "Transcoder status and fallback install")
    )
)]
pub struct ApiDoc;
