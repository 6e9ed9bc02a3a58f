//! Route configuration and setup.

use crate::api_doc::ApiDoc;
use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use remux_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Headroom on top of the configured file size limit for multipart framing
/// and the format field. The exact limit is enforced by the validator.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>> {
    let cors = setup_cors(config)?;
    let body_limit = config.max_file_size_bytes + UPLOAD_OVERHEAD_BYTES;

    let api_routes = Router::new()
        .route(
            &format!("{}/conversions", API_PREFIX),
            post(handlers::convert::convert_media),
        )
        .route(
            &format!("{}/formats", API_PREFIX),
            get(handlers::formats::list_formats),
        )
        .route(
            &format!("{}/transcoder", API_PREFIX),
            get(handlers::transcoder::transcoder_status),
        )
        .route(
            &format!("{}/transcoder/install", API_PREFIX),
            post(handlers::transcoder::install_transcoder),
        )
        .route("/health/live", get(handlers::health::liveness_check))
        .route("/health/ready", get(handlers::health::readiness_check))
        .route("/api/openapi.json", get(openapi_spec))
        .with_state(state);

    let app = api_routes
        .merge(
            axum::Router::from(
                utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"),
            ),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(app)
}

async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

fn setup_cors(config: &Config) -> Result<CorsLayer> {
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", origin, e))
            })
            .collect::<Result<Vec<_>>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any)
    };

    Ok(cors)
}
