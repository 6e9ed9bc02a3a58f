//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - scratch directory usable; transcoder state reported
/// but not required (conversions degrade to a 503, the service itself is
/// still ready).
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut response = serde_json::json!({
        "status": "ready",
        "scratch": "unknown",
        "transcoder": "unknown"
    });

    let mut overall_ready = true;
    match tokio::fs::metadata(state.scratch.root()).await {
        Ok(meta) if meta.is_dir() => response["scratch"] = serde_json::json!("ready"),
        Ok(_) => {
            tracing::error!(dir = %state.scratch.root().display(), "Scratch path is not a directory");
            response["scratch"] = serde_json::json!("not_ready: not a directory");
            overall_ready = false;
        }
        Err(e) => {
            tracing::error!(error = %e, dir = %state.scratch.root().display(), "Scratch readiness check failed");
            response["scratch"] = serde_json::json!(format!("not_ready: {}", e));
            overall_ready = false;
        }
    }

    response["transcoder"] = match state.locator.resolve() {
        Some(_) => serde_json::json!("available"),
        None => serde_json::json!("unavailable"),
    };

    if !overall_ready {
        response["status"] = serde_json::json!("not_ready");
    }

    let status_code = if overall_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
