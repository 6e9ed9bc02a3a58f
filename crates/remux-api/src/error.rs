//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`. Use
//! `AppError` (or types that implement `Into<AppError>`) for errors and `?`
//! so they become `HttpAppError` and render consistently (status, body, logging).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use remux_core::{AppError, ErrorMetadata, LogLevel};
use remux_processing::transcoder::{InstallError, TranscodeError};
use remux_processing::validator::ValidationError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from remux-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let is_production = is_production_env();

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Always hide details in production for security; in non-production, only show details for non-sensitive errors.
        let body = if is_production || app_error.is_sensitive() {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: None,
                error_type: None,
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
            })
        } else {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: Some(app_error.detailed_message()),
                error_type: Some(app_error.error_type().to_string()),
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
            })
        };

        (status, body).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        let app = match err {
            ValidationError::FileTooLarge { size, max } => {
                AppError::PayloadTooLarge(format!("{} bytes exceeds max {} bytes", size, max))
            }
            ValidationError::EmptyFile => AppError::InvalidInput("File is empty".to_string()),
            ValidationError::MissingExtension(filename) => {
                AppError::InvalidInput(format!("Missing file extension (filename: {})", filename))
            }
            ValidationError::UnsupportedExtension(extension) => {
                AppError::InvalidInput(format!("Unsupported file extension '{}'", extension))
            }
            ValidationError::CategoryMismatch {
                source_category,
                target_category,
            } => AppError::CategoryMismatch {
                source_category,
                target_category,
            },
        };
        HttpAppError(app)
    }
}

impl From<TranscodeError> for HttpAppError {
    fn from(err: TranscodeError) -> Self {
        let app = match err {
            TranscodeError::Spawn(e) => {
                AppError::Internal(format!("Failed to execute transcoder: {}", e))
            }
            TranscodeError::Failed { status, stderr } => AppError::ConversionFailed {
                status,
                diagnostics: stderr,
            },
            TranscodeError::MissingOutput => {
                AppError::Internal("Transcoder produced no output file".to_string())
            }
        };
        HttpAppError(app)
    }
}

impl From<InstallError> for HttpAppError {
    fn from(err: InstallError) -> Self {
        let app = match err {
            InstallError::NoPackageManager => AppError::InstallFailed {
                status: None,
                diagnostics: "No supported package manager found on this host".to_string(),
            },
            InstallError::Spawn(e) => AppError::InstallFailed {
                status: None,
                diagnostics: format!("Failed to execute installer: {}", e),
            },
            InstallError::Failed { status, stderr } => AppError::InstallFailed {
                status,
                diagnostics: stderr,
            },
        };
        HttpAppError(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remux_core::models::MediaCategory;

    #[test]
    fn test_from_validation_error_file_too_large() {
        let validation_err = ValidationError::FileTooLarge {
            size: 11_534_336,
            max: 10_485_760,
        };
        let HttpAppError(app_err) = validation_err.into();
        match app_err {
            AppError::PayloadTooLarge(msg) => {
                assert!(msg.contains("11534336"));
                assert!(msg.contains("10485760"));
            }
            _ => panic!("Expected PayloadTooLarge variant"),
        }
    }

    #[test]
    fn test_from_validation_error_category_mismatch() {
        let validation_err = ValidationError::CategoryMismatch {
            source_category: MediaCategory::Video,
            target_category: MediaCategory::Audio,
        };
        let HttpAppError(app_err) = validation_err.into();
        match app_err {
            AppError::CategoryMismatch {
                source_category,
                target_category,
            } => {
                assert_eq!(source_category, MediaCategory::Video);
                assert_eq!(target_category, MediaCategory::Audio);
            }
            _ => panic!("Expected CategoryMismatch variant"),
        }
    }

    #[test]
    fn test_from_transcode_error_failed() {
        let err = TranscodeError::Failed {
            status: Some(1),
            stderr: "Invalid data found when processing input".to_string(),
        };
        let HttpAppError(app_err) = err.into();
        match app_err {
            AppError::ConversionFailed {
                status,
                diagnostics,
            } => {
                assert_eq!(status, Some(1));
                assert!(diagnostics.contains("Invalid data"));
            }
            _ => panic!("Expected ConversionFailed variant"),
        }
    }

    #[test]
    fn test_from_install_error_no_package_manager() {
        let HttpAppError(app_err) = InstallError::NoPackageManager.into();
        match app_err {
            AppError::InstallFailed { status, .. } => assert_eq!(status, None),
            _ => panic!("Expected InstallFailed variant"),
        }
    }

    /// Verifies the public error response contract: serialized ErrorResponse has "error",
    /// "code", "recoverable", and optionally "details" / "error_type" / "suggested_action".
    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Cannot convert video files to audio formats".to_string(),
            details: None,
            error_type: Some("CategoryMismatch".to_string()),
            code: "CATEGORY_MISMATCH".to_string(),
            recoverable: false,
            suggested_action: None,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.get("error").and_then(|v| v.as_str()).is_some());
        assert!(json.get("code").and_then(|v| v.as_str()).is_some());
        assert!(json.get("recoverable").and_then(|v| v.as_bool()).is_some());
        assert!(json.get("details").is_none());
        assert!(json.is_object());
    }
}
