//! Error types module
//!
//! This module provides the core error types used throughout the remux
//! application. All errors are unified under the `AppError` enum, which the
//! API layer converts into HTTP responses via the `ErrorMetadata` trait.

use std::io;

use crate::models::MediaCategory;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a missing transcoder
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "CATEGORY_MISMATCH")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Cannot convert {source_category} to {target_category}")]
    CategoryMismatch {
        source_category: MediaCategory,
        target_category: MediaCategory,
    },

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Transcoder unavailable: {0}")]
    TranscoderUnavailable(String),

    #[error("Conversion failed (exit status {status:?})")]
    ConversionFailed {
        status: Option<i32>,
        diagnostics: String,
    },

    #[error("Installer failed (exit status {status:?})")]
    InstallFailed {
        status: Option<i32>,
        diagnostics: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

// Error conversion implementations following Rust best practices
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// Reduces duplication in ErrorMetadata impl; client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::CategoryMismatch { .. } => (
            400,
            "CATEGORY_MISMATCH",
            false,
            Some("Choose a target format in the same category as the uploaded file"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size below the configured limit"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::TranscoderUnavailable(_) => (
            503,
            "TRANSCODER_UNAVAILABLE",
            true,
            Some("Install the transcoder or set FFMPEG_PATH"),
            false,
            LogLevel::Warn,
        ),
        AppError::ConversionFailed { .. } => (
            500,
            "CONVERSION_FAILED",
            false,
            Some("Try a different file or target format"),
            true,
            LogLevel::Error,
        ),
        AppError::InstallFailed { .. } => (
            500,
            "INSTALLER_FAILED",
            true,
            Some("Retry, or install the transcoder manually"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::CategoryMismatch { .. } => "CategoryMismatch",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::TranscoderUnavailable(_) => "TranscoderUnavailable",
            AppError::ConversionFailed { .. } => "ConversionFailed",
            AppError::InstallFailed { .. } => "InstallFailed",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        match self {
            AppError::ConversionFailed { diagnostics, .. }
            | AppError::InstallFailed { diagnostics, .. }
                if !diagnostics.is_empty() =>
            {
                details.push_str(&format!("\n  Diagnostics: {}", diagnostics));
            }
            _ => {}
        }

        // Add source error chain
        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::CategoryMismatch {
                source_category,
                target_category,
            } => format!(
                "Cannot convert {} files to {} formats",
                source_category, target_category
            ),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::TranscoderUnavailable(ref msg) => msg.clone(),
            AppError::ConversionFailed { .. } => "File conversion failed".to_string(),
            AppError::InstallFailed { .. } => "Transcoder installation failed".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
