//! Conversion request orchestration: validate → persist → resolve →
//! invoke → read output. Scratch cleanup rides on the session's drop and
//! therefore covers every exit path, including the early error returns.

use bytes::Bytes;
use remux_core::{AppError, OutputFormat};
use remux_processing::{ConversionValidator, Transcoder};

use crate::error::HttpAppError;
use crate::state::AppState;

/// A finished conversion: download filename plus the converted bytes.
pub struct ConvertedFile {
    pub filename: String,
    pub content: Bytes,
}

pub struct ConversionService<'a> {
    state: &'a AppState,
}

impl<'a> ConversionService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn convert(
        &self,
        original_filename: &str,
        content: &[u8],
        target: OutputFormat,
    ) -> Result<ConvertedFile, HttpAppError> {
        let validator = ConversionValidator::new(self.state.config.max_file_size_bytes);
        let source_category = validator.validate_request(original_filename, content.len(), target)?;

        let session = self.state.scratch.begin(original_filename).await?;
        session.write_input(content).await?;

        tracing::debug!(
            request = %session.token(),
            category = %source_category,
            format = %target,
            size = content.len(),
            "Upload staged for conversion"
        );

        // Resolution happens per request; a binary installed mid-flight is
        // picked up without a restart.
        let program = self.state.locator.resolve().ok_or_else(|| {
            AppError::TranscoderUnavailable(
                "No usable transcoder executable found; install ffmpeg or set FFMPEG_PATH"
                    .to_string(),
            )
        })?;

        let output_path = session.output_path(target);
        let transcoder = Transcoder::new(program);
        transcoder
            .convert(session.input_path(), &output_path)
            .await?;

        // The output is read fully before the session drops, so the scratch
        // artifacts are gone by the time the bytes are handed to the caller.
        let converted = tokio::fs::read(&output_path)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read converted file: {}", e)))?;

        tracing::info!(
            request = %session.token(),
            format = %target,
            input_size = content.len(),
            output_size = converted.len(),
            "Conversion completed"
        );

        Ok(ConvertedFile {
            filename: format!("converted.{}", target.as_str()),
            content: Bytes::from(converted),
        })
    }
}
