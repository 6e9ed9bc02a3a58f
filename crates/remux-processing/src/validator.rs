use remux_core::models::{MediaCategory, OutputFormat};
use std::path::Path;

/// Validation errors for conversion requests
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Empty file")]
    EmptyFile,

    #[error("Missing file extension (filename: {0})")]
    MissingExtension(String),

    #[error("Unsupported file extension: {0}")]
    UnsupportedExtension(String),

    #[error("Cannot convert {source_category} to {target_category}")]
    CategoryMismatch {
        source_category: MediaCategory,
        target_category: MediaCategory,
    },
}

/// Conversion request validator
///
/// Classifies the uploaded file's extension and the requested target into
/// media categories and rejects cross-category requests, plus the size
/// checks. All checks are pure and synchronous; none of them touch the
/// filesystem or the transcoder.
pub struct ConversionValidator {
    max_file_size: usize,
}

impl ConversionValidator {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Classify the source file by its extension
    pub fn source_category(&self, filename: &str) -> Result<MediaCategory, ValidationError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| ValidationError::MissingExtension(filename.to_string()))?;

        MediaCategory::from_extension(&extension)
            .ok_or(ValidationError::UnsupportedExtension(extension))
    }

    /// Check that the source and target categories match
    pub fn validate_category(
        &self,
        source_category: MediaCategory,
        target: OutputFormat,
    ) -> Result<(), ValidationError> {
        let target_category = target.category();
        if source_category != target_category {
            return Err(ValidationError::CategoryMismatch {
                source_category,
                target_category,
            });
        }

        Ok(())
    }

    /// Validate a full conversion request. Returns the source category on
    /// success; the caller must not invoke the transcoder if this fails.
    pub fn validate_request(
        &self,
        filename: &str,
        size: usize,
        target: OutputFormat,
    ) -> Result<MediaCategory, ValidationError> {
        self.validate_file_size(size)?;
        let source_category = self.source_category(filename)?;
        self.validate_category(source_category, target)?;
        Ok(source_category)
    }
}
