//! Media categories and conversion target formats.
//!
//! Classification is table-driven: every accepted upload extension belongs to
//! exactly one category, and every conversion target knows its category.
//! Cross-category conversion is rejected by the validator before the
//! transcoder is ever invoked.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Image extensions accepted as conversion sources.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "bmp"];

/// Audio extensions accepted as conversion sources.
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "midi"];

/// Video extensions accepted as conversion sources.
/// `mpeg4` is upload-only; it is not a selectable target.
pub const VIDEO_EXTENSIONS: &[&str] = &["flv", "mov", "mp4", "avi", "3gp", "mpeg4"];

/// Media category enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Image,
    Audio,
    Video,
}

impl MediaCategory {
    /// Classify a file extension (case-insensitive). Unknown extensions
    /// classify to `None`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let ext = extension.to_lowercase();
        let ext = ext.as_str();
        if IMAGE_EXTENSIONS.contains(&ext) {
            Some(MediaCategory::Image)
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            Some(MediaCategory::Audio)
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            Some(MediaCategory::Video)
        } else {
            None
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaCategory::Image => "image",
            MediaCategory::Audio => "audio",
            MediaCategory::Video => "video",
        };
        write!(f, "{}", name)
    }
}

/// All extensions accepted for upload, across categories.
pub fn upload_extensions() -> Vec<&'static str> {
    IMAGE_EXTENSIONS
        .iter()
        .chain(AUDIO_EXTENSIONS)
        .chain(VIDEO_EXTENSIONS)
        .copied()
        .collect()
}

/// A selectable conversion target.
///
/// The token doubles as the output file extension: a successful conversion
/// is handed back as `converted.<token>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Jpeg,
    Png,
    Bmp,
    Flv,
    Mov,
    Mp4,
    Avi,
    Wav,
    Mp3,
    #[serde(rename = "3gp")]
    ThreeGp,
    Midi,
}

/// Unknown target format token.
#[derive(Debug, thiserror::Error)]
#[error("Unknown output format: {0}")]
pub struct UnknownFormat(pub String);

impl OutputFormat {
    /// Every selectable target, in UI order.
    pub const ALL: &'static [OutputFormat] = &[
        OutputFormat::Jpeg,
        OutputFormat::Png,
        OutputFormat::Bmp,
        OutputFormat::Flv,
        OutputFormat::Mov,
        OutputFormat::Mp4,
        OutputFormat::Avi,
        OutputFormat::Wav,
        OutputFormat::Mp3,
        OutputFormat::ThreeGp,
        OutputFormat::Midi,
    ];

    /// The format token, which is also the output file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Flv => "flv",
            OutputFormat::Mov => "mov",
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Avi => "avi",
            OutputFormat::Wav => "wav",
            OutputFormat::Mp3 => "mp3",
            OutputFormat::ThreeGp => "3gp",
            OutputFormat::Midi => "midi",
        }
    }

    pub fn category(&self) -> MediaCategory {
        match self {
            OutputFormat::Jpeg | OutputFormat::Png | OutputFormat::Bmp => MediaCategory::Image,
            OutputFormat::Wav | OutputFormat::Mp3 | OutputFormat::Midi => MediaCategory::Audio,
            OutputFormat::Flv
            | OutputFormat::Mov
            | OutputFormat::Mp4
            | OutputFormat::Avi
            | OutputFormat::ThreeGp => MediaCategory::Video,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        OutputFormat::ALL
            .iter()
            .find(|format| format.as_str() == token)
            .copied()
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_extension() {
        assert_eq!(
            MediaCategory::from_extension("png"),
            Some(MediaCategory::Image)
        );
        assert_eq!(
            MediaCategory::from_extension("JPG"),
            Some(MediaCategory::Image)
        );
        assert_eq!(
            MediaCategory::from_extension("mp3"),
            Some(MediaCategory::Audio)
        );
        assert_eq!(
            MediaCategory::from_extension("3gp"),
            Some(MediaCategory::Video)
        );
        assert_eq!(
            MediaCategory::from_extension("mpeg4"),
            Some(MediaCategory::Video)
        );
        assert_eq!(MediaCategory::from_extension("pdf"), None);
        assert_eq!(MediaCategory::from_extension(""), None);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("jpeg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!(" MP4 ".parse::<OutputFormat>().unwrap(), OutputFormat::Mp4);
        assert_eq!(
            "3gp".parse::<OutputFormat>().unwrap(),
            OutputFormat::ThreeGp
        );
        assert!("webm".parse::<OutputFormat>().is_err());
        // jpg and mpeg4 are accepted uploads but not selectable targets
        assert!("jpg".parse::<OutputFormat>().is_err());
        assert!("mpeg4".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_roundtrip() {
        for format in OutputFormat::ALL {
            assert_eq!(format.as_str().parse::<OutputFormat>().unwrap(), *format);
        }
    }

    #[test]
    fn test_output_format_categories() {
        assert_eq!(OutputFormat::Jpeg.category(), MediaCategory::Image);
        assert_eq!(OutputFormat::Midi.category(), MediaCategory::Audio);
        assert_eq!(OutputFormat::ThreeGp.category(), MediaCategory::Video);
    }

    #[test]
    fn test_every_target_is_an_accepted_upload() {
        let accepted = upload_extensions();
        for format in OutputFormat::ALL {
            assert!(accepted.contains(&format.as_str()), "{}", format);
        }
    }

    #[test]
    fn test_serde_tokens() {
        assert_eq!(
            serde_json::to_string(&OutputFormat::ThreeGp).unwrap(),
            "\"3gp\""
        );
        assert_eq!(
            serde_json::from_str::<OutputFormat>("\"wav\"").unwrap(),
            OutputFormat::Wav
        );
    }
}
