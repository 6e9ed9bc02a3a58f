pub mod format;

pub use format::{
    upload_extensions, MediaCategory, OutputFormat, UnknownFormat, AUDIO_EXTENSIONS,
    IMAGE_EXTENSIONS, VIDEO_EXTENSIONS,
};
