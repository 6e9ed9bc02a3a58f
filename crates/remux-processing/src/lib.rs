//! Remux Processing Library
//!
//! Pure request validation, request-scoped scratch storage, and the
//! external-transcoder plumbing (location, invocation, fallback install).
//! Nothing in this crate knows about HTTP.

pub mod scratch;
pub mod transcoder;
pub mod validator;

pub use scratch::{ScratchArea, ScratchSession};
pub use transcoder::{InstallError, Installer, TranscodeError, Transcoder, TranscoderLocator};
pub use validator::{ConversionValidator, ValidationError};
