//! External transcoder plumbing: locating the executable, invoking it, and
//! the package-manager fallback install.

mod converter;
mod installer;
mod locator;

pub use converter::{TranscodeError, Transcoder};
pub use installer::{InstallError, Installer};
pub use locator::TranscoderLocator;
