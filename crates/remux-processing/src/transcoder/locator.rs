//! Transcoder executable resolution.
//!
//! Resolution order: an explicit configured path is used as-is if it points
//! at a file; a bare name is searched on `PATH`; after that each configured
//! fallback location is probed. The result carries no state — callers
//! re-resolve per use, and an unresolved executable must never be invoked.

use std::env;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct TranscoderLocator {
    configured: String,
    fallback_paths: Vec<PathBuf>,
}

impl TranscoderLocator {
    pub fn new(configured: impl Into<String>, fallback_paths: Vec<PathBuf>) -> Self {
        Self {
            configured: configured.into(),
            fallback_paths,
        }
    }

    /// Resolve a usable executable path, or `None` if nothing is found.
    pub fn resolve(&self) -> Option<PathBuf> {
        let configured = Path::new(&self.configured);

        // Explicit path (contains a separator): use it or nothing from it.
        if configured.components().count() > 1 {
            if configured.is_file() {
                return Some(configured.to_path_buf());
            }
        } else if let Some(found) = search_path(&self.configured) {
            return Some(found);
        }

        self.fallback_paths
            .iter()
            .find(|candidate| candidate.is_file())
            .cloned()
    }
}

/// Search each `PATH` entry for the named executable.
fn search_path(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    for dir in env::split_paths(&path_var) {
        let candidate = dir.join(name);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"#!/bin/sh\n").unwrap();
    }

    #[test]
    fn test_resolve_explicit_path() {
        let tmp = tempfile::tempdir().unwrap();
        let binary = tmp.path().join("ffmpeg");
        touch(&binary);

        let locator = TranscoderLocator::new(binary.to_string_lossy().to_string(), vec![]);
        assert_eq!(locator.resolve(), Some(binary));
    }

    #[test]
    fn test_resolve_explicit_path_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let locator = TranscoderLocator::new(
            tmp.path().join("missing").to_string_lossy().to_string(),
            vec![],
        );
        assert_eq!(locator.resolve(), None);
    }

    #[test]
    fn test_resolve_falls_back_when_name_not_on_path() {
        let tmp = tempfile::tempdir().unwrap();
        let fallback = tmp.path().join("bundled-ffmpeg");
        touch(&fallback);

        let locator = TranscoderLocator::new(
            "definitely-not-a-real-transcoder-binary",
            vec![tmp.path().join("missing"), fallback.clone()],
        );
        assert_eq!(locator.resolve(), Some(fallback));
    }

    #[test]
    fn test_resolve_absent_everywhere() {
        let locator = TranscoderLocator::new(
            "definitely-not-a-real-transcoder-binary",
            vec![PathBuf::from("/nonexistent/bundled-ffmpeg")],
        );
        assert_eq!(locator.resolve(), None);
    }
}
