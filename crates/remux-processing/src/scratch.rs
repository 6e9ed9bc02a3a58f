//! Request-scoped scratch storage.
//!
//! Uploads are staged under `<scratch_root>/<request-token>/` where the
//! token is a generated UUID, so concurrent requests can never collide on a
//! shared filename. The session directory is removed when the
//! [`ScratchSession`] drops, which covers every exit path: success,
//! invocation failure, and short-circuits before invocation.

use anyhow::{Context, Result};
use remux_core::models::OutputFormat;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// The scratch root. Created once at startup; hands out per-request
/// sessions.
#[derive(Clone, Debug)]
pub struct ScratchArea {
    root: PathBuf,
}

impl ScratchArea {
    /// Open the scratch root, creating it if absent.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .with_context(|| format!("Failed to create scratch directory {}", root.display()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Begin a request-scoped session: a fresh `<root>/<uuid>/` directory.
    pub async fn begin(&self, original_filename: &str) -> Result<ScratchSession> {
        let token = Uuid::new_v4();
        let dir = self.root.join(token.to_string());
        tokio::fs::create_dir(&dir)
            .await
            .with_context(|| format!("Failed to create scratch session {}", dir.display()))?;

        let input_name = sanitize_filename(original_filename);
        let input_path = dir.join(input_name);

        Ok(ScratchSession {
            token,
            dir,
            input_path,
        })
    }
}

/// One request's scratch directory. Removing it is guaranteed on drop.
#[derive(Debug)]
pub struct ScratchSession {
    token: Uuid,
    dir: PathBuf,
    input_path: PathBuf,
}

impl ScratchSession {
    pub fn token(&self) -> Uuid {
        self.token
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Path the converted artifact is written to: `converted.<ext>`.
    pub fn output_path(&self, target: OutputFormat) -> PathBuf {
        self.dir.join(format!("converted.{}", target.as_str()))
    }

    /// Persist the uploaded bytes as the session's input artifact.
    pub async fn write_input(&self, content: &[u8]) -> Result<()> {
        tokio::fs::write(&self.input_path, content)
            .await
            .with_context(|| {
                format!(
                    "Failed to write upload to scratch file {}",
                    self.input_path.display()
                )
            })
    }
}

impl Drop for ScratchSession {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_dir_all(&self.dir) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    error = %err,
                    dir = %self.dir.display(),
                    "Failed to remove scratch session directory"
                );
            }
        }
    }
}

/// Strip any path components from a client-supplied filename. Falls back to
/// a fixed name when nothing usable remains.
fn sanitize_filename(original: &str) -> String {
    let name = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    if name.is_empty() || name == "." || name == ".." {
        "upload.bin".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_area() -> (tempfile::TempDir, ScratchArea) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let area = ScratchArea::open(tmp.path().join("scratch"))
            .await
            .expect("open scratch");
        (tmp, area)
    }

    #[tokio::test]
    async fn test_open_creates_root() {
        let (_tmp, area) = test_area().await;
        assert!(area.root().is_dir());
    }

    #[tokio::test]
    async fn test_session_writes_input_under_token_dir() {
        let (_tmp, area) = test_area().await;
        let session = area.begin("photo.png").await.unwrap();
        session.write_input(b"not really a png").await.unwrap();

        assert!(session.input_path().is_file());
        assert!(session
            .input_path()
            .starts_with(area.root().join(session.token().to_string())));
        assert_eq!(
            session.input_path().file_name().unwrap().to_str().unwrap(),
            "photo.png"
        );
    }

    #[tokio::test]
    async fn test_same_filename_no_collision() {
        let (_tmp, area) = test_area().await;
        let a = area.begin("clip.mp4").await.unwrap();
        let b = area.begin("clip.mp4").await.unwrap();
        assert_ne!(a.input_path(), b.input_path());
    }

    #[tokio::test]
    async fn test_output_path_name() {
        let (_tmp, area) = test_area().await;
        let session = area.begin("track.wav").await.unwrap();
        let output = session.output_path(OutputFormat::Mp3);
        assert_eq!(output.file_name().unwrap().to_str().unwrap(), "converted.mp3");
    }

    #[tokio::test]
    async fn test_drop_removes_session_dir() {
        let (_tmp, area) = test_area().await;
        let session = area.begin("photo.png").await.unwrap();
        session.write_input(b"bytes").await.unwrap();
        let dir = area.root().join(session.token().to_string());
        assert!(dir.is_dir());

        drop(session);
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_drop_removes_dir_with_output_artifact() {
        let (_tmp, area) = test_area().await;
        let session = area.begin("photo.png").await.unwrap();
        session.write_input(b"bytes").await.unwrap();
        let output = session.output_path(OutputFormat::Jpeg);
        std::fs::write(&output, b"converted bytes").unwrap();

        let dir = area.root().join(session.token().to_string());
        drop(session);
        assert!(!output.exists());
        assert!(!dir.exists());
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("photo.png"), "photo.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename(""), "upload.bin");
        assert_eq!(sanitize_filename(".."), "upload.bin");
    }
}
