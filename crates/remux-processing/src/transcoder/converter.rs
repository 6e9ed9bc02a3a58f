//! Transcoder invocation.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Subprocess outcome, classified. Any non-zero exit is a uniform
/// conversion failure; the exit status and captured stderr ride along for
/// logging and non-production error details.
#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("Failed to execute transcoder: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Transcoder exited with status {status:?}")]
    Failed {
        status: Option<i32>,
        stderr: String,
    },

    #[error("Transcoder reported success but produced no output file")]
    MissingOutput,
}

/// One resolved transcoder executable.
pub struct Transcoder {
    program: PathBuf,
}

impl Transcoder {
    pub fn new(program: PathBuf) -> Self {
        Self { program }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Convert `input_path` into `output_path`; the output format is carried
    /// by the output path's extension. `-y` forces overwrite of any
    /// pre-existing output file. Blocks the task until the subprocess
    /// exits; there is no timeout and no retry.
    pub async fn convert(
        &self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<(), TranscodeError> {
        let args = [
            "-y".to_string(),
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
            output_path.to_string_lossy().to_string(),
        ];

        tracing::debug!(
            program = %self.program.display(),
            input = %input_path.display(),
            output = %output_path.display(),
            "Invoking transcoder"
        );

        let output = Command::new(&self.program)
            .args(&args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(TranscodeError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(TranscodeError::Failed {
                status: output.status.code(),
                stderr,
            });
        }

        if !output_path.is_file() {
            return Err(TranscodeError::MissingOutput);
        }

        Ok(())
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Write an executable shell script standing in for the transcoder.
    fn stub_transcoder(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("stub-transcoder");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    #[tokio::test]
    async fn test_convert_success_writes_output() {
        let tmp = tempfile::tempdir().unwrap();
        // stub copies input ($3, after -y -i) to output ($4)
        let program = stub_transcoder(tmp.path(), "cp \"$3\" \"$4\"");

        let input = tmp.path().join("in.png");
        let output = tmp.path().join("converted.jpeg");
        std::fs::write(&input, b"pixels").unwrap();

        let transcoder = Transcoder::new(program);
        transcoder.convert(&input, &output).await.unwrap();
        assert_eq!(std::fs::read(&output).unwrap(), b"pixels");
    }

    #[tokio::test]
    async fn test_convert_nonzero_exit_carries_stderr() {
        let tmp = tempfile::tempdir().unwrap();
        let program = stub_transcoder(tmp.path(), "echo 'Unknown encoder' >&2; exit 1");

        let input = tmp.path().join("in.png");
        let output = tmp.path().join("converted.jpeg");
        std::fs::write(&input, b"pixels").unwrap();

        let transcoder = Transcoder::new(program);
        let err = transcoder.convert(&input, &output).await.unwrap_err();
        match err {
            TranscodeError::Failed { status, stderr } => {
                assert_eq!(status, Some(1));
                assert!(stderr.contains("Unknown encoder"));
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_convert_missing_output_despite_success() {
        let tmp = tempfile::tempdir().unwrap();
        let program = stub_transcoder(tmp.path(), "exit 0");

        let input = tmp.path().join("in.png");
        let output = tmp.path().join("converted.jpeg");
        std::fs::write(&input, b"pixels").unwrap();

        let transcoder = Transcoder::new(program);
        let err = transcoder.convert(&input, &output).await.unwrap_err();
        assert!(matches!(err, TranscodeError::MissingOutput));
    }

    #[tokio::test]
    async fn test_convert_unspawnable_program() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in.png");
        let output = tmp.path().join("converted.jpeg");
        std::fs::write(&input, b"pixels").unwrap();

        let transcoder = Transcoder::new(tmp.path().join("no-such-binary"));
        let err = transcoder.convert(&input, &output).await.unwrap_err();
        assert!(matches!(err, TranscodeError::Spawn(_)));
    }
}
