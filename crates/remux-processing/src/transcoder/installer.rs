//! Fallback install of the transcoder via the host package manager.
//!
//! Only ever run on an explicit user action; the service never installs
//! anything on its own.

use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("No supported package manager found on this host")]
    NoPackageManager,

    #[error("Failed to execute installer: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Installer exited with status {status:?}")]
    Failed {
        status: Option<i32>,
        stderr: String,
    },
}

/// An installer command: the package-manager executable plus its arguments.
#[derive(Clone, Debug)]
pub struct InstallCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Installs the transcoder through the host's package manager.
pub struct Installer {
    command: Option<InstallCommand>,
}

impl Installer {
    /// Detect a package manager on this host.
    pub fn detect() -> Self {
        Self {
            command: detect_install_command(),
        }
    }

    /// Use a specific installer command (used by tests and custom setups).
    pub fn with_command(command: InstallCommand) -> Self {
        Self {
            command: Some(command),
        }
    }

    pub fn available(&self) -> bool {
        self.command.is_some()
    }

    /// Run the installer to completion. Non-zero exit is classified as a
    /// uniform installer failure carrying status and stderr.
    pub async fn install(&self) -> Result<(), InstallError> {
        let command = self.command.as_ref().ok_or(InstallError::NoPackageManager)?;

        tracing::info!(
            program = %command.program.display(),
            args = ?command.args,
            "Running transcoder installer"
        );

        let output = Command::new(&command.program)
            .args(&command.args)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(InstallError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(InstallError::Failed {
                status: output.status.code(),
                stderr,
            });
        }

        Ok(())
    }
}

/// Probe for a known package manager and build its ffmpeg install command.
fn detect_install_command() -> Option<InstallCommand> {
    // (manager name, install args) in preference order
    #[cfg(target_os = "macos")]
    let candidates: &[(&str, &[&str])] = &[("brew", &["install", "ffmpeg"])];

    #[cfg(not(target_os = "macos"))]
    let candidates: &[(&str, &[&str])] = &[
        ("apt-get", &["install", "-y", "ffmpeg"]),
        ("dnf", &["install", "-y", "ffmpeg"]),
        ("pacman", &["-S", "--noconfirm", "ffmpeg"]),
        ("apk", &["add", "ffmpeg"]),
    ];

    let path_var = std::env::var_os("PATH")?;
    for (name, args) in candidates {
        for dir in std::env::split_paths(&path_var) {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(InstallCommand {
                    program: candidate,
                    args: args.iter().map(|s| s.to_string()).collect(),
                });
            }
        }
    }
    None
}
