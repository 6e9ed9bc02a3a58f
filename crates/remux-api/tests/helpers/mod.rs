//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p remux-api --test convert_test` or
//! `cargo test -p remux-api`. No external transcoder is required; tests point
//! FFMPEG_PATH at a stub shell script.

use axum_test::TestServer;
use remux_api::constants;
use remux_api::setup::{build_state, routes};
use remux_core::Config;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus owned scratch resources.
pub struct TestApp {
    pub server: TestServer,
    pub scratch_root: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Scratch session directories still present (should be none after any
    /// completed request).
    pub fn scratch_entries(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.scratch_root)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok().map(|e| e.path()))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    }
}

pub fn test_config(temp: &Path, ffmpeg_path: &str) -> Config {
    Config {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        scratch_dir: temp.join("scratch").to_string_lossy().to_string(),
        max_file_size_bytes: 10 * 1024 * 1024,
        ffmpeg_path: ffmpeg_path.to_string(),
        ffmpeg_fallback_paths: vec![],
        install_enabled: true,
    }
}

/// Setup test app with an isolated scratch root and the given transcoder.
pub async fn setup_test_app(ffmpeg_path: &str) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = test_config(temp_dir.path(), ffmpeg_path);
    setup_test_app_with_config(temp_dir, config).await
}

pub async fn setup_test_app_with_config(temp_dir: TempDir, config: Config) -> TestApp {
    let state = build_state(config).await.expect("Failed to build state");
    let scratch_root = state.scratch.root().to_path_buf();
    let router = routes::setup_routes(&state.config, state.clone()).expect("Failed to build routes");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        scratch_root,
        _temp_dir: temp_dir,
    }
}

/// Write an executable shell script standing in for the transcoder.
#[cfg(unix)]
pub fn stub_transcoder(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("stub-transcoder");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).expect("write stub");
    let mut perms = std::fs::metadata(&path).expect("stat stub").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod stub");
    path
}
