//! Configuration module
//!
//! Environment-driven configuration for the conversion service. Every field
//! has a default so the service starts with nothing but `cargo run`;
//! `validate()` fails fast on the combinations that must not reach
//! production.

use std::env;

// Common constants
const SERVER_PORT: u16 = 4000;
const MAX_FILE_SIZE_MB: usize = 10;

/// Application configuration (conversion service).
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Root directory for request-scoped scratch files.
    pub scratch_dir: String,
    pub max_file_size_bytes: usize,
    /// Transcoder executable: bare name (searched on PATH) or explicit path.
    pub ffmpeg_path: String,
    /// Extra locations probed when the configured executable is absent.
    pub ffmpeg_fallback_paths: Vec<String>,
    /// Whether the install endpoint may invoke the host package manager.
    pub install_enabled: bool,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            scratch_dir: env::var("SCRATCH_DIR").unwrap_or_else(|_| "temp".to_string()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            ffmpeg_fallback_paths: env::var("FFMPEG_FALLBACK_PATHS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            install_enabled: env::var("TRANSCODER_INSTALL_ENABLED")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o.trim() == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.scratch_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("SCRATCH_DIR must not be empty"));
        }

        if self.ffmpeg_path.trim().is_empty() {
            return Err(anyhow::anyhow!("FFMPEG_PATH must not be empty"));
        }

        Ok(())
    }
}
