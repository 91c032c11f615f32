use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:5001";
pub const DEFAULT_SESSION_FILE: &str = ".resume_session.json";

/// Client configuration loaded from environment variables.
/// Every variable is optional; defaults target a local backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub session_file: PathBuf,
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: env_or("RESUME_API_URL", DEFAULT_API_URL),
            session_file: PathBuf::from(env_or("RESUME_SESSION_FILE", DEFAULT_SESSION_FILE)),
            request_timeout: Duration::from_secs(
                env_or("REQUEST_TIMEOUT_SECS", "30")
                    .parse::<u64>()
                    .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            rust_log: env_or("RUST_LOG", "warn"),
        })
    }

    /// Applies a command-line override of the API base URL.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
