//! Client configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_PROGRESS_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin without a trailing slash.
    pub api_base_url: String,
    /// Quiet period before the viewed item is reported.
    pub progress_debounce: Duration,
    /// Token that takes precedence over the stored one.
    pub access_token: Option<String>,
    pub token_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            progress_debounce: Duration::from_millis(DEFAULT_PROGRESS_DEBOUNCE_MS),
            access_token: None,
            token_path: default_token_path(),
        }
    }
}

impl ClientConfig {
    /// Load from process environment variables.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.api_base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(raw) = lookup("PROGRESS_DEBOUNCE_MS") {
            let millis = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "PROGRESS_DEBOUNCE_MS",
                value: raw.clone(),
            })?;
            config.progress_debounce = Duration::from_millis(millis);
        }

        config.access_token = lookup("ACCESS_TOKEN").filter(|v| !v.trim().is_empty());

        Ok(config)
    }
}

fn default_token_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("hanyu-review").join("access_token"))
}
