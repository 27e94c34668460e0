//! Access token lookup.

use std::path::PathBuf;

use crate::config::ClientConfig;

/// Reads the bearer token on every request so a login elsewhere is picked up.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    token: Option<String>,
    path: Option<PathBuf>,
}

impl TokenStore {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            token: config.access_token.clone(),
            path: config.token_path.clone(),
        }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            path: None,
        }
    }

    /// Fixed token first, then the token file.
    pub async fn load(&self) -> Option<String> {
        if let Some(token) = &self.token {
            return Some(token.clone());
        }
        let path = self.path.as_ref()?;
        let content = tokio::fs::read_to_string(path).await.ok()?;
        let token = content.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }
}
