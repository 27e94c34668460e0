//! HTTP client for the lesson backend.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use review_core::lesson::normalize_lesson_id;
use review_core::types::ProgressEvent;

use crate::auth::TokenStore;
use crate::config::ClientConfig;
use crate::progress::ProgressSink;

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not authenticated - please log in first")]
    NotAuthenticated,
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Where the user left off, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumePoint {
    pub lesson_id: i64,
    pub hsk_level: Option<u32>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResumeResponse {
    lesson_id: Value,
    #[serde(default)]
    hsk_level: Option<u32>,
    #[serde(default)]
    title: Option<String>,
}

struct LessonApiInner {
    client: Client,
    base_url: String,
    tokens: TokenStore,
}

/// Client for the lesson, tracking and resume endpoints.
///
/// Clone-able; clones share one connection pool.
#[derive(Clone)]
pub struct LessonApi {
    inner: Arc<LessonApiInner>,
}

impl LessonApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_tokens(&config.api_base_url, TokenStore::from_config(config))
    }

    pub fn with_tokens(base_url: &str, tokens: TokenStore) -> Self {
        Self {
            inner: Arc::new(LessonApiInner {
                client: Client::new(),
                base_url: base_url.trim_end_matches('/').to_string(),
                tokens,
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Fetch the raw lesson body. Sent with the token when one is stored.
    pub async fn fetch_lesson(&self, lesson_id: i64) -> Result<Value> {
        let url = format!("{}/api/lessons/{}", self.inner.base_url, lesson_id);
        let request = self.authorize(self.inner.client.get(&url)).await;

        let resp = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = error_for_status(resp).await?;

        resp.json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Post one progress record.
    pub async fn track_progress(&self, event: &ProgressEvent) -> Result<()> {
        let token = self.inner.tokens.load().await.ok_or(ApiError::NotAuthenticated)?;
        let url = format!("{}/api/v1/learning/track", self.inner.base_url);

        let resp = self
            .inner
            .client
            .post(&url)
            .bearer_auth(token)
            .json(event)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        error_for_status(resp).await?;

        Ok(())
    }

    /// Ask the backend which lesson to continue with.
    pub async fn resume(&self) -> Result<ResumePoint> {
        let token = self.inner.tokens.load().await.ok_or(ApiError::NotAuthenticated)?;
        let url = format!("{}/api/v1/learning/resume", self.inner.base_url);

        let resp = self
            .inner
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = error_for_status(resp).await?;

        let body: ResumeResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        let lesson_id = normalize_lesson_id(&body.lesson_id)
            .ok_or_else(|| ApiError::Parse(format!("invalid lesson id {}", body.lesson_id)))?;

        Ok(ResumePoint {
            lesson_id,
            hsk_level: body.hsk_level,
            title: body.title,
        })
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.inner.tokens.load().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

impl ProgressSink for LessonApi {
    /// Fire-and-forget: failures are logged, never retried.
    async fn track(&self, event: ProgressEvent) {
        match self.track_progress(&event).await {
            Ok(()) => debug!(item_id = event.item_id, "progress tracked"),
            Err(ApiError::NotAuthenticated) => {
                debug!(item_id = event.item_id, "no access token, progress not tracked")
            }
            Err(e @ ApiError::Backend { .. }) => {
                warn!(item_id = event.item_id, error = %e, "progress tracking rejected")
            }
            Err(e) => error!(item_id = event.item_id, error = %e, "failed to track progress"),
        }
    }
}

/// Turn a non-success response into `ApiError::Backend`.
///
/// The backend reports failures as `{"detail": "..."}`; that text is used as
/// the message when present.
async fn error_for_status(resp: Response) -> Result<Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }

    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(body);

    Err(ApiError::Backend { status, message })
}
