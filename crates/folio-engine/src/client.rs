//! Chat backends.
//!
//! [`ChatBackend`] is the seam between the widget and whatever answers the
//! questions. [`HttpBackend`] posts JSON to the configured endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::chat::{ChatRequest, ChatResponse, RequestFailure};
use crate::config::{ChatConfig, ConfigError};

/// Something that can answer a chat request.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one request and wait for its answer.
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse, RequestFailure>;
}

/// Result of a backend health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// Whether the backend reported itself healthy.
    #[serde(default)]
    pub ok: bool,
}

/// Backend reached over HTTP.
///
/// No request timeout is configured; reqwest's connection defaults apply.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpBackend {
    /// Create a backend for the configured endpoint.
    pub fn new(config: &ChatConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The chat endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The health endpoint, a sibling of the chat path (`/chat` -> `/health`).
    /// A trailing slash on the endpoint (`/chat/`) does not change the result.
    pub fn health_url(&self) -> Result<Url, RequestFailure> {
        let mut chat = self.endpoint.clone();
        if let Ok(mut segments) = chat.path_segments_mut() {
            segments.pop_if_empty();
        }
        chat.join("health").map_err(|e| RequestFailure::Network(e.to_string()))
    }

    /// Probe the backend's health endpoint.
    pub async fn health(&self) -> Result<HealthStatus, RequestFailure> {
        let url = self.health_url()?;
        debug!(url = %url, "probing backend health");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RequestFailure::Network(e.to_string()))?;
        let text = read_success_body(response).await?;
        serde_json::from_str(&text).map_err(|e| RequestFailure::Decode(e.to_string()))
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send(&self, request: ChatRequest) -> Result<ChatResponse, RequestFailure> {
        debug!(
            endpoint = %self.endpoint,
            history = request.history.len(),
            "posting chat request"
        );
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| RequestFailure::Network(e.to_string()))?;
        let text = read_success_body(response).await?;
        serde_json::from_str(&text).map_err(|e| RequestFailure::Decode(e.to_string()))
    }
}

/// Read the body of a response, turning non-2xx statuses into failures.
async fn read_success_body(response: reqwest::Response) -> Result<String, RequestFailure> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| RequestFailure::Network(e.to_string()))?;
    if !status.is_success() {
        return Err(RequestFailure::Status {
            status: status.as_u16(),
            body: text,
        });
    }
    Ok(text)
}
