//! Client for `POST /generate` on the generation service.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::GenerationClientError;

/// Body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The context blob (or raw tarot request). Missing means empty.
    #[serde(default)]
    pub message: String,
    /// Accepted in any shape and ignored; the context blob already carries
    /// whatever history is relevant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Value>,
}

impl GenerateRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Some(Value::Array(Vec::new())),
        }
    }
}

/// Successful body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// Anything that can turn a context blob into a reply.
#[async_trait]
pub trait ReplySource: Send + Sync {
    async fn reply(&self, context: &str) -> Result<String, GenerationClientError>;
}

/// HTTP client for a remote generation service.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    endpoint: String,
}

impl GenerationClient {
    /// Client for the service at `base_url`, bounding each call by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GenerationClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationClientError::Client(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: format!("{}/generate", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one context blob and return the generated reply.
    pub async fn generate(&self, context: &str) -> Result<String, GenerationClientError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&GenerateRequest::new(context))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(GenerationClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| GenerationClientError::Malformed(format!("{}: {}", e, body)))?;
        Ok(parsed.response)
    }
}

#[async_trait]
impl ReplySource for GenerationClient {
    async fn reply(&self, context: &str) -> Result<String, GenerationClientError> {
        self.generate(context).await
    }
}
