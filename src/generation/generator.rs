//! Text generation backends.
//!
//! The language model itself is not hosted in-process. `CompletionsGenerator`
//! talks to any server exposing the OpenAI-compatible `/completions` API,
//! which is how an inference server serves the fine-tuned Seraphina weights.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::GeneratorError;
use crate::config::GenerationConfig;

/// Something that continues a prompt.
///
/// The returned text may be the continuation alone or the prompt echoed
/// back with the continuation appended; callers must cope with both.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

/// Backend for OpenAI-compatible completion endpoints.
pub struct CompletionsGenerator {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    max_new_tokens: u32,
    temperature: f32,
}

impl CompletionsGenerator {
    pub fn new(config: &GenerationConfig) -> Result<Self, GeneratorError> {
        let http = reqwest::Client::builder()
            .timeout(config.model_timeout)
            .build()
            .map_err(|e| GeneratorError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.model_base_url.trim_end_matches('/').to_string(),
            model: config.model_name.clone(),
            api_key: config.api_key.clone(),
            max_new_tokens: config.max_new_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl TextGenerator for CompletionsGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        let body = CompletionRequest {
            model: &self.model,
            prompt,
            max_tokens: self.max_new_tokens,
            temperature: self.temperature,
        };

        let mut request = self
            .http
            .post(format!("{}/completions", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(GeneratorError::Status { status, body });
        }

        let completion: CompletionResponse = resp.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(|| GeneratorError::Malformed("no choices in completion".into()))
    }
}
