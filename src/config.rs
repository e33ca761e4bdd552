//! Runtime configuration for both services, read from the environment.
//!
//! # Context service
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `GENERATION_URL` — base URL of the generation service (default: `http://127.0.0.1:5000`)
//! - `GENERATION_TIMEOUT_SECS` — bound on one generation round trip (default: 300)
//! - `CHAT_DB_PATH` — SQLite history file (default: `chat_history.db`)
//! - `HISTORY_LIMIT` — prior turns pulled into context (default: 3)
//!
//! # Generation service
//!
//! - `PORT` — HTTP port (default: 5000)
//! - `MODEL_BASE_URL` — OpenAI-compatible completions API (default: `http://127.0.0.1:8000/v1`)
//! - `MODEL_NAME` — model identifier sent upstream (default: `seraphina`)
//! - `MODEL_API_KEY` — optional bearer token
//! - `MAX_NEW_TOKENS` — generation length cap (default: 1280)
//! - `TEMPERATURE` — sampling temperature (default: 1.5)
//! - `MODEL_TIMEOUT_SECS` — bound on one model call (default: 300)

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Configuration for the context (chat-facing) service.
#[derive(Debug, Clone)]
pub struct ContextConfig {
    pub port: u16,
    /// Base URL of the generation service; `/generate` is appended.
    pub generation_url: String,
    pub generation_timeout: Duration,
    pub database_path: PathBuf,
    /// How many prior turns a keyword search may contribute.
    pub history_limit: usize,
}

impl ContextConfig {
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", 8080),
            generation_url: env::var("GENERATION_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".into()),
            generation_timeout: Duration::from_secs(env_parse("GENERATION_TIMEOUT_SECS", 300)),
            database_path: env::var("CHAT_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("chat_history.db")),
            history_limit: env_parse("HISTORY_LIMIT", 3),
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            generation_url: "http://127.0.0.1:5000".into(),
            generation_timeout: Duration::from_secs(300),
            database_path: PathBuf::from("chat_history.db"),
            history_limit: 3,
        }
    }
}

/// Configuration for the generation (model-facing) service.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub port: u16,
    pub model_base_url: String,
    pub model_name: String,
    pub api_key: Option<String>,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub model_timeout: Duration,
}

impl GenerationConfig {
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", 5000),
            model_base_url: env::var("MODEL_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000/v1".into()),
            model_name: env::var("MODEL_NAME").unwrap_or_else(|_| "seraphina".into()),
            api_key: env::var("MODEL_API_KEY").ok().filter(|key| !key.is_empty()),
            max_new_tokens: env_parse("MAX_NEW_TOKENS", 1280),
            temperature: env_parse("TEMPERATURE", 1.5),
            model_timeout: Duration::from_secs(env_parse("MODEL_TIMEOUT_SECS", 300)),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            model_base_url: "http://127.0.0.1:8000/v1".into(),
            model_name: "seraphina".into(),
            api_key: None,
            max_new_tokens: 1280,
            temperature: 1.5,
            model_timeout: Duration::from_secs(300),
        }
    }
}

/// Read and parse `key`, falling back to `default` when unset or invalid.
fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => parse_or(key, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T>(key: &str, raw: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
        default
    })
}
