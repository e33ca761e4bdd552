//! Seraphina generation service binary.
//!
//! Exposes `POST /generate` in front of an OpenAI-compatible completions
//! endpoint serving the Seraphina model. See [`seraphina::config`] for the
//! environment variables it reads.
//!
//! # Usage
//!
//! ```bash
//! MODEL_BASE_URL=http://127.0.0.1:8000/v1 cargo run --bin generation-server
//! ```

use std::sync::Arc;

use anyhow::Context;
use seraphina::generation::CompletionsGenerator;
use seraphina::server::{generation_router, GenerationState};
use seraphina::{GenerationConfig, GenerationService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,seraphina=debug".into()),
        )
        .init();

    let config = GenerationConfig::from_env();
    let generator = CompletionsGenerator::new(&config)?;
    tracing::info!(
        "Using model {} at {} (max_new_tokens={}, temperature={})",
        config.model_name,
        config.model_base_url,
        config.max_new_tokens,
        config.temperature
    );

    let service = GenerationService::new(Arc::new(generator));
    let app = generation_router(GenerationState::new(service));

    let bind_addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Seraphina generation service starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health   — liveness probe");
    tracing::info!("  POST /generate — persona reply for a context blob");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
