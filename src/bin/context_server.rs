//! Seraphina context service binary.
//!
//! Serves the chat page, `POST /chat` and `GET /history`, storing the
//! conversation in SQLite and forwarding context to the generation service.
//! See [`seraphina::config`] for the environment variables it reads.
//!
//! # Usage
//!
//! ```bash
//! GENERATION_URL=http://gpu-box:5000 cargo run --bin context-server
//! ```

use std::sync::Arc;

use anyhow::Context;
use seraphina::server::{context_router, ContextState};
use seraphina::{ChatService, ContextConfig, GenerationClient, HistoryStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,seraphina=debug".into()),
        )
        .init();

    let config = ContextConfig::from_env();

    let store = HistoryStore::open(&config.database_path).with_context(|| {
        format!(
            "Failed to open history database {}",
            config.database_path.display()
        )
    })?;
    let client = GenerationClient::new(&config.generation_url, config.generation_timeout)?;
    tracing::info!("Forwarding generation requests to {}", client.endpoint());

    let chat = ChatService::new(store, Arc::new(client), config.history_limit);
    let app = context_router(ContextState::new(chat));

    let bind_addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Seraphina context service starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /        — chat page");
    tracing::info!("  GET  /health  — liveness probe");
    tracing::info!("  POST /chat    — send a message");
    tracing::info!("  GET  /history — stored turns, optional ?query=");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
