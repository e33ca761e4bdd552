//! Axum route handlers for the generation service.
//!
//! # Routes
//!
//! - `GET  /health`   — Returns `{"status": "ok", "version": ..., "service": "generation"}`
//! - `POST /generate` — Accepts `{"message", "history"}`, returns `{"response"}`

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::error_body;
use crate::client::{GenerateRequest, GenerateResponse};
use crate::generation::GenerationService;

/// Shared application state for the generation service.
#[derive(Clone)]
pub struct GenerationState {
    pub service: GenerationService,
}

impl GenerationState {
    pub fn new(service: GenerationService) -> Self {
        Self { service }
    }
}

/// Build the generation service router.
pub fn generation_router(state: GenerationState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/generate", post(generate_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "generation",
    }))
}

/// POST /generate — produce Seraphina's reply for a context blob.
///
/// `history` is accepted and ignored.
async fn generate_handler(
    State(state): State<GenerationState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<Value>)> {
    let response = state.service.respond(&request.message).await.map_err(|e| {
        tracing::error!(error = %e, "generation failed");
        error_body(StatusCode::BAD_GATEWAY, format!("Generation failed: {}", e))
    })?;
    Ok(Json(GenerateResponse { response }))
}
