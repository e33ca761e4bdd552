//! Axum route handlers for the context service.
//!
//! # Routes
//!
//! - `GET  /`        — Chat page
//! - `GET  /health`  — Returns `{"status": "ok", "version": ..., "service": "context"}`
//! - `POST /chat`    — Form field `message`, returns `{"response": ...}`
//! - `GET  /history` — Optional `query`, returns `[{timestamp, sender, message}]`

use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::error_body;
use crate::chat::ChatService;
use crate::history::HistoryEntry;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Message shown to callers whenever a chat turn fails.
pub const CHAT_FAILURE_MESSAGE: &str = "Failed to get a response from the server";

/// Shared application state for the context service.
#[derive(Clone)]
pub struct ContextState {
    pub chat: ChatService,
}

impl ContextState {
    pub fn new(chat: ChatService) -> Self {
        Self { chat }
    }
}

/// `POST /chat` form body.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub message: String,
}

/// `POST /chat` success body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// `GET /history` query string.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub query: Option<String>,
}

/// Build the context service router.
pub fn context_router(state: ContextState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route("/history", get(history_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET / — the chat page.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health — liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
        "service": "context",
    }))
}

/// POST /chat — run one chat turn.
///
/// A missing `message` field is a 400. Any failure past that point is a
/// 500 with a generic error; details go to the log only.
async fn chat_handler(
    State(state): State<ContextState>,
    form: Result<Form<ChatForm>, FormRejection>,
) -> Result<Json<ChatReply>, (StatusCode, Json<Value>)> {
    let Form(form) = form.map_err(|rejection| {
        error_body(
            StatusCode::BAD_REQUEST,
            format!("Missing 'message' field: {}", rejection.body_text()),
        )
    })?;

    match state.chat.chat(&form.message).await {
        Ok(response) => Ok(Json(ChatReply { response })),
        Err(e) => {
            tracing::error!(error = %e, "chat turn failed");
            Err(error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                CHAT_FAILURE_MESSAGE,
            ))
        }
    }
}

/// GET /history — keyword-filtered or full history.
async fn history_handler(
    State(state): State<ContextState>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntry>>, (StatusCode, Json<Value>)> {
    let turns = state
        .chat
        .history(params.query.as_deref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "history lookup failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read history")
        })?;
    Ok(Json(turns.into_iter().map(HistoryEntry::from).collect()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
