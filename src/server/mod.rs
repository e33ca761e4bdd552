//! HTTP servers for both services.
//!
//! The context service faces the user (`/chat`, `/history`, the chat page);
//! the generation service faces the model (`/generate`).

pub mod context_routes;
pub mod generation_routes;

use axum::{http::StatusCode, Json};
use serde_json::Value;

pub use context_routes::{context_router, ContextState};
pub use generation_routes::{generation_router, GenerationState};

/// JSON `{"error": ...}` body paired with its status code.
pub(crate) fn error_body(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Value>) {
    (status, Json(serde_json::json!({ "error": message.into() })))
}
