//! # Seraphina
//!
//! A personal chatbot built from two loosely coupled HTTP services.
//!
//! The **context service** stores every exchange in SQLite, pulls related
//! prior turns back out by keyword search, and forwards the assembled
//! context to the **generation service**. The generation service wraps the
//! context in Seraphina's persona, expands `/tarot` requests into a
//! three-card reading prompt, runs a language model backend and returns the
//! cleaned continuation.

pub mod chat;
pub mod client;
pub mod config;
pub mod generation;
pub mod history;
pub mod prompt;
pub mod server;
pub mod tarot;

pub use chat::ChatService;
pub use client::GenerationClient;
pub use config::{ContextConfig, GenerationConfig};
pub use generation::GenerationService;
pub use history::{ConversationTurn, HistoryStore, Sender};

/// Crate version reported by the health endpoints.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
