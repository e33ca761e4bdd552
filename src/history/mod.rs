//! Conversation history: turn records and the SQLite-backed store.
//!
//! The store is append-only. Its only reader on the chat path is context
//! assembly, which asks for a bounded, keyword-filtered, newest-first slice.

pub mod error;
pub mod sqlite_store;
pub mod turn;

pub use error::HistoryError;
pub use sqlite_store::HistoryStore;
pub use turn::{ConversationTurn, HistoryEntry, Sender};
