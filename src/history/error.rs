//! Error types for the conversation history store.

use thiserror::Error;

/// Errors raised while reading or writing conversation history.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The SQLite layer rejected an operation.
    #[error("History database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The database file's parent directory could not be created.
    #[error("History database path error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking store task panicked or was cancelled.
    #[error("History task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
