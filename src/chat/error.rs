//! Chat orchestration errors.

use thiserror::Error;

use crate::client::GenerationClientError;
use crate::history::HistoryError;

/// Why a chat turn failed. A failed turn is never persisted.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The generation round trip failed.
    #[error(transparent)]
    Generation(#[from] GenerationClientError),

    /// The generation service answered with an empty reply.
    #[error("Generation service returned an empty response")]
    EmptyResponse,

    /// History could not be read or written.
    #[error(transparent)]
    History(#[from] HistoryError),
}
