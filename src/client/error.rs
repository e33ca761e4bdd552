//! Failure modes of a call to the generation service.

use thiserror::Error;

/// Why a generation round trip produced no reply.
#[derive(Debug, Error)]
pub enum GenerationClientError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build generation client: {0}")]
    Client(String),

    /// No answer within the configured timeout.
    #[error("Generation service timed out: {0}")]
    Timeout(String),

    /// Connection refused, DNS failure, reset and the like.
    #[error("Generation service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success status.
    #[error("Generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered 2xx but not with a `{"response": ...}` record.
    #[error("Malformed generation response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for GenerationClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_decode() || error.is_body() {
            Self::Malformed(error.to_string())
        } else {
            Self::Unreachable(error.to_string())
        }
    }
}
