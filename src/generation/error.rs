//! Errors raised by text generation backends.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build model client: {0}")]
    Client(String),

    /// The model endpoint did not answer in time.
    #[error("Model endpoint timed out: {0}")]
    Timeout(String),

    /// The model endpoint could not be reached.
    #[error("Model endpoint unreachable: {0}")]
    Unreachable(String),

    /// The model endpoint answered with a non-success status.
    #[error("Model endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The model endpoint answered with an unexpected body.
    #[error("Malformed model response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for GeneratorError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout(error.to_string())
        } else if error.is_decode() {
            Self::Malformed(error.to_string())
        } else {
            Self::Unreachable(error.to_string())
        }
    }
}
