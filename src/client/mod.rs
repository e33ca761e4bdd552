//! HTTP client for the generation service, used by the context service.

pub mod error;
pub mod generation_client;

pub use error::GenerationClientError;
pub use generation_client::{GenerateRequest, GenerateResponse, GenerationClient, ReplySource};
