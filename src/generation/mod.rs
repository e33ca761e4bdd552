//! The generation side: backends, output cleanup and the persona service.
//!
//! ```text
//! message
//!   → tarot expansion (only when the marker is present)
//!   → persona preamble + context
//!   → TextGenerator backend
//!   → continuation isolated from any echoed prompt
//!   → cleanup
//!   → reply
//! ```

pub mod cleanup;
pub mod error;
pub mod generator;
pub mod service;

pub use cleanup::cleanup_response;
pub use error::GeneratorError;
pub use generator::{CompletionsGenerator, TextGenerator};
pub use service::GenerationService;
