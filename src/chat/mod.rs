//! Chat module — the context service's side of a conversation.
//!
//! ```text
//! User message
//!   → tarot request? pass it straight through
//!   → otherwise keyword-search history and assemble the context blob
//!   → POST to the generation service
//!   → persist the exchange and return the reply
//! ```

pub mod error;
pub mod service;

pub use error::ChatError;
pub use service::ChatService;
