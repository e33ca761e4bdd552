//! Prompt text: Seraphina's persona and conversational context assembly.

pub mod context;
pub mod persona;

pub use context::{build_context, build_generation_prompt, wrap_user_message};
pub use persona::{AGENT_CUE, AGENT_NAME, COMMENT_MARKER, PERSONA_PREAMBLE, USER_CUE};
