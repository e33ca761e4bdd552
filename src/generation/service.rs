//! The Seraphina generation service.

use std::sync::Arc;

use tracing::{debug, info};

use super::cleanup::cleanup_response;
use super::error::GeneratorError;
use super::generator::TextGenerator;
use crate::prompt::{build_generation_prompt, AGENT_CUE, PERSONA_PREAMBLE};
use crate::tarot;

/// Turns an incoming context blob into Seraphina's cleaned reply.
#[derive(Clone)]
pub struct GenerationService {
    generator: Arc<dyn TextGenerator>,
}

impl GenerationService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Produce a reply for `message`.
    ///
    /// Tarot requests are expanded into a reading prompt first. The message
    /// is then placed under the persona preamble, run through the backend,
    /// and the continuation is cleaned.
    pub async fn respond(&self, message: &str) -> Result<String, GeneratorError> {
        let input = tarot::expand_request(message, &mut rand::thread_rng());
        let prompt = build_generation_prompt(&input);

        let raw = self.generator.generate(&prompt).await?;
        debug!(raw = %raw, "raw generated response");

        let reply = cleanup_response(&anchor_continuation(&raw, &prompt));
        info!(chars = reply.len(), "generated response");
        Ok(reply)
    }
}

/// Rebuild raw output so the first agent cue is the one that opens the reply.
///
/// Prompts end on the cue, so an exact echo is stripped and the cue put back
/// in front of the continuation. Output that is the continuation alone gets
/// the cue prepended unless it already opens with one. Output that echoes
/// the prompt inexactly is left alone.
fn anchor_continuation(raw: &str, prompt: &str) -> String {
    match raw.strip_prefix(prompt) {
        Some(continuation) => format!("{}{}", AGENT_CUE, continuation),
        None if raw.starts_with(PERSONA_PREAMBLE) => raw.to_string(),
        None if raw.trim_start().starts_with(AGENT_CUE) => raw.to_string(),
        None => format!("{}{}", AGENT_CUE, raw),
    }
}
