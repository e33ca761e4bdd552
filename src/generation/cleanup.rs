//! Raw model output cleanup.

use crate::prompt::{AGENT_CUE, COMMENT_MARKER, USER_CUE};

/// Pull Seraphina's reply out of raw generated text.
///
/// Takes the text after the first agent cue up to the next cue, cuts it at
/// the next `User:` marker, and drops a trailing `###` block. Without any
/// cue the whole text is kept; the result is always trimmed.
pub fn cleanup_response(raw: &str) -> String {
    let reply = match raw.split_once(AGENT_CUE) {
        Some((_, after)) => before(before(after, AGENT_CUE), USER_CUE),
        None => raw,
    };
    before(reply, COMMENT_MARKER).trim().to_string()
}

fn before<'a>(text: &'a str, marker: &str) -> &'a str {
    text.split_once(marker).map_or(text, |(head, _)| head)
}
