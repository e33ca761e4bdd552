//! Context blob assembly.
//!
//! The context blob is the whole working memory handed to generation: prior
//! turns rendered as transcript lines, then the new user message, then the
//! agent cue. There is no token budget, windowing or deduplication here;
//! callers decide which turns to pass and in what order.

use crate::history::{ConversationTurn, Sender};

use super::persona::{AGENT_CUE, AGENT_NAME, PERSONA_PREAMBLE, USER_CUE};

/// Render `history` in the order given, followed by the new message and cue.
///
/// ```text
/// User: <older user message>
/// Seraphina: <older reply>
/// User: <user_message>
/// Seraphina:
/// ```
pub fn build_context(user_message: &str, history: &[ConversationTurn]) -> String {
    let mut context = String::new();
    for turn in history {
        let speaker = match turn.sender {
            Sender::User => "User",
            Sender::Ai => AGENT_NAME,
        };
        context.push_str(speaker);
        context.push_str(": ");
        context.push_str(&turn.message);
        context.push('\n');
    }
    context.push_str(&wrap_user_message(user_message));
    context
}

/// A single-turn context with no history.
pub fn wrap_user_message(message: &str) -> String {
    format!("{} {}\n{}", USER_CUE, message, AGENT_CUE)
}

/// Place the persona preamble ahead of `input`.
///
/// Input that already ends on the agent cue is a full context blob and is
/// used as-is; anything else is treated as a bare user message and wrapped.
pub fn build_generation_prompt(input: &str) -> String {
    let body = if input.trim_end().ends_with(AGENT_CUE) {
        input.trim_end().to_string()
    } else {
        wrap_user_message(input)
    };
    format!("{}\n{}", PERSONA_PREAMBLE, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn turn(id: i64, sender: Sender, message: &str) -> ConversationTurn {
        ConversationTurn {
            id,
            timestamp: Utc::now(),
            sender,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_build_context_without_history() {
        assert_eq!(
            build_context("Hello?", &[]),
            "User: Hello?\nSeraphina:"
        );
    }

    #[test]
    fn test_build_context_renders_turns_in_order() {
        let history = vec![
            turn(1, Sender::User, "Do you brew potions?"),
            turn(2, Sender::Ai, "Only on Tuesdays."),
        ];
        let context = build_context("Is it Tuesday?", &history);
        assert_eq!(
            context,
            "User: Do you brew potions?\n\
             Seraphina: Only on Tuesdays.\n\
             User: Is it Tuesday?\n\
             Seraphina:"
        );
    }

    #[test]
    fn test_build_context_always_ends_with_message_and_cue() {
        let message = "what now";
        let history: Vec<ConversationTurn> = (0..5)
            .map(|i| {
                let sender = if i % 2 == 0 { Sender::User } else { Sender::Ai };
                turn(i, sender, &format!("turn {}", i))
            })
            .collect();
        for n in 0..=history.len() {
            let context = build_context(message, &history[..n]);
            assert!(context.ends_with("User: what now\nSeraphina:"));
            assert_eq!(context.lines().count(), n + 2);
        }
    }

    #[test]
    fn test_generation_prompt_wraps_bare_messages() {
        let prompt = build_generation_prompt("Read my palm");
        assert!(prompt.starts_with(PERSONA_PREAMBLE));
        assert!(prompt.ends_with("\nUser: Read my palm\nSeraphina:"));
    }

    #[test]
    fn test_generation_prompt_keeps_assembled_context() {
        let context = build_context("hi", &[turn(1, Sender::Ai, "hello")]);
        let prompt = build_generation_prompt(&context);
        assert_eq!(prompt, format!("{}\n{}", PERSONA_PREAMBLE, context));
        assert_eq!(prompt.matches("User: hi").count(), 1);
    }
}
