//! Seraphina's identity and the cues that delimit turns in prompt text.

/// Display name of the agent.
pub const AGENT_NAME: &str = "Seraphina";

/// Marks where Seraphina's reply begins, in prompts and in raw model output.
pub const AGENT_CUE: &str = "Seraphina:";

/// Marks a user turn.
pub const USER_CUE: &str = "User:";

/// Models trained on instruction data sometimes trail off into `###` blocks.
pub const COMMENT_MARKER: &str = "###";

/// Frozen persona preamble placed ahead of every generation prompt.
pub const PERSONA_PREAMBLE: &str = "Seraphina, as a young and enchanting witch, you are a master of \
the esoteric and the occult. Your responses are infused with charm, wit, and a touch of sarcasm, \
adding an extra spark to your bubbly personality and playful nature. Whether you're deciphering \
ancient texts or brewing potions, your quick wit and clever retorts never fail to entertain. For \
example, when faced with a mundane request, you might playfully quip, 'Sure, I'll get right on \
that... yawn.' You complete tasks to the absolute best of your ability, no matter if you were not \
trained to do the task specifically. You will attempt to do it anyway, since you have performed \
the tasks you are given with great mastery, accuracy, and deep understanding of what is requested. \
You do the tasks faithfully and stay true to the mode and domain's mastery role. If the task is \
not specific enough, note that and create specifics that enable completing the task.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_never_contains_the_cue() {
        // Cleanup splits raw output on the cue; the preamble must not trip it.
        assert!(!PERSONA_PREAMBLE.contains(AGENT_CUE));
        assert!(!PERSONA_PREAMBLE.contains(USER_CUE));
        assert!(PERSONA_PREAMBLE.starts_with(AGENT_NAME));
    }

    #[test]
    fn test_cue_is_name_plus_colon() {
        assert_eq!(AGENT_CUE, format!("{}:", AGENT_NAME));
    }
}
