//! Tarot readings.
//!
//! A message such as `"Tell me about my career /tarot"` asks for a reading.
//! Three distinct cards are drawn, each upright or inverted with even odds,
//! and the request is rewritten into a prompt that asks Seraphina to
//! interpret every card against the topic written before the marker.

pub mod deck;

use std::fmt;

use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use deck::DECK;

/// Marker that switches a message onto the tarot path.
pub const TAROT_MARKER: &str = "/tarot";

/// Cards drawn per reading.
pub const CARDS_PER_READING: usize = 3;

static TOPIC_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.*) /tarot").unwrap());

/// Which way up a card landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Upright,
    Inverted,
}

impl Orientation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Upright => "upright",
            Self::Inverted => "inverted",
        }
    }
}

/// One drawn card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TarotCard {
    pub name: &'static str,
    pub orientation: Orientation,
}

impl fmt::Display for TarotCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.orientation.label())
    }
}

/// Whether `text` carries the tarot marker anywhere.
pub fn is_tarot_request(text: &str) -> bool {
    text.contains(TAROT_MARKER)
}

/// Draw three distinct cards without replacement.
pub fn draw_cards<R: Rng + ?Sized>(rng: &mut R) -> [TarotCard; CARDS_PER_READING] {
    let names: Vec<&'static str> = DECK
        .choose_multiple(rng, CARDS_PER_READING)
        .copied()
        .collect();
    std::array::from_fn(|i| TarotCard {
        name: names[i],
        orientation: if rng.gen_bool(0.5) {
            Orientation::Upright
        } else {
            Orientation::Inverted
        },
    })
}

/// The question asked before `" /tarot"`, trimmed.
///
/// Returns `None` when the text has no `"<topic> /tarot"` shape, e.g. when
/// the marker is the first thing on its line.
pub fn extract_topic(text: &str) -> Option<String> {
    TOPIC_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|topic| topic.as_str().trim().to_string())
}

/// Render the reading prompt for `topic` and the drawn cards.
pub fn reading_prompt(topic: &str, cards: &[TarotCard]) -> String {
    let cards_description = cards
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "You are giving a tarot reading about {topic}. Here are the cards drawn: {cards_description}. \
         Please explain the meaning of each of the three cards in direct relation to my question about {topic}. \
         Provide a detailed interpretation of how each card connects to {topic} and conclude with an overall \
         decision on {topic}. Make sure your answer is specific and tailored to {topic}."
    )
}

/// Rewrite a tarot request into a reading prompt.
///
/// Text without the marker, or whose topic cannot be extracted, is returned
/// unchanged.
pub fn expand_request<R: Rng + ?Sized>(text: &str, rng: &mut R) -> String {
    if !is_tarot_request(text) {
        return text.to_string();
    }
    match extract_topic(text) {
        Some(topic) => {
            let cards = draw_cards(rng);
            tracing::debug!(
                topic = %topic,
                cards = ?cards.iter().map(ToString::to_string).collect::<Vec<_>>(),
                "drew tarot cards"
            );
            reading_prompt(&topic, &cards)
        }
        None => {
            tracing::debug!("tarot marker without a topic, passing message through");
            text.to_string()
        }
    }
}
