//! Conversation turn records.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The human on the other side of the chat.
    User,
    /// Seraphina.
    Ai,
}

impl Sender {
    /// The value stored in the `sender` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "ai",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "ai" => Ok(Self::Ai),
            other => Err(format!("unknown sender '{}'", other)),
        }
    }
}

/// One stored message from either side of the conversation.
///
/// Turns are append-only; once written they are never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Auto-assigned row identifier.
    pub id: i64,
    /// UTC time the turn was recorded.
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
    pub message: String,
}

/// Wire shape of a turn on `GET /history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
    pub message: String,
}

impl From<ConversationTurn> for HistoryEntry {
    fn from(turn: ConversationTurn) -> Self {
        Self {
            timestamp: turn.timestamp,
            sender: turn.sender,
            message: turn.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_round_trips_through_column_value() {
        for sender in [Sender::User, Sender::Ai] {
            assert_eq!(sender.as_str().parse::<Sender>().unwrap(), sender);
        }
        assert!("assistant".parse::<Sender>().is_err());
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Ai).unwrap(), "\"ai\"");
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
    }
}
