//! SQLite storage for conversation turns.
//!
//! One append-only table, `chat_history`. Timestamps are stored as fixed-width
//! RFC 3339 UTC strings so lexical order matches chronological order.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use parking_lot::Mutex;
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, Row};

use super::error::HistoryError;
use super::turn::{ConversationTurn, Sender};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS chat_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp TEXT NOT NULL,
    sender TEXT NOT NULL,
    message TEXT NOT NULL
)";

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS chat_history_timestamp ON chat_history (timestamp)";

/// Handle to the conversation history database.
///
/// Cloning is cheap; clones share one connection. All access is serialized
/// through the connection mutex, which is SQLite's single-writer model anyway.
#[derive(Clone)]
pub struct HistoryStore {
    conn: Arc<Mutex<Connection>>,
    /// Path to the database file, `None` for in-memory stores.
    pub db_path: Option<PathBuf>,
}

impl HistoryStore {
    /// Open (or create) the history database at `db_path`.
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, HistoryError> {
        let db_path = db_path.as_ref().to_path_buf();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(&db_path).map_err(|e| {
            log::error!(
                "HISTORY ERROR: could not open database {}: {}",
                db_path.display(),
                e
            );
            e
        })?;
        Self::initialize(conn, Some(db_path))
    }

    /// Open a private in-memory database. Contents vanish on drop.
    pub fn open_in_memory() -> Result<Self, HistoryError> {
        Self::initialize(Connection::open_in_memory()?, None)
    }

    fn initialize(conn: Connection, db_path: Option<PathBuf>) -> Result<Self, HistoryError> {
        conn.execute(CREATE_TABLE, [])?;
        conn.execute(CREATE_INDEX, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path,
        })
    }

    /// Append a turn stamped with the current time.
    pub fn append(&self, sender: Sender, message: &str) -> Result<ConversationTurn, HistoryError> {
        self.append_at(sender, message, Utc::now())
    }

    /// Append a turn with an explicit timestamp.
    pub fn append_at(
        &self,
        sender: Sender,
        message: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<ConversationTurn, HistoryError> {
        let conn = self.conn.lock();
        Ok(insert_turn(&conn, sender, message, timestamp)?)
    }

    /// Record a full exchange: the user's turn followed by Seraphina's reply.
    ///
    /// Both rows are written in one transaction.
    pub fn record_exchange(
        &self,
        user_message: &str,
        ai_message: &str,
    ) -> Result<(ConversationTurn, ConversationTurn), HistoryError> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let now = Utc::now();
        let user_turn = insert_turn(&tx, Sender::User, user_message, now)?;
        let ai_turn = insert_turn(&tx, Sender::Ai, ai_message, now)?;
        tx.commit()?;
        log::debug!(
            "recorded exchange as turns {} and {}",
            user_turn.id,
            ai_turn.id
        );
        Ok((user_turn, ai_turn))
    }

    /// Keyword search over stored messages.
    ///
    /// Returns up to `limit` turns whose message contains at least one
    /// whitespace-delimited token of `input`, newest first. Matching is a
    /// case-insensitive substring test (ASCII case folding, as SQLite's
    /// `LIKE` does). Each row appears at most once no matter how many
    /// keywords it matches.
    pub fn search(&self, input: &str, limit: usize) -> Result<Vec<ConversationTurn>, HistoryError> {
        let patterns: Vec<String> = input
            .split_whitespace()
            .map(|keyword| format!("%{}%", escape_like(keyword)))
            .collect();
        if patterns.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        // SQLite integers are i64; anything larger means "no limit".
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let predicates = (1..=patterns.len())
            .map(|i| format!("message LIKE ?{} ESCAPE '\\'", i))
            .collect::<Vec<_>>()
            .join(" OR ");
        let sql = format!(
            "SELECT id, timestamp, sender, message
             FROM chat_history
             WHERE {}
             ORDER BY timestamp DESC, id DESC
             LIMIT {}",
            predicates, limit
        );

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(patterns.iter()), row_to_turn)?;
        let turns = rows.collect::<Result<Vec<_>, _>>()?;
        log::debug!("history search for {:?} matched {} turns", input, turns.len());
        Ok(turns)
    }

    /// The whole history in insertion order.
    pub fn all(&self) -> Result<Vec<ConversationTurn>, HistoryError> {
        let conn = self.conn.lock();
        let mut stmt =
            conn.prepare("SELECT id, timestamp, sender, message FROM chat_history ORDER BY id ASC")?;
        let rows = stmt.query_map([], row_to_turn)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Number of stored turns.
    pub fn len(&self) -> Result<usize, HistoryError> {
        let conn = self.conn.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM chat_history", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Whether no turns have been recorded yet.
    pub fn is_empty(&self) -> Result<bool, HistoryError> {
        Ok(self.len()? == 0)
    }

    /// [`search`](Self::search) on the blocking pool.
    pub async fn asearch(
        &self,
        input: &str,
        limit: usize,
    ) -> Result<Vec<ConversationTurn>, HistoryError> {
        let store = self.clone();
        let input = input.to_string();
        tokio::task::spawn_blocking(move || store.search(&input, limit)).await?
    }

    /// [`record_exchange`](Self::record_exchange) on the blocking pool.
    pub async fn arecord_exchange(
        &self,
        user_message: &str,
        ai_message: &str,
    ) -> Result<(ConversationTurn, ConversationTurn), HistoryError> {
        let store = self.clone();
        let user_message = user_message.to_string();
        let ai_message = ai_message.to_string();
        tokio::task::spawn_blocking(move || store.record_exchange(&user_message, &ai_message))
            .await?
    }

    /// [`all`](Self::all) on the blocking pool.
    pub async fn aall(&self) -> Result<Vec<ConversationTurn>, HistoryError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.all()).await?
    }
}

fn insert_turn(
    conn: &Connection,
    sender: Sender,
    message: &str,
    timestamp: DateTime<Utc>,
) -> rusqlite::Result<ConversationTurn> {
    // Stored at microsecond precision; keep the returned record identical.
    let timestamp = timestamp.trunc_subsecs(6);
    conn.execute(
        "INSERT INTO chat_history (timestamp, sender, message) VALUES (?1, ?2, ?3)",
        params![format_timestamp(&timestamp), sender.as_str(), message],
    )?;
    Ok(ConversationTurn {
        id: conn.last_insert_rowid(),
        timestamp,
        sender,
        message: message.to_string(),
    })
}

fn row_to_turn(row: &Row<'_>) -> rusqlite::Result<ConversationTurn> {
    let raw_timestamp: String = row.get(1)?;
    let timestamp = DateTime::parse_from_rfc3339(&raw_timestamp)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    let raw_sender: String = row.get(2)?;
    let sender = raw_sender
        .parse::<Sender>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, e.into()))?;

    Ok(ConversationTurn {
        id: row.get(0)?,
        timestamp,
        sender,
        message: row.get(3)?,
    })
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Escape `LIKE` wildcards so keywords match literally.
fn escape_like(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn seeded_store() -> HistoryStore {
        let store = HistoryStore::open_in_memory().unwrap();
        let base = Utc::now() - Duration::hours(1);
        let messages = [
            (Sender::User, "I love my cat"),
            (Sender::Ai, "Cats are wonderful familiars"),
            (Sender::User, "What about the weather today?"),
            (Sender::Ai, "Cloudy with a chance of potions"),
            (Sender::User, "My CAREER is stalling"),
        ];
        for (i, (sender, message)) in messages.iter().enumerate() {
            store
                .append_at(*sender, message, base + Duration::minutes(i as i64))
                .unwrap();
        }
        store
    }

    #[test]
    fn test_search_matches_any_keyword_case_insensitively() {
        let store = seeded_store();
        let results = store.search("cat career", 10).unwrap();
        let messages: Vec<&str> = results.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "My CAREER is stalling",
                "Cats are wonderful familiars",
                "I love my cat",
            ]
        );
    }

    #[test]
    fn test_search_respects_limit_and_recency() {
        let store = seeded_store();
        let results = store.search("a", 2).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].timestamp >= results[1].timestamp);
        assert_eq!(results[0].message, "My CAREER is stalling");
    }

    #[test]
    fn test_search_accepts_limits_beyond_sqlite_integers() {
        let store = seeded_store();
        let results = store.search("cat", usize::MAX).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_search_without_matches_is_empty() {
        let store = seeded_store();
        assert!(store.search("dragon", 3).unwrap().is_empty());
        assert!(store.search("   ", 3).unwrap().is_empty());
        assert!(store.search("cat", 0).unwrap().is_empty());
    }

    #[test]
    fn test_search_does_not_duplicate_rows_matching_several_keywords() {
        let store = seeded_store();
        let results = store.search("love cat my", 10).unwrap();
        let ids: Vec<i64> = results.iter().map(|t| t.id).collect();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_search_treats_wildcards_literally() {
        let store = HistoryStore::open_in_memory().unwrap();
        store.append(Sender::User, "100% sure").unwrap();
        store.append(Sender::User, "nothing special").unwrap();
        let results = store.search("%", 5).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].message, "100% sure");
        assert!(store.search("_", 5).unwrap().is_empty());
    }

    #[test]
    fn test_equal_timestamps_fall_back_to_insertion_order() {
        let store = HistoryStore::open_in_memory().unwrap();
        store.record_exchange("hello moon", "hello mortal").unwrap();
        let results = store.search("hello", 5).unwrap();
        assert_eq!(results[0].sender, Sender::Ai);
        assert_eq!(results[1].sender, Sender::User);
    }

    #[test]
    fn test_record_exchange_appends_user_then_ai() {
        let store = HistoryStore::open_in_memory().unwrap();
        let (user, ai) = store.record_exchange("hi", "well met").unwrap();
        assert!(ai.id > user.id);

        let all = store.all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].sender, Sender::User);
        assert_eq!(all[0].message, "hi");
        assert_eq!(all[1].sender, Sender::Ai);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn test_history_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chat_history.db");
        {
            let store = HistoryStore::open(&path).unwrap();
            store.append(Sender::User, "remember me").unwrap();
        }
        let store = HistoryStore::open(&path).unwrap();
        let all = store.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].message, "remember me");
    }

    #[tokio::test]
    async fn test_async_wrappers() {
        let store = HistoryStore::open_in_memory().unwrap();
        store.arecord_exchange("tea leaves", "they say rain").await.unwrap();
        assert_eq!(store.asearch("TEA", 3).await.unwrap().len(), 1);
        assert_eq!(store.aall().await.unwrap().len(), 2);
    }
}
