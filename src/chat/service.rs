//! Chat orchestration for the context service.
//!
//! ```text
//! received
//!   → tarot?  yes: raw message is the context
//!             no:  keyword search + context assembly
//!   → dispatched to the generation service
//!   → success: reply returned, exchange persisted (tarot turns are not)
//!   → failure: error surfaced, nothing persisted
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::ChatError;
use crate::client::ReplySource;
use crate::history::{ConversationTurn, HistoryStore};
use crate::prompt::build_context;
use crate::tarot::is_tarot_request;

/// Explicitly constructed chat service, shared by the HTTP handlers.
#[derive(Clone)]
pub struct ChatService {
    store: HistoryStore,
    replies: Arc<dyn ReplySource>,
    history_limit: usize,
}

impl ChatService {
    pub fn new(store: HistoryStore, replies: Arc<dyn ReplySource>, history_limit: usize) -> Self {
        Self {
            store,
            replies,
            history_limit,
        }
    }

    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// The context blob that will be sent for `message`.
    ///
    /// Tarot requests bypass history entirely. Otherwise up to
    /// `history_limit` related turns are found by keyword search and
    /// rendered oldest first.
    pub async fn prepare_context(&self, message: &str) -> Result<String, ChatError> {
        if is_tarot_request(message) {
            return Ok(message.to_string());
        }

        let mut related = self.store.asearch(message, self.history_limit).await?;
        related.reverse();
        debug!(turns = related.len(), "assembled context from history");
        Ok(build_context(message, &related))
    }

    /// Run one chat turn and return Seraphina's reply.
    pub async fn chat(&self, message: &str) -> Result<String, ChatError> {
        let tarot = is_tarot_request(message);
        let context = self.prepare_context(message).await?;

        let reply = self.replies.reply(&context).await?;
        if reply.trim().is_empty() {
            warn!("Generation service returned an empty response");
            return Err(ChatError::EmptyResponse);
        }

        if tarot {
            info!("tarot reading delivered, not recorded in history");
        } else {
            self.store.arecord_exchange(message, &reply).await?;
        }
        Ok(reply)
    }

    /// Stored turns: keyword matches for a non-blank `query`, else everything.
    pub async fn history(&self, query: Option<&str>) -> Result<Vec<ConversationTurn>, ChatError> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => Ok(self.store.asearch(query, self.history_limit).await?),
            None => Ok(self.store.aall().await?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::GenerationClientError;
    use crate::history::Sender;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    struct RecordingReplies {
        prefix: &'static str,
        contexts: Mutex<Vec<String>>,
    }

    impl RecordingReplies {
        fn new(prefix: &'static str) -> Arc<Self> {
            Arc::new(Self {
                prefix,
                contexts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ReplySource for RecordingReplies {
        async fn reply(&self, context: &str) -> Result<String, GenerationClientError> {
            let mut contexts = self.contexts.lock();
            contexts.push(context.to_string());
            Ok(format!("{}reply #{}", self.prefix, contexts.len()))
        }
    }

    struct StatusReplies(u16);

    #[async_trait]
    impl ReplySource for StatusReplies {
        async fn reply(&self, _context: &str) -> Result<String, GenerationClientError> {
            Err(GenerationClientError::Status {
                status: self.0,
                body: "boom".into(),
            })
        }
    }

    struct EmptyReplies;

    #[async_trait]
    impl ReplySource for EmptyReplies {
        async fn reply(&self, _context: &str) -> Result<String, GenerationClientError> {
            Ok(String::new())
        }
    }

    fn service(replies: Arc<dyn ReplySource>) -> ChatService {
        ChatService::new(HistoryStore::open_in_memory().unwrap(), replies, 3)
    }

    #[tokio::test]
    async fn test_chat_records_exchange() {
        let replies = RecordingReplies::new("");
        let chat = service(replies.clone());

        let reply = chat.chat("Hello witch").await.unwrap();
        assert_eq!(reply, "reply #1");

        let all = chat.store().all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!((all[0].sender, all[0].message.as_str()), (Sender::User, "Hello witch"));
        assert_eq!((all[1].sender, all[1].message.as_str()), (Sender::Ai, "reply #1"));
        assert_eq!(replies.contexts.lock()[0], "User: Hello witch\nSeraphina:");
    }

    #[tokio::test]
    async fn test_related_history_is_rendered_oldest_first() {
        let replies = RecordingReplies::new("moon ");
        let chat = service(replies.clone());

        chat.chat("moon one").await.unwrap();
        chat.chat("moon two").await.unwrap();
        chat.chat("moon three").await.unwrap();

        let contexts = replies.contexts.lock();
        assert_eq!(
            contexts[1],
            "User: moon one\n\
             Seraphina: moon reply #1\n\
             User: moon two\n\
             Seraphina:"
        );
        // Four turns match; the three newest are kept and replayed in order.
        assert_eq!(
            contexts[2],
            "Seraphina: moon reply #1\n\
             User: moon two\n\
             Seraphina: moon reply #2\n\
             User: moon three\n\
             Seraphina:"
        );
    }

    #[tokio::test]
    async fn test_failed_generation_persists_nothing() {
        let chat = service(Arc::new(StatusReplies(500)));
        chat.store().append(Sender::User, "earlier").unwrap();

        let result = chat.chat("will this be saved?").await;
        assert!(matches!(
            result,
            Err(ChatError::Generation(GenerationClientError::Status { status: 500, .. }))
        ));
        assert_eq!(chat.store().len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_reply_is_a_failure() {
        let chat = service(Arc::new(EmptyReplies));
        assert!(matches!(
            chat.chat("hello?").await,
            Err(ChatError::EmptyResponse)
        ));
        assert!(chat.store().is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_tarot_bypasses_history() {
        let replies = RecordingReplies::new("");
        let chat = service(replies.clone());
        chat.store().append(Sender::User, "my career worries").unwrap();

        chat.chat("Tell me about my career /tarot").await.unwrap();

        assert_eq!(replies.contexts.lock()[0], "Tell me about my career /tarot");
        assert_eq!(chat.store().len().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_history_query_filters_or_lists_everything() {
        let chat = service(RecordingReplies::new(""));
        chat.chat("crystal ball").await.unwrap();
        chat.chat("broomstick").await.unwrap();

        assert_eq!(chat.history(None).await.unwrap().len(), 4);
        assert_eq!(chat.history(Some("  ")).await.unwrap().len(), 4);

        let hits = chat.history(Some("BROOM")).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].message, "broomstick");
    }
}
