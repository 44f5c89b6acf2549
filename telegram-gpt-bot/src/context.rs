//! Context assembly: converts a bounded slice of stored exchanges into the
//! role-tagged message list supplied to the completion call. Read-only.

use std::sync::Arc;

use completion::ChatMessage;
use storage::{Exchange, ExchangeStore, StorageError};

/// Reads up to `limit` recent exchanges for a user and flattens them into
/// chat messages.
pub struct ContextAssembler {
    store: Arc<dyn ExchangeStore>,
    limit: u32,
}

impl ContextAssembler {
    pub fn new(store: Arc<dyn ExchangeStore>, limit: u32) -> Self {
        Self { store, limit }
    }

    /// Returns the user's conversation window as chat messages, oldest first.
    /// A user with no history yields an empty list, not an error.
    pub async fn assemble(&self, user_id: i64) -> Result<Vec<ChatMessage>, StorageError> {
        let exchanges = self.store.recent(user_id, self.limit).await?;
        Ok(to_chat_messages(&exchanges))
    }
}

/// Flattens exchanges (assumed chronological) into role-tagged messages: per
/// exchange a user message for the request, then an assistant message only
/// when a response was recorded.
pub fn to_chat_messages(exchanges: &[Exchange]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(exchanges.len() * 2);
    for exchange in exchanges {
        if !exchange.request_text.is_empty() {
            messages.push(ChatMessage::user(exchange.request_text.as_str()));
        }
        if let Some(response) = exchange.response_text.as_deref() {
            messages.push(ChatMessage::assistant(response));
        }
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use completion::MessageRole;

    fn exchange(id: i64, request: &str, response: Option<&str>) -> Exchange {
        Exchange {
            id,
            user_id: 1,
            request_text: request.to_string(),
            response_text: response.map(|r| r.to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn empty_history_yields_no_messages() {
        assert!(to_chat_messages(&[]).is_empty());
    }

    #[test]
    fn user_fragment_precedes_assistant_fragment() {
        let messages = to_chat_messages(&[exchange(1, "question", Some("answer"))]);

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[0].content, "question");
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, "answer");
    }

    #[test]
    fn missing_response_emits_only_user_fragment() {
        let messages = to_chat_messages(&[
            exchange(1, "first", Some("reply")),
            exchange(2, "unanswered", None),
        ]);

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, MessageRole::User);
        assert_eq!(messages[2].content, "unanswered");
    }

    #[test]
    fn order_is_preserved() {
        let messages = to_chat_messages(&[
            exchange(1, "q1", Some("a1")),
            exchange(2, "q2", Some("a2")),
        ]);

        let contents: Vec<&str> = messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["q1", "a1", "q2", "a2"]);
    }
}
