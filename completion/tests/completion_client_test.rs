//! Integration tests for [`completion::CompletionClient`].
//!
//! Uses a scripted [`ChatApi`] fake that records every attempted model and
//! the submitted message list.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use completion::{ChatApi, ChatMessage, CompletionClient, MessageRole};

/// Fake API: fails for the models in `failing`, replies with `reply`
/// otherwise, and records every attempt.
struct ScriptedApi {
    failing: HashSet<String>,
    reply: String,
    attempted_models: Mutex<Vec<String>>,
    submitted: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedApi {
    fn new(reply: &str, failing: &[&str]) -> Self {
        Self {
            failing: failing.iter().map(|m| m.to_string()).collect(),
            reply: reply.to_string(),
            attempted_models: Mutex::new(Vec::new()),
            submitted: Mutex::new(Vec::new()),
        }
    }

    fn attempts(&self) -> Vec<String> {
        self.attempted_models.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatApi for ScriptedApi {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> anyhow::Result<String> {
        self.attempted_models.lock().unwrap().push(model.to_string());
        self.submitted.lock().unwrap().push(messages.to_vec());
        if self.failing.contains(model) {
            anyhow::bail!("model {} unavailable", model);
        }
        Ok(self.reply.clone())
    }
}

/// **Test: Primary failure falls back, and the fallback becomes preferred.**
///
/// **Setup:** API fails for "gpt-3.5-turbo", succeeds otherwise; client with
/// primary "gpt-3.5-turbo" and fallback "gpt-4o-mini".
/// **Action:** `generate` twice.
/// **Expected:** First call attempts primary then fallback and returns the
/// fallback's reply; second call attempts only the fallback.
#[tokio::test]
async fn test_fallback_on_primary_failure_updates_preference() {
    let api = Arc::new(ScriptedApi::new("fallback says hi", &["gpt-3.5-turbo"]));
    let client = CompletionClient::new(api.clone(), "gpt-3.5-turbo")
        .with_fallback("gpt-4o-mini");

    let reply = client.generate("hello", &[]).await.expect("should fall back");
    assert_eq!(reply, "fallback says hi");
    assert_eq!(client.preferred_model().await, "gpt-4o-mini");

    client.generate("hello again", &[]).await.expect("should succeed");
    assert_eq!(
        api.attempts(),
        vec!["gpt-3.5-turbo", "gpt-4o-mini", "gpt-4o-mini"]
    );
}

/// **Test: Identical primary and fallback yields exactly one attempt.**
///
/// **Setup:** API fails for every model; primary == fallback.
/// **Action:** `generate`.
/// **Expected:** Error, and exactly one recorded attempt.
#[tokio::test]
async fn test_identical_models_single_attempt() {
    let api = Arc::new(ScriptedApi::new("", &["gpt-4o-mini"]));
    let client = CompletionClient::new(api.clone(), "gpt-4o-mini")
        .with_fallback("gpt-4o-mini");

    let result = client.generate("hello", &[]).await;
    assert!(result.is_err());
    assert_eq!(api.attempts(), vec!["gpt-4o-mini"]);
}

/// **Test: All attempts failing surfaces the last underlying error.**
///
/// **Setup:** API fails for both configured models.
/// **Action:** `generate`.
/// **Expected:** `CompletionError::AllModelsFailed` whose text names the
/// fallback (the last model tried).
#[tokio::test]
async fn test_all_models_failed_carries_last_error() {
    let api = Arc::new(ScriptedApi::new("", &["gpt-3.5-turbo", "gpt-4o-mini"]));
    let client = CompletionClient::new(api, "gpt-3.5-turbo").with_fallback("gpt-4o-mini");

    let err = client.generate("hello", &[]).await.unwrap_err();
    assert!(err.to_string().contains("gpt-4o-mini"));
}

/// **Test: The submitted message list is system, context verbatim, user.**
///
/// **Setup:** Succeeding API; two context messages.
/// **Action:** `generate("what next?", context)`.
/// **Expected:** Four messages: System first, the context pair unchanged in
/// order, then the new User message last.
#[tokio::test]
async fn test_message_list_shape() {
    let api = Arc::new(ScriptedApi::new("sure", &[]));
    let client = CompletionClient::new(api.clone(), "gpt-4o-mini");

    let context = vec![
        ChatMessage::user("earlier question"),
        ChatMessage::assistant("earlier answer"),
    ];
    client
        .generate("what next?", &context)
        .await
        .expect("should succeed");

    let submitted = api.submitted.lock().unwrap();
    let messages = &submitted[0];
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].role, MessageRole::System);
    assert_eq!(messages[1], context[0]);
    assert_eq!(messages[2], context[1]);
    assert_eq!(messages[3], ChatMessage::user("what next?"));
}

/// **Test: Cyrillic input switches the system prompt language marker.**
///
/// **Setup:** Succeeding API.
/// **Action:** `generate("привет", [])`.
/// **Expected:** The submitted system message names Russian.
#[tokio::test]
async fn test_system_prompt_language_marker() {
    let api = Arc::new(ScriptedApi::new("привет!", &[]));
    let client = CompletionClient::new(api.clone(), "gpt-4o-mini");

    client.generate("привет", &[]).await.expect("should succeed");

    let submitted = api.submitted.lock().unwrap();
    assert!(submitted[0][0].content.contains("Russian"));
}

/// **Test: The reply is whitespace-trimmed.**
///
/// **Setup:** API replies with surrounding whitespace.
/// **Action:** `generate`.
/// **Expected:** Trimmed text.
#[tokio::test]
async fn test_reply_is_trimmed() {
    let api = Arc::new(ScriptedApi::new("  answer \n", &[]));
    let client = CompletionClient::new(api, "gpt-4o-mini");

    let reply = client.generate("hello", &[]).await.expect("should succeed");
    assert_eq!(reply, "answer");
}
