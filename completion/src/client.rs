//! Completion client: builds the message list (system prompt + context +
//! user message) and attempts models in order, primary first and fallback
//! second, remembering whichever model last succeeded.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::CompletionError;
use crate::language;
use crate::message::ChatMessage;
use crate::prompt::system_prompt;
use crate::ChatApi;

/// Model used when the configured primary is unavailable.
pub const FALLBACK_MODEL: &str = "gpt-4o-mini";

/// Drives chat completions with an ordered two-tier model fallback.
///
/// The preferred model starts as the configured primary; after a successful
/// call it is updated to whichever model answered, so later requests go to
/// the model known to work for the rest of the process lifetime.
pub struct CompletionClient {
    api: Arc<dyn ChatApi>,
    preferred: RwLock<String>,
    fallback: String,
}

impl CompletionClient {
    pub fn new(api: Arc<dyn ChatApi>, model: impl Into<String>) -> Self {
        Self {
            api,
            preferred: RwLock::new(model.into()),
            fallback: FALLBACK_MODEL.to_string(),
        }
    }

    /// Overrides the fallback model (mainly for tests).
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Returns the model the next request will try first.
    pub async fn preferred_model(&self) -> String {
        self.preferred.read().await.clone()
    }

    /// Models to try, in order: preferred first, then the fallback only when
    /// it differs. When preferred == fallback exactly one attempt is made.
    async fn attempt_order(&self) -> Vec<String> {
        let preferred = self.preferred.read().await.clone();
        let mut order = vec![preferred];
        if self.fallback != order[0] {
            order.push(self.fallback.clone());
        }
        order
    }

    /// Generates a reply for `user_text` given prior conversation context.
    ///
    /// The submitted message list is: one system message (with the detected
    /// language injected), the context messages verbatim in order, then the
    /// new user message. Fails with [`CompletionError::AllModelsFailed`] when
    /// no configured model succeeds; no partial output is returned.
    pub async fn generate(
        &self,
        user_text: &str,
        context: &[ChatMessage],
    ) -> Result<String, CompletionError> {
        let mut messages = Vec::with_capacity(context.len() + 2);
        messages.push(ChatMessage::system(system_prompt(language::detect(
            user_text,
        ))));
        messages.extend_from_slice(context);
        messages.push(ChatMessage::user(user_text));

        let mut last_error: Option<anyhow::Error> = None;

        for model in self.attempt_order().await {
            match self.api.complete(&model, &messages).await {
                Ok(text) => {
                    info!(model = %model, "Completion succeeded");
                    *self.preferred.write().await = model;
                    return Ok(text.trim().to_string());
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "Completion attempt failed");
                    last_error = Some(e);
                }
            }
        }

        let detail = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no models configured".to_string());
        Err(CompletionError::AllModelsFailed(detail))
    }
}
