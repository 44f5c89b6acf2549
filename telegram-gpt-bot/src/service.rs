//! Conversation coordinator: per incoming message, check the cooldown gate,
//! assemble context, call the completion client, persist the exchange, and
//! commit the gate only after everything succeeded.

use std::sync::Arc;

use completion::{CompletionClient, CompletionError};
use cooldown::RateLimiter;
use storage::{ExchangeStore, StorageError};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::context::ContextAssembler;

/// Per-turn failures surfaced to the transport layer; each variant maps to a
/// distinct user-facing message.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("{0}")]
    Completion(#[from] CompletionError),

    #[error("{0}")]
    Persistence(#[from] StorageError),
}

/// Successful outcome of a conversational turn. Being rate-limited is a
/// normal, expected outcome, not an error.
#[derive(Debug)]
pub enum TurnReply {
    Answer(String),
    RateLimited { retry_after_seconds: u64 },
}

/// Orchestrates one conversational turn per call.
///
/// All cross-request state lives in the external stores; concurrent messages
/// from the same user may interleave history and cooldown accesses (accepted
/// for this low-contention workload).
pub struct ChatService {
    store: Arc<dyn ExchangeStore>,
    assembler: ContextAssembler,
    completion: CompletionClient,
    /// Present only when free-tier gating is configured.
    limiter: Option<RateLimiter>,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn ExchangeStore>,
        completion: CompletionClient,
        limiter: Option<RateLimiter>,
        context_limit: u32,
    ) -> Self {
        let assembler = ContextAssembler::new(store.clone(), context_limit);
        Self {
            store,
            assembler,
            completion,
            limiter,
        }
    }

    /// Handles one user message and returns the reply.
    ///
    /// Gate usage is committed only after the reply was generated and
    /// persisted, so failed attempts never consume the user's quota. An
    /// unreachable cooldown store fails open: the turn proceeds unblocked
    /// and the commit is skipped.
    #[instrument(skip(self, text))]
    pub async fn respond(&self, user_id: i64, text: &str) -> Result<TurnReply, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::Validation("message text is empty".to_string()));
        }

        let mut commit_gate = false;
        if let Some(limiter) = &self.limiter {
            match limiter.check(user_id).await {
                Ok(state) if state.limited => {
                    info!(
                        user_id,
                        retry_after = state.retry_after_seconds,
                        "Request blocked by cooldown"
                    );
                    return Ok(TurnReply::RateLimited {
                        retry_after_seconds: state.retry_after_seconds,
                    });
                }
                Ok(_) => commit_gate = true,
                Err(e) => {
                    warn!(user_id, error = %e, "Cooldown store unreachable, failing open");
                }
            }
        }

        let context = self.assembler.assemble(user_id).await?;
        let response = self.completion.generate(text, &context).await?;
        self.store.create(user_id, text, Some(&response)).await?;

        if commit_gate {
            if let Some(limiter) = &self.limiter {
                // The reply is already on its way; a commit failure only
                // widens the quota, so it is logged and swallowed.
                if let Err(e) = limiter.commit(user_id).await {
                    warn!(user_id, error = %e, "Failed to commit cooldown usage");
                }
            }
        }

        info!(user_id, "Turn completed");
        Ok(TurnReply::Answer(response))
    }

    /// Deletes the user's conversation history; returns the count removed.
    /// Always available, independent of the per-turn flow.
    #[instrument(skip(self))]
    pub async fn reset(&self, user_id: i64) -> Result<u64, ChatError> {
        let deleted = self.store.delete_for_user(user_id).await?;
        info!(user_id, deleted, "Conversation reset");
        Ok(deleted)
    }
}
