//! # completion
//!
//! Chat completion client with two-tier model fallback. Defines the
//! [`ChatApi`] seam (an OpenAI implementation lives in [`openai_api`]) and
//! the [`CompletionClient`] that builds the system/context/user message list
//! and drives the ordered primary-then-fallback attempts.

use anyhow::Result;
use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod language;
pub mod message;
pub mod openai_api;
pub mod prompt;

pub use client::CompletionClient;
pub use error::CompletionError;
pub use language::Language;
pub use message::{ChatMessage, MessageRole};
pub use openai_api::OpenAiChatApi;

/// Chat completion API seam: one request against one named model.
///
/// Production code uses [`OpenAiChatApi`]; tests substitute scripted fakes.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Returns the model's reply text for the given messages.
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String>;
}
