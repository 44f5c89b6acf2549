//! Completion error types.

use thiserror::Error;

/// Errors produced by [`crate::CompletionClient`].
#[derive(Error, Debug)]
pub enum CompletionError {
    /// Every configured model attempt failed; carries the last underlying
    /// error text.
    #[error("Completion API error: {0}")]
    AllModelsFailed(String),
}
