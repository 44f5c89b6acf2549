//! # cooldown
//!
//! Per-user request cooldown backed by an expiring-key store. The mere
//! presence of an unexpired key means the user is blocked; the key's
//! remaining TTL is the retry-after value. [`RateLimiter`] implements the
//! check/commit policy over the [`CooldownStore`] seam; the production store
//! is Redis ([`RedisCooldownStore`]).

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

pub mod redis_store;

pub use redis_store::RedisCooldownStore;

/// Errors from the cooldown backing store.
#[derive(Error, Debug)]
pub enum CooldownError {
    #[error("Cooldown store error: {0}")]
    Store(String),
}

/// Expiring-key store seam. Production code uses Redis; tests substitute an
/// in-memory clock-driven fake.
#[async_trait]
pub trait CooldownStore: Send + Sync {
    /// Remaining TTL of the key in seconds, or None when the key is absent
    /// or expired.
    async fn remaining_ttl(&self, key: &str) -> Result<Option<u64>, CooldownError>;

    /// Creates or overwrites the key with the given TTL (SETEX semantics:
    /// a second mark resets the TTL to full rather than stacking).
    async fn mark(&self, key: &str, ttl_seconds: u64) -> Result<(), CooldownError>;
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitState {
    pub limited: bool,
    pub retry_after_seconds: u64,
}

/// At most one successful request per user per cooldown window.
///
/// `check` is side-effect-free; `commit` must be called only after the
/// request actually succeeded, so failed attempts do not consume the quota.
pub struct RateLimiter {
    store: std::sync::Arc<dyn CooldownStore>,
    prefix: String,
    ttl_seconds: u64,
}

/// Default cooldown window (3 minutes).
pub const DEFAULT_TTL_SECONDS: u64 = 180;

impl RateLimiter {
    pub fn new(
        store: std::sync::Arc<dyn CooldownStore>,
        prefix: impl Into<String>,
        ttl_seconds: u64,
    ) -> Self {
        Self {
            store,
            prefix: prefix.into(),
            ttl_seconds,
        }
    }

    fn key(&self, user_id: i64) -> String {
        format!("{}:user:{}", self.prefix, user_id)
    }

    /// Whether the user is currently in cooldown, and for how many more
    /// seconds. Never writes to the store.
    pub async fn check(&self, user_id: i64) -> Result<LimitState, CooldownError> {
        let ttl = self.store.remaining_ttl(&self.key(user_id)).await?;
        match ttl {
            Some(retry_after_seconds) if retry_after_seconds > 0 => Ok(LimitState {
                limited: true,
                retry_after_seconds,
            }),
            _ => Ok(LimitState {
                limited: false,
                retry_after_seconds: 0,
            }),
        }
    }

    /// Marks the user as having used their quota for the current window.
    /// Overwrites any existing mark, resetting the TTL to full.
    pub async fn commit(&self, user_id: i64) -> Result<(), CooldownError> {
        let key = self.key(user_id);
        self.store.mark(&key, self.ttl_seconds).await?;
        debug!(user_id, ttl_seconds = self.ttl_seconds, "Cooldown committed");
        Ok(())
    }
}
