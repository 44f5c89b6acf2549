//! Redis implementation of [`CooldownStore`].
//!
//! Uses `TTL` for checks and `SET key 1 EX ttl` for commits; Redis expires
//! the key on its own, so nothing is ever explicitly deleted.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::info;

use crate::{CooldownError, CooldownStore};

/// Expiring-key store backed by Redis.
#[derive(Clone)]
pub struct RedisCooldownStore {
    client: redis::Client,
}

impl RedisCooldownStore {
    /// Creates a store for the given Redis URL. No connection is made until
    /// the first operation.
    pub fn connect(url: &str) -> Result<Self, CooldownError> {
        info!(url, "Initializing Redis cooldown store");
        let client = redis::Client::open(url).map_err(|e| CooldownError::Store(e.to_string()))?;
        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, CooldownError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CooldownError::Store(e.to_string()))
    }
}

#[async_trait]
impl CooldownStore for RedisCooldownStore {
    async fn remaining_ttl(&self, key: &str) -> Result<Option<u64>, CooldownError> {
        let mut conn = self.connection().await?;
        // TTL returns -2 for a missing key and -1 for a key without expiry.
        let ttl: i64 = conn
            .ttl(key)
            .await
            .map_err(|e| CooldownError::Store(e.to_string()))?;
        if ttl > 0 {
            Ok(Some(ttl as u64))
        } else {
            Ok(None)
        }
    }

    async fn mark(&self, key: &str, ttl_seconds: u64) -> Result<(), CooldownError> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .set_ex(key, 1u8, ttl_seconds)
            .await
            .map_err(|e| CooldownError::Store(e.to_string()))?;
        Ok(())
    }
}
