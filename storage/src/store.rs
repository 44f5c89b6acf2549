//! Store trait for conversation history. Implementations ([`crate::SqliteExchangeStore`],
//! [`crate::PostgresExchangeStore`]) provide concrete persistence.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::exchange::Exchange;

/// Async store for per-user exchanges: create, read recent, delete all.
#[async_trait]
pub trait ExchangeStore: Send + Sync {
    /// Inserts a new exchange and returns the stored row (id and timestamp
    /// are assigned by the store).
    async fn create(
        &self,
        user_id: i64,
        request_text: &str,
        response_text: Option<&str>,
    ) -> Result<Exchange, StorageError>;

    /// Returns up to `limit` most recent exchanges for the user, in
    /// chronological order (oldest first). Empty history yields an empty vec.
    async fn recent(&self, user_id: i64, limit: u32) -> Result<Vec<Exchange>, StorageError>;

    /// Deletes all exchanges for the user; returns the number of rows removed.
    async fn delete_for_user(&self, user_id: i64) -> Result<u64, StorageError>;
}
