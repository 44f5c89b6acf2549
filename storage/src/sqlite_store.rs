//! SQLite implementation of [`ExchangeStore`].
//!
//! Creates the database file if missing and the `exchanges` table on startup.
//! External: SQLite via sqlx.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use tracing::info;

use crate::error::StorageError;
use crate::exchange::Exchange;
use crate::store::ExchangeStore;

/// Conversation history store backed by a SQLite pool.
#[derive(Clone)]
pub struct SqliteExchangeStore {
    pool: SqlitePool,
}

impl SqliteExchangeStore {
    /// Connects to the given database URL (file path or `sqlite::memory:`)
    /// and creates the schema if it does not exist.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        info!(database_url, "Initializing SQLite exchange store");

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| StorageError::Database(e.to_string()))?
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await?;
        let store = Self { pool };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS exchanges (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                request_text TEXT NOT NULL,
                response_text TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_exchanges_user_id ON exchanges(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ExchangeStore for SqliteExchangeStore {
    async fn create(
        &self,
        user_id: i64,
        request_text: &str,
        response_text: Option<&str>,
    ) -> Result<Exchange, StorageError> {
        let exchange: Exchange = sqlx::query_as(
            r#"
            INSERT INTO exchanges (user_id, request_text, response_text, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, user_id, request_text, response_text, created_at
            "#,
        )
        .bind(user_id)
        .bind(request_text)
        .bind(response_text)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        info!(user_id, exchange_id = exchange.id, "Saved exchange");
        Ok(exchange)
    }

    async fn recent(&self, user_id: i64, limit: u32) -> Result<Vec<Exchange>, StorageError> {
        let mut exchanges: Vec<Exchange> = sqlx::query_as(
            r#"
            SELECT id, user_id, request_text, response_text, created_at
            FROM exchanges
            WHERE user_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        // Chronological order (oldest first) for context assembly.
        exchanges.reverse();
        Ok(exchanges)
    }

    async fn delete_for_user(&self, user_id: i64) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM exchanges WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        info!(
            user_id,
            deleted = result.rows_affected(),
            "Deleted user exchanges"
        );
        Ok(result.rows_affected())
    }
}
