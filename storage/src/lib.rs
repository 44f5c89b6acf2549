//! # storage
//!
//! Per-user conversation history: the [`Exchange`] model, the [`ExchangeStore`]
//! trait, and SQLite/PostgreSQL implementations backed by sqlx.

pub mod error;
pub mod exchange;
pub mod postgres_store;
pub mod sqlite_store;
pub mod store;

pub use error::StorageError;
pub use exchange::Exchange;
pub use postgres_store::PostgresExchangeStore;
pub use sqlite_store::SqliteExchangeStore;
pub use store::ExchangeStore;
