//! Composition root: builds the chat service from config. All clients are
//! constructed here and passed down explicitly; nothing is process-global.

use std::sync::Arc;

use anyhow::Result;
use completion::{CompletionClient, OpenAiChatApi};
use cooldown::{RateLimiter, RedisCooldownStore, DEFAULT_TTL_SECONDS};
use storage::{ExchangeStore, PostgresExchangeStore, SqliteExchangeStore};
use tracing::info;

use crate::config::{Config, DbBackend};
use crate::service::ChatService;

/// Redis key prefix for the free-tier cooldown scope.
const RATE_LIMIT_PREFIX: &str = "rate_limit:gpt35";

/// Connects the configured history store, completion client, and (when
/// free-tier gating applies) the Redis-backed rate limiter.
pub async fn build_chat_service(config: &Config) -> Result<ChatService> {
    let store: Arc<dyn ExchangeStore> = match config.db_backend {
        DbBackend::Sqlite => {
            Arc::new(SqliteExchangeStore::connect(&config.database_url()).await?)
        }
        DbBackend::Postgres => {
            Arc::new(PostgresExchangeStore::connect(&config.database_url()).await?)
        }
    };

    let api = Arc::new(OpenAiChatApi::new(config.openai_api_key.clone()));
    let completion = CompletionClient::new(api, config.openai_model.clone());

    let limiter = if config.free_tier_gating() {
        info!(model = %config.openai_model, "Free-tier cooldown gate enabled");
        let cooldown_store = RedisCooldownStore::connect(&config.redis_url)?;
        Some(RateLimiter::new(
            Arc::new(cooldown_store),
            RATE_LIMIT_PREFIX,
            DEFAULT_TTL_SECONDS,
        ))
    } else {
        None
    };

    Ok(ChatService::new(
        store,
        completion,
        limiter,
        config.max_context_messages,
    ))
}
