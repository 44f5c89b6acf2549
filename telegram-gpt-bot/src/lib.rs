//! # Telegram GPT bot
//!
//! Relays Telegram messages to an OpenAI-compatible completion API with a
//! rolling per-user conversation window and an optional free-tier cooldown.
//! Wires storage, completion, and cooldown crates together; config from env.

use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::Bot;
use tracing::info;

pub mod assembly;
pub mod cli;
pub mod config;
pub mod context;
pub mod logger;
pub mod messages;
pub mod service;
pub mod telegram;

pub use cli::{Cli, Commands};
pub use config::{Config, ConfigError, DbBackend};
pub use context::ContextAssembler;
pub use service::{ChatError, ChatService, TurnReply};

/// Loads config, initializes logging and storage, and runs the bot until the
/// process is stopped. Configuration and storage-initialization failures are
/// fatal; everything later is handled per message.
pub async fn run(token_override: Option<String>) -> Result<()> {
    let config = Config::from_env(token_override)?;
    logger::init_tracing(&config.log_file)?;
    info!(config = ?config, "Configuration loaded");

    let service = assembly::build_chat_service(&config)
        .await
        .context("Failed to initialize bot components")?;

    let bot = Bot::new(config.bot_token.clone());
    info!("Bot started and ready");
    telegram::run_dispatcher(bot, Arc::new(service)).await;

    Ok(())
}
