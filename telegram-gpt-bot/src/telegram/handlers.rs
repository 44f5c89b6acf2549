//! Update handlers: commands, plain text messages, and the inline
//! "new request" button.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ChatAction;
use teloxide::utils::command::BotCommands;
use tracing::{error, warn};

use crate::messages;
use crate::service::{ChatService, TurnReply};

use super::keyboards::{new_request_keyboard, NEW_REQUEST_CALLBACK};

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "start a new conversation")]
    Start,
    #[command(description = "show help")]
    Help,
}

fn sender_id(msg: &Message) -> Option<i64> {
    msg.from.as_ref().map(|u| u.id.0 as i64)
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    service: Arc<ChatService>,
) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            let first_name = msg
                .from
                .as_ref()
                .map(|u| u.first_name.clone())
                .unwrap_or_else(|| "there".to_string());
            // /start begins a fresh conversation, so any stored history goes.
            let deleted = match sender_id(&msg) {
                Some(user_id) => service.reset(user_id).await.unwrap_or_else(|e| {
                    warn!(error = %e, "Failed to clear history on /start");
                    0
                }),
                None => 0,
            };
            bot.send_message(msg.chat.id, messages::welcome(&first_name, deleted))
                .reply_markup(new_request_keyboard())
                .await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, messages::HELP_TEXT)
                .reply_markup(new_request_keyboard())
                .await?;
        }
    }
    Ok(())
}

pub async fn handle_message(
    bot: Bot,
    msg: Message,
    service: Arc<ChatService>,
) -> ResponseResult<()> {
    let Some(user_id) = sender_id(&msg) else {
        // Channel posts and service updates carry no sender.
        return Ok(());
    };
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, messages::TEXT_ONLY_NOTICE)
            .await?;
        return Ok(());
    };

    bot.send_chat_action(msg.chat.id, ChatAction::Typing).await?;

    match service.respond(user_id, text).await {
        Ok(TurnReply::Answer(answer)) => {
            bot.send_message(msg.chat.id, answer)
                .reply_markup(new_request_keyboard())
                .await?;
        }
        Ok(TurnReply::RateLimited {
            retry_after_seconds,
        }) => {
            bot.send_message(msg.chat.id, messages::rate_limit_notice(retry_after_seconds))
                .await?;
        }
        Err(e) => {
            error!(user_id, error = %e, "Failed to answer message");
            bot.send_message(msg.chat.id, messages::error_notice(&e))
                .reply_markup(new_request_keyboard())
                .await?;
        }
    }
    Ok(())
}

pub async fn handle_callback(
    bot: Bot,
    query: CallbackQuery,
    service: Arc<ChatService>,
) -> ResponseResult<()> {
    if query.data.as_deref() != Some(NEW_REQUEST_CALLBACK) {
        bot.answer_callback_query(query.id).await?;
        return Ok(());
    }

    let user_id = query.from.id.0 as i64;
    let text = match service.reset(user_id).await {
        Ok(deleted) => messages::reset_confirmation(deleted),
        Err(e) => {
            error!(user_id, error = %e, "Failed to reset conversation");
            messages::error_notice(&e)
        }
    };

    // Replace the button's message in place; a stale message (too old or
    // deleted) is not worth surfacing to the user.
    if let Some(message) = query.message.as_ref() {
        if let Err(e) = bot
            .edit_message_text(message.chat().id, message.id(), text)
            .reply_markup(new_request_keyboard())
            .await
        {
            warn!(user_id, error = %e, "Failed to edit message after reset");
        }
    }

    bot.answer_callback_query(query.id).await?;
    Ok(())
}
