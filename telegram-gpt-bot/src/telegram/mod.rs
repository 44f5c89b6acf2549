//! Telegram transport: dispatcher wiring, update handlers, and inline
//! keyboards. Everything user-visible goes through [`crate::messages`].

pub mod handlers;
pub mod keyboards;

use std::sync::Arc;

use teloxide::dispatching::{HandlerExt, UpdateFilterExt};
use teloxide::prelude::*;

use crate::service::ChatService;
use handlers::Command;

/// Runs the long-polling dispatcher until the process is stopped.
///
/// Branch order matters: commands are routed before plain text, so `/start`
/// never reaches the completion pipeline.
pub async fn run_dispatcher(bot: Bot, service: Arc<ChatService>) {
    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handlers::handle_command),
        )
        .branch(Update::filter_message().endpoint(handlers::handle_message))
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![service])
        // Silently ignore update kinds the bot does not handle.
        .default_handler(|_| async {})
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
