//! Inline keyboards attached to bot replies.

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Callback payload for the "new request" button.
pub const NEW_REQUEST_CALLBACK: &str = "new_request";

/// Single-button keyboard offering to start a fresh conversation.
pub fn new_request_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
        "🔄 New request",
        NEW_REQUEST_CALLBACK,
    )]])
}
