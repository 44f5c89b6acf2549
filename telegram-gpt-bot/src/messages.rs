//! User-facing message texts and formatting helpers.

use crate::service::ChatError;

/// Sent when a non-text message arrives.
pub const TEXT_ONLY_NOTICE: &str = "Please send a text message.";

pub const HELP_TEXT: &str = "📖 How to use this bot:\n\n\
🔹 Just send me any text message and I will answer it!\n\n\
🔹 The bot remembers the last few messages for more coherent answers.\n\n\
🔹 Available commands:\n\
  /start - start a new conversation (clears history)\n\
  /help - show this help\n\n\
🔹 The \"New request\" button also clears the conversation history.\n\n\
💡 Tip: lean on the context for a more natural conversation!";

/// Welcome text for `/start`; appends the cleared-history note when any
/// exchanges were removed.
pub fn welcome(first_name: &str, deleted: u64) -> String {
    let mut text = format!(
        "Hi, {}! 👋\n\n\
I am an AI bot backed by ChatGPT.\n\
Just send me any message and I will answer!\n\n\
Available commands:\n\
/help - show help\n\
/start - start a new conversation",
        first_name
    );
    if deleted > 0 {
        text.push_str(&format!(
            "\n\n✅ Conversation history cleared ({} messages)",
            deleted
        ));
    }
    text
}

/// Formats a wait duration as minutes and seconds for humans.
pub fn format_wait(seconds: u64) -> String {
    let minutes = seconds / 60;
    let rest = seconds % 60;
    if minutes > 0 {
        format!("{} min {} sec", minutes, rest)
    } else {
        format!("{} sec", rest)
    }
}

/// Free-tier cooldown notice with the remaining wait.
pub fn rate_limit_notice(retry_after_seconds: u64) -> String {
    format!(
        "⚠️ In the free gpt-3.5-turbo mode you can send at most one request \
every 3 minutes.\n\
Please wait about {} and try again.",
        format_wait(retry_after_seconds)
    )
}

/// Error notice: distinct lead-in per error kind, the underlying error text,
/// and retry guidance.
pub fn error_notice(error: &ChatError) -> String {
    let (lead, hint) = match error {
        ChatError::Validation(_) => (
            "❌ I could not process that message:",
            "Please send plain text and try again.",
        ),
        ChatError::Completion(_) => (
            "❌ The AI service could not produce an answer:",
            "Try again in a moment, or use /start to begin a new conversation.",
        ),
        ChatError::Persistence(_) => (
            "❌ Something went wrong while saving the conversation:",
            "Try again, or use /start to begin a new conversation.",
        ),
    };
    format!("{}\n{}\n\n{}", lead, error, hint)
}

/// Confirmation for a conversation reset, including the count removed.
pub fn reset_confirmation(deleted: u64) -> String {
    let mut text = "✅ Conversation history cleared!\n\n\
You can start a new conversation. Just send me a message."
        .to_string();
    if deleted > 0 {
        text.push_str(&format!("\n\nMessages removed: {}", deleted));
    } else {
        text.push_str("\n\nThe history was already empty.");
    }
    text
}
