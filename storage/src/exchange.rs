//! Exchange model for persistence.
//!
//! Maps to the `exchanges` table; one row per conversational turn.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted request/response pair owned by a single user.
///
/// Rows are immutable after creation; the only mutation is bulk deletion when
/// the user resets their conversation. `response_text` is None when no reply
/// was recorded for the turn.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exchange {
    pub id: i64,
    pub user_id: i64,
    pub request_text: String,
    pub response_text: Option<String>,
    pub created_at: DateTime<Utc>,
}
