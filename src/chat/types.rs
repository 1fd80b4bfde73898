//! Chat message and typing-signal types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;
use crate::datetime;

/// A message in a room's chat feed.
///
/// Messages are immutable once created and live in one global collection,
/// filtered by room at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique message ID.
    pub id: String,
    /// Room the message belongs to.
    pub room_id: String,
    /// Sender's user ID.
    pub user_id: String,
    /// Sender's display name.
    pub user_name: String,
    /// Sender's email.
    pub user_email: String,
    /// Message text.
    pub message: String,
    /// When the message was sent.
    pub timestamp: DateTime<Utc>,
    /// Whether the sender was an admin.
    pub is_admin: bool,
}

impl ChatMessage {
    /// Create a new message from the given sender.
    pub fn new(
        room_id: impl Into<String>,
        sender: &User,
        text: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            room_id: room_id.into(),
            user_id: sender.id.clone(),
            user_name: sender.name.clone(),
            user_email: sender.email.clone(),
            message: text.into(),
            timestamp: now,
            is_admin: sender.role.is_admin(),
        }
    }
}

/// An ephemeral marker that a user is composing a message.
///
/// Signals carry an epoch-millisecond timestamp and are only meaningful
/// while younger than the freshness window; a newer signal from the same
/// user in the same room supersedes the old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingSignal {
    /// Room the user is typing in.
    pub room_id: String,
    /// Typing user's ID.
    pub user_id: String,
    /// Typing user's display name.
    pub user_name: String,
    /// Epoch milliseconds when the signal was emitted.
    pub timestamp: i64,
}

impl TypingSignal {
    /// Create a signal for the given user.
    pub fn new(room_id: impl Into<String>, user: &User, now: DateTime<Utc>) -> Self {
        Self {
            room_id: room_id.into(),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            timestamp: datetime::to_millis(&now),
        }
    }

    /// Whether the signal is still within its freshness window.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl_ms: i64) -> bool {
        datetime::to_millis(&now) - self.timestamp < ttl_ms
    }
}
