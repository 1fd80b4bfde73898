//! Chat persistence: messages, typing signals, and read markers.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::auth::User;
use crate::datetime;
use crate::storage::{self, Storage};
use crate::Result;

use super::types::{ChatMessage, TypingSignal};

/// Storage key for the global message collection.
const CHAT_MESSAGES_KEY: &str = "chatMessages";

/// Storage key for the global typing-signal collection.
const TYPING_USERS_KEY: &str = "typingUsers";

/// Storage key for a user's read marker in a room.
fn last_read_key(room_id: &str, user_id: &str) -> String {
    format!("lastRead_{room_id}_{user_id}")
}

/// Repository for chat operations.
///
/// Typing signals behave as an expiring-entry collection keyed by
/// (room, user): writes supersede the user's previous signal and drop
/// stale entries, reads filter by freshness.
#[derive(Clone)]
pub struct ChatRepository {
    storage: Arc<dyn Storage>,
}

impl ChatRepository {
    /// Create a new ChatRepository over the given storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Messages for a room, ordered by creation time.
    pub fn messages_for_room(&self, room_id: &str) -> Result<Vec<ChatMessage>> {
        let all: Vec<ChatMessage> =
            storage::read_collection(self.storage.as_ref(), CHAT_MESSAGES_KEY)?;
        let mut messages: Vec<ChatMessage> =
            all.into_iter().filter(|m| m.room_id == room_id).collect();
        // Timestamp ties break on ID so the order is total
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
        Ok(messages)
    }

    /// Append a message to the global collection.
    pub fn append_message(&self, message: &ChatMessage) -> Result<()> {
        let mut all: Vec<ChatMessage> =
            storage::read_collection(self.storage.as_ref(), CHAT_MESSAGES_KEY)?;
        all.push(message.clone());
        storage::write_collection(self.storage.as_ref(), CHAT_MESSAGES_KEY, &all)
    }

    /// Emit a typing signal for the user in a room.
    ///
    /// Replaces any previous signal from the same user in the same room
    /// and prunes entries already past the freshness window.
    pub fn set_typing(
        &self,
        room_id: &str,
        user: &User,
        now: DateTime<Utc>,
        ttl_ms: i64,
    ) -> Result<()> {
        let all: Vec<TypingSignal> =
            storage::read_collection(self.storage.as_ref(), TYPING_USERS_KEY)?;
        let mut kept: Vec<TypingSignal> = all
            .into_iter()
            .filter(|s| !(s.room_id == room_id && s.user_id == user.id))
            .filter(|s| s.is_fresh(now, ttl_ms))
            .collect();
        kept.push(TypingSignal::new(room_id, user, now));
        storage::write_collection(self.storage.as_ref(), TYPING_USERS_KEY, &kept)
    }

    /// Remove the user's typing signal for a room.
    pub fn clear_typing(&self, room_id: &str, user_id: &str) -> Result<()> {
        let all: Vec<TypingSignal> =
            storage::read_collection(self.storage.as_ref(), TYPING_USERS_KEY)?;
        let kept: Vec<TypingSignal> = all
            .into_iter()
            .filter(|s| !(s.room_id == room_id && s.user_id == user_id))
            .collect();
        storage::write_collection(self.storage.as_ref(), TYPING_USERS_KEY, &kept)
    }

    /// Fresh typing signals for a room.
    pub fn active_typists(
        &self,
        room_id: &str,
        now: DateTime<Utc>,
        ttl_ms: i64,
    ) -> Result<Vec<TypingSignal>> {
        let all: Vec<TypingSignal> =
            storage::read_collection(self.storage.as_ref(), TYPING_USERS_KEY)?;
        Ok(all
            .into_iter()
            .filter(|s| s.room_id == room_id && s.is_fresh(now, ttl_ms))
            .collect())
    }

    /// The user's read marker for a room, in epoch milliseconds.
    ///
    /// Returns 0 when the user has never opened the room's chat.
    pub fn last_read(&self, room_id: &str, user_id: &str) -> Result<i64> {
        let raw = self.storage.get(&last_read_key(room_id, user_id))?;
        Ok(raw.and_then(|v| v.parse().ok()).unwrap_or(0))
    }

    /// Advance the user's read marker for a room to `now`.
    ///
    /// The marker is monotonic: an older timestamp never moves it
    /// backwards.
    pub fn mark_read(&self, room_id: &str, user_id: &str, now: DateTime<Utc>) -> Result<()> {
        let now_ms = datetime::to_millis(&now);
        if now_ms <= self.last_read(room_id, user_id)? {
            return Ok(());
        }
        self.storage
            .set(&last_read_key(room_id, user_id), now_ms.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::storage::MemoryStorage;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    fn setup() -> ChatRepository {
        ChatRepository::new(Arc::new(MemoryStorage::new()))
    }

    fn user(name: &str) -> User {
        User::new(name, format!("{}@example.com", name.to_lowercase()), Role::User, at(0))
    }

    #[test]
    fn test_messages_empty() {
        let repo = setup();
        assert!(repo.messages_for_room("room-1").unwrap().is_empty());
    }

    #[test]
    fn test_append_and_filter_by_room() {
        let repo = setup();
        let alice = user("Alice");

        repo.append_message(&ChatMessage::new("room-1", &alice, "one", at(1_000)))
            .unwrap();
        repo.append_message(&ChatMessage::new("room-2", &alice, "two", at(2_000)))
            .unwrap();

        let messages = repo.messages_for_room("room-1").unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "one");
    }

    #[test]
    fn test_messages_ordered_by_timestamp() {
        let repo = setup();
        let alice = user("Alice");

        repo.append_message(&ChatMessage::new("room-1", &alice, "late", at(5_000)))
            .unwrap();
        repo.append_message(&ChatMessage::new("room-1", &alice, "early", at(1_000)))
            .unwrap();

        let messages = repo.messages_for_room("room-1").unwrap();
        assert_eq!(messages[0].message, "early");
        assert_eq!(messages[1].message, "late");
    }

    #[test]
    fn test_set_typing_supersedes_previous() {
        let repo = setup();
        let alice = user("Alice");

        repo.set_typing("room-1", &alice, at(1_000), 3000).unwrap();
        repo.set_typing("room-1", &alice, at(2_000), 3000).unwrap();

        let typists = repo.active_typists("room-1", at(2_000), 3000).unwrap();
        assert_eq!(typists.len(), 1);
        assert_eq!(typists[0].timestamp, 2_000);
    }

    #[test]
    fn test_set_typing_prunes_stale_entries() {
        let backing = Arc::new(MemoryStorage::new());
        let repo = ChatRepository::new(backing.clone());
        let alice = user("Alice");
        let bob = user("Bob");

        repo.set_typing("room-1", &alice, at(1_000), 3000).unwrap();
        // Well past Alice's freshness window
        repo.set_typing("room-1", &bob, at(10_000), 3000).unwrap();

        // Alice's stale entry is gone from storage, not just filtered
        let raw: Vec<TypingSignal> =
            storage::read_collection(backing.as_ref(), TYPING_USERS_KEY).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0].user_id, bob.id);
    }

    #[test]
    fn test_typing_signal_expires_on_read() {
        let repo = setup();
        let alice = user("Alice");

        repo.set_typing("room-1", &alice, at(1_000), 3000).unwrap();

        assert_eq!(repo.active_typists("room-1", at(3_999), 3000).unwrap().len(), 1);
        assert!(repo.active_typists("room-1", at(4_000), 3000).unwrap().is_empty());
    }

    #[test]
    fn test_clear_typing_only_affects_target() {
        let repo = setup();
        let alice = user("Alice");
        let bob = user("Bob");

        repo.set_typing("room-1", &alice, at(1_000), 3000).unwrap();
        repo.set_typing("room-1", &bob, at(1_000), 3000).unwrap();
        repo.clear_typing("room-1", &alice.id).unwrap();

        let typists = repo.active_typists("room-1", at(1_500), 3000).unwrap();
        assert_eq!(typists.len(), 1);
        assert_eq!(typists[0].user_id, bob.id);
    }

    #[test]
    fn test_last_read_defaults_to_zero() {
        let repo = setup();
        assert_eq!(repo.last_read("room-1", "user-1").unwrap(), 0);
    }

    #[test]
    fn test_mark_read_advances() {
        let repo = setup();
        repo.mark_read("room-1", "user-1", at(5_000)).unwrap();
        assert_eq!(repo.last_read("room-1", "user-1").unwrap(), 5_000);
    }

    #[test]
    fn test_mark_read_is_monotonic() {
        let repo = setup();
        repo.mark_read("room-1", "user-1", at(5_000)).unwrap();
        repo.mark_read("room-1", "user-1", at(3_000)).unwrap();
        assert_eq!(repo.last_read("room-1", "user-1").unwrap(), 5_000);
    }

    #[test]
    fn test_read_markers_scoped_per_room_and_user() {
        let repo = setup();
        repo.mark_read("room-1", "user-1", at(5_000)).unwrap();

        assert_eq!(repo.last_read("room-2", "user-1").unwrap(), 0);
        assert_eq!(repo.last_read("room-1", "user-2").unwrap(), 0);
    }
}
