//! Room chat session: feed, draft, typing state, and unread tracking.
//!
//! A [`ChatSession`] is the per-user, per-room chat state. It is driven
//! cooperatively: the owner calls [`ChatSession::poll`] on a cadence (see
//! [`super::poller`]) and feeds keystrokes and dialog events in between.
//! All time-dependent methods take `now` explicitly; timer expiry (the
//! typing idle deadline) is checked on the next poll.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::auth::User;
use crate::config::ChatConfig;
use crate::datetime;
use crate::notice::Notice;
use crate::Result;

use super::repository::ChatRepository;
use super::types::{ChatMessage, TypingSignal};
use super::unread;

/// Timing and display settings for a chat session.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// Polling cadence while the session is mounted.
    pub poll_interval: Duration,
    /// Freshness window for typing signals, in milliseconds.
    pub typing_ttl_ms: i64,
    /// Idle time after the last keystroke before the typing signal is
    /// cleared, in milliseconds.
    pub typing_idle_ms: i64,
    /// Largest unread count shown verbatim.
    pub unread_display_cap: usize,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            typing_ttl_ms: 3000,
            typing_idle_ms: 2000,
            unread_display_cap: 99,
        }
    }
}

impl ChatSettings {
    /// Build settings from the chat section of the configuration.
    pub fn from_config(config: &ChatConfig) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            typing_ttl_ms: config.typing_ttl_ms,
            typing_idle_ms: config.typing_idle_ms,
            unread_display_cap: config.unread_display_cap,
        }
    }
}

/// Chat state for one user in one room.
pub struct ChatSession {
    repo: ChatRepository,
    room_id: String,
    user: User,
    settings: ChatSettings,
    open: bool,
    draft: String,
    typing: bool,
    /// Epoch milliseconds when the typing idle timer fires.
    typing_deadline_ms: Option<i64>,
    messages: Vec<ChatMessage>,
    typists: Vec<TypingSignal>,
    unread: usize,
    scroll_requested: bool,
    notices: Vec<Notice>,
    shut_down: bool,
}

impl ChatSession {
    /// Mount a session: load the room's current feed and typing state.
    pub fn mount(
        repo: ChatRepository,
        room_id: impl Into<String>,
        user: User,
        settings: ChatSettings,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let mut session = Self {
            repo,
            room_id: room_id.into(),
            user,
            settings,
            open: false,
            draft: String::new(),
            typing: false,
            typing_deadline_ms: None,
            messages: Vec::new(),
            typists: Vec::new(),
            unread: 0,
            scroll_requested: false,
            notices: Vec::new(),
            shut_down: false,
        };
        session.poll(now)?;
        Ok(session)
    }

    /// Refresh the session from storage.
    ///
    /// Expires the session's own typing signal if the idle deadline has
    /// passed, reloads messages and fresh typing signals, and recomputes
    /// the unread count (zero while the dialog is open, with the read
    /// marker advancing so messages arriving while open stay read).
    pub fn poll(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.typing {
            if let Some(deadline) = self.typing_deadline_ms {
                if datetime::to_millis(&now) >= deadline {
                    self.repo.clear_typing(&self.room_id, &self.user.id)?;
                    self.typing = false;
                    self.typing_deadline_ms = None;
                    debug!("typing idle timeout in room {}", self.room_id);
                }
            }
        }

        let previous_len = self.messages.len();
        self.messages = self.repo.messages_for_room(&self.room_id)?;
        self.typists =
            self.repo
                .active_typists(&self.room_id, now, self.settings.typing_ttl_ms)?;

        if self.open && self.messages.len() != previous_len {
            self.scroll_requested = true;
        }
        self.refresh_unread(now)?;
        Ok(())
    }

    /// Update the draft from a keystroke.
    ///
    /// The first non-empty keystroke emits a typing signal; every
    /// keystroke pushes the idle deadline out again.
    pub fn update_draft(&mut self, text: &str, now: DateTime<Utc>) -> Result<()> {
        self.draft = text.to_string();

        if !self.draft.trim().is_empty() && !self.typing {
            self.typing = true;
            self.repo
                .set_typing(&self.room_id, &self.user, now, self.settings.typing_ttl_ms)?;
        }

        if self.typing {
            self.typing_deadline_ms =
                Some(datetime::to_millis(&now) + self.settings.typing_idle_ms);
        }
        Ok(())
    }

    /// Send the current draft.
    ///
    /// A draft that trims to empty is a no-op. Otherwise the message is
    /// appended to the room's feed, the draft and typing signal are
    /// cleared, and a confirmation notice is queued.
    pub fn send(&mut self, now: DateTime<Utc>) -> Result<Option<ChatMessage>> {
        let text = self.draft.trim().to_string();
        if text.is_empty() {
            return Ok(None);
        }

        let message = ChatMessage::new(&self.room_id, &self.user, text, now);
        self.repo.append_message(&message)?;

        self.draft.clear();
        self.typing = false;
        self.typing_deadline_ms = None;
        self.repo.clear_typing(&self.room_id, &self.user.id)?;

        self.messages = self.repo.messages_for_room(&self.room_id)?;
        if self.open {
            self.scroll_requested = true;
        }
        self.refresh_unread(now)?;

        self.notices.push(Notice::success(
            "Message Sent",
            "Your message has been sent to the room.",
        ));
        Ok(Some(message))
    }

    /// Open the chat dialog: request a scroll to the latest message and
    /// mark the feed read.
    pub fn open(&mut self, now: DateTime<Utc>) -> Result<()> {
        self.open = true;
        self.scroll_requested = true;
        self.repo.mark_read(&self.room_id, &self.user.id, now)?;
        self.unread = 0;
        Ok(())
    }

    /// Close the chat dialog.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Tear the session down, clearing the typing signal unconditionally.
    pub fn shutdown(&mut self) -> Result<()> {
        self.repo.clear_typing(&self.room_id, &self.user.id)?;
        self.typing = false;
        self.typing_deadline_ms = None;
        self.shut_down = true;
        Ok(())
    }

    fn refresh_unread(&mut self, now: DateTime<Utc>) -> Result<()> {
        if self.open {
            self.repo.mark_read(&self.room_id, &self.user.id, now)?;
            self.unread = 0;
        } else {
            let marker = self.repo.last_read(&self.room_id, &self.user.id)?;
            self.unread = unread::unread_count(&self.messages, &self.user.id, marker);
        }
        Ok(())
    }

    /// The room's message feed, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The current draft text.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Whether the dialog is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether this user currently has a typing signal out.
    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Unread message count (always 0 while open).
    pub fn unread(&self) -> usize {
        self.unread
    }

    /// Badge text for the unread count, capped for display.
    pub fn unread_badge(&self) -> Option<String> {
        unread::unread_badge(self.unread, self.settings.unread_display_cap)
    }

    /// Indicator line for other users currently typing.
    pub fn typing_indicator(&self) -> Option<String> {
        let names: Vec<&str> = self
            .typists
            .iter()
            .filter(|t| t.user_id != self.user.id)
            .map(|t| t.user_name.as_str())
            .collect();

        match names.len() {
            0 => None,
            1 => Some(format!("{} is typing...", names[0])),
            _ => Some(format!("{} are typing...", names.join(", "))),
        }
    }

    /// Number of distinct senders in the feed.
    pub fn participant_count(&self) -> usize {
        self.messages
            .iter()
            .map(|m| m.user_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Consume a pending scroll-to-latest request.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_requested)
    }

    /// Drain queued notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// The session's timing settings.
    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    /// The session's user.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The session's room.
    pub fn room_id(&self) -> &str {
        &self.room_id
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        if !self.shut_down {
            // Unmount must not leave a typing signal behind
            let _ = self.repo.clear_typing(&self.room_id, &self.user.id);
        }
    }
}
