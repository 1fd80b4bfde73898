//! Unread-count computation against a read marker.

use crate::datetime;

use super::types::ChatMessage;

/// Count messages from other users newer than the read marker.
///
/// The marker is an epoch-millisecond timestamp; a message counts only
/// when strictly newer. The viewer's own messages never count.
pub fn unread_count(messages: &[ChatMessage], viewer_id: &str, last_read_ms: i64) -> usize {
    messages
        .iter()
        .filter(|m| m.user_id != viewer_id && datetime::to_millis(&m.timestamp) > last_read_ms)
        .count()
}

/// Display string for an unread badge.
///
/// Zero renders as `None` (no badge); counts above the cap render as
/// "{cap}+".
pub fn unread_badge(count: usize, cap: usize) -> Option<String> {
    if count == 0 {
        None
    } else if count > cap {
        Some(format!("{cap}+"))
    } else {
        Some(count.to_string())
    }
}
