//! Date/time utilities for PDFRooms.
//!
//! Typing signals and read markers are persisted as epoch milliseconds;
//! the helpers here convert to and from that wire format and render
//! message timestamps for display.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

/// Convert a datetime to epoch milliseconds.
pub fn to_millis(dt: &DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

/// Convert epoch milliseconds back to a datetime.
///
/// Returns `None` for values outside the representable range.
pub fn from_millis(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

/// Format a message timestamp for display in the given timezone.
///
/// Timestamps within the last 24 hours render as time-of-day; older ones
/// include the month and day. An unknown timezone falls back to UTC.
pub fn format_timestamp(dt: &DateTime<Utc>, now: &DateTime<Utc>, timezone: &str) -> String {
    let tz: Tz = timezone.parse().unwrap_or(chrono_tz::UTC);
    let local = dt.with_timezone(&tz);

    if now.signed_duration_since(*dt) < Duration::hours(24) {
        local.format("%H:%M").to_string()
    } else {
        local.format("%b %-d %H:%M").to_string()
    }
}
