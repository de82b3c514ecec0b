//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, FixedOffset, Utc};

/// Offset used when rendering timestamps for display (JST, UTC+9).
const DISPLAY_OFFSET_SECS: i32 = 9 * 3600;

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        now_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// Get current Unix timestamp (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn to_display_zone(timestamp_millis: i64) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(DISPLAY_OFFSET_SECS)?;
    DateTime::from_timestamp_millis(timestamp_millis).map(|dt| dt.with_timezone(&offset))
}

/// Convert Unix timestamp (milliseconds) to RFC 3339 format in JST.
///
/// Returns an empty string when the timestamp is outside chrono's range.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    to_display_zone(timestamp_millis)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

/// Split a Unix timestamp (milliseconds) into the `(date, time)` pair shown
/// next to chat messages: `("%Y-%m-%d", "%H:%M:%S")` in JST.
pub fn timestamp_to_display(timestamp_millis: i64) -> (String, String) {
    match to_display_zone(timestamp_millis) {
        Some(dt) => (
            dt.format("%Y-%m-%d").to_string(),
            dt.format("%H:%M:%S").to_string(),
        ),
        None => (String::new(), String::new()),
    }
}
