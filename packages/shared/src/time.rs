//! Time helpers.
//!
//! All timestamps in CampusLink are Unix epoch milliseconds in UTC. Scheduled
//! times cross timezones (recruiters, colleges, and students rarely share
//! one), so the wire format is RFC 3339 and the stored format is UTC millis.

use chrono::{DateTime, Utc};

/// Get the current Unix timestamp in UTC (milliseconds).
pub fn now_utc_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Render a UTC millisecond timestamp as an RFC 3339 string.
///
/// Falls back to the epoch for out-of-range values rather than panicking.
pub fn timestamp_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339()
}

/// Parse an RFC 3339 string into UTC milliseconds.
pub fn parse_rfc3339(value: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).timestamp_millis())
}
