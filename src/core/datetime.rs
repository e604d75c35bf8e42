//! Date and time helpers for persisted records.
//!
//! The persisted timer record stores instants as epoch milliseconds and the
//! work day as a human-readable date string like `Fri Mar 15 2024`.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Format used for the `lastWorkDate` key.
const WORK_DATE_FORMAT: &str = "%a %b %d %Y";

/// Render a work day for storage.
#[must_use]
pub fn format_work_date(date: NaiveDate) -> String {
    date.format(WORK_DATE_FORMAT).to_string()
}

/// Parse a stored work day.
///
/// Also accepts ISO `YYYY-MM-DD`. Returns `None` for anything else.
#[must_use]
pub fn parse_work_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, WORK_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

/// Convert an instant to epoch milliseconds.
#[must_use]
pub fn to_epoch_millis(instant: DateTime<Utc>) -> i64 {
    instant.timestamp_millis()
}

/// Convert epoch milliseconds to an instant, if representable.
#[must_use]
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}

/// Whole seconds from `earlier` to `later`, clamped at zero.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn elapsed_whole_seconds(earlier: DateTime<Utc>, later: DateTime<Utc>) -> u64 {
    let millis = later.signed_duration_since(earlier).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis / 1000) as u64
    }
}
