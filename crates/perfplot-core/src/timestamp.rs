//! Timestamp parsing for the index column.
//!
//! Order: configured chrono formats, RFC 3339, bare `%Y-%m-%d`, then (when
//! enabled) all-digit text as Unix epoch seconds.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::config::ParseConfig;

/// Parse `text` into a naive date-time, or `None` if no accepted form fits.
pub fn parse_timestamp(text: &str, config: &ParseConfig) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for format in &config.timestamp_formats {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, format) {
            return Some(ts);
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.naive_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    if config.epoch_seconds && text.bytes().all(|b| b.is_ascii_digit()) {
        let secs: i64 = text.parse().ok()?;
        return DateTime::from_timestamp(secs, 0).map(|ts| ts.naive_utc());
    }

    None
}
