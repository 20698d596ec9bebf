//! ISO-8601 helpers for [`Value::Date`](crate::Value::Date).
//!
//! Dates are rendered with millisecond precision and a `Z` suffix,
//! e.g. `1994-04-01T22:00:00.000Z`.

use alloc::string::String;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Renders a date as `YYYY-MM-DDTHH:MM:SS.sssZ`.
#[inline]
pub fn to_iso_string(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builds a date from milliseconds since the Unix epoch.
///
/// Returns `None` for non-finite or out-of-range values.
pub fn from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis.trunc() as i64).single()
}

/// Milliseconds since the Unix epoch.
#[inline]
pub fn to_millis(date: &DateTime<Utc>) -> f64 {
    date.timestamp_millis() as f64
}

/// Parses a date string.
///
/// Accepted forms, tried in order:
/// - RFC 3339 (`2018-05-01T12:50:59.534Z`, `2018-05-01T14:50:59+02:00`);
/// - a local date-time without offset, read as UTC (`2018-05-01T12:50:59`);
/// - a plain date at midnight UTC (`2018-05-01`).
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Some(date.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
