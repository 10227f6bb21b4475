//! Time handling for the NS API.
//!
//! The API reports timestamps as `2012-02-27T15:32:00+0100`, travel times as
//! `H:MM` strings and delays as ISO 8601 minute durations (`PT5M`). This
//! module parses all three and produces the canonical timestamp form sent
//! back upstream.

use chrono::{DateTime, FixedOffset};

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Upstream timestamp format, with a colon-less UTC offset.
const NS_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Canonical timestamp format used in requests.
const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Parse a timestamp as sent by the API, or an RFC 3339 timestamp.
///
/// # Examples
///
/// ```
/// use ns_trains::domain::parse_date_time;
///
/// let t = parse_date_time("2012-02-27T15:32:00+0100").unwrap();
/// assert_eq!(t.to_rfc3339(), "2012-02-27T15:32:00+01:00");
///
/// assert!(parse_date_time("2012-02-27T15:32:00+01:00").is_ok());
/// assert!(parse_date_time("27-02-2012 15:32").is_err());
/// ```
pub fn parse_date_time(s: &str) -> Result<DateTime<FixedOffset>, TimeError> {
    let s = s.trim();
    DateTime::parse_from_str(s, NS_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map_err(|_| TimeError::new("expected YYYY-MM-DDTHH:MM:SS with a UTC offset"))
}

/// Render a timestamp in the canonical `YYYY-MM-DDTHH:MM:SS+HH:MM` form.
pub fn format_date_time(t: &DateTime<FixedOffset>) -> String {
    t.format(CANONICAL_FORMAT).to_string()
}

/// Convert an `H:MM` travel time to seconds.
///
/// The hour part may have any number of digits; minutes are always two
/// digits below 60.
///
/// # Examples
///
/// ```
/// use ns_trains::domain::parse_hours_minutes;
///
/// assert_eq!(parse_hours_minutes("01:45").unwrap(), 6300);
/// assert_eq!(parse_hours_minutes("0:07").unwrap(), 420);
/// assert!(parse_hours_minutes("1:75").is_err());
/// ```
pub fn parse_hours_minutes(s: &str) -> Result<u32, TimeError> {
    let (hours, minutes) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| TimeError::new("expected H:MM format"))?;

    if hours.is_empty() || !hours.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::new("invalid hour digits"));
    }
    if minutes.len() != 2 || !minutes.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::new("invalid minute digits"));
    }

    let hours: u32 = hours
        .parse()
        .map_err(|_| TimeError::new("hour out of range"))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| TimeError::new("invalid minute digits"))?;
    if minutes > 59 {
        return Err(TimeError::new("minute must be 0-59"));
    }

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60))
        .ok_or_else(|| TimeError::new("hour out of range"))
}

/// Extract the minutes from a `PT<minutes>M` delay.
///
/// Only one to three digits are accepted. Anything else (hours, seconds,
/// free text) yields `None`.
pub fn parse_delay_minutes(s: &str) -> Option<u32> {
    let digits = s.strip_prefix("PT")?.strip_suffix('M')?;
    if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
