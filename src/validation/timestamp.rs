//! Parsing of wall-clock timestamps as they arrive from event forms.
//!
//! Form inputs carry either a full RFC 3339 value (`2026-03-01T19:00:00+07:00`)
//! or a naive `datetime-local` value (`2026-03-01T19:00`). Naive values are
//! interpreted in a caller-supplied UTC offset, which stands in for the
//! browser's local time zone.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Naive layouts accepted after RFC 3339 parsing fails.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a wall-clock timestamp into a UTC instant.
///
/// Returns `None` when the value matches none of the accepted layouts.
#[must_use]
pub fn parse_wall_clock(raw: &str, local_offset: FixedOffset) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| local_offset.from_local_datetime(&naive).single())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses a UTC offset such as `+07:00`, `-0330` or `Z`.
#[must_use]
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match raw.split_at_checked(1)? {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hh, mm) = digits.split_at_checked(2)?;
    let hours: i32 = hh.parse().ok()?;
    let minutes: i32 = mm.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
