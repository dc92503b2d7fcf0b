//! Date coercion for front-matter values.
//!
//! Front-matter dates arrive as loosely formatted strings (or epoch numbers)
//! and are normalized to a UTC instant.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Date-time layouts without an offset, read as UTC.
///
/// `%.f` is optional when parsing, so fractional seconds may be omitted.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

/// Date-only layouts, read as midnight UTC.
///
/// Day-first and month-first numeric forms (`01/02/2024`) are not accepted;
/// the month must either follow the year or be spelled out.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%a %b %d %Y",
];

/// Parse a date/time string into a UTC instant.
///
/// Accepted forms, tried in order:
/// - RFC 3339 (`2024-01-15T08:30:00+07:00`, `2024-01-15T01:30:00Z`)
/// - dates (`2024-01-15`, `2024/01/15`, `Jul 08 2022`, `January 15, 2024`,
///   `15 Jan 2024`), at midnight UTC
/// - date-times without offset (`2024-01-15T08:30`, `2024/01/15 08:30:00`)
/// - RFC 2822 (`Mon, 15 Jan 2024 08:30:00 +0000`)
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Interpret a number as milliseconds since the Unix epoch.
pub fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// Canonical string form: RFC 3339, millisecond precision, `Z` suffix.
///
/// `2024-01-15` → `2024-01-15T00:00:00.000Z`
pub fn to_iso(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
