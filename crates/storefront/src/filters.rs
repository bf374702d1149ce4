//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

const GERMAN_MONTHS: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash for main.css.
///
/// The hash is computed at build time from the CSS file content.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Returns the content hash for checkout.js.
///
/// Usage in templates: `{{ ""|js_hash }}`
#[askama::filter_fn]
pub fn js_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("JS_HASH"))
}

/// Format a timestamp as shown on order pages.
///
/// RFC 3339 timestamps keep the offset they were sent with. Date-only values
/// render without a time; anything unparsable is returned as given.
#[must_use]
pub fn format_german_datetime(raw: &str) -> String {
    let raw = raw.trim();

    let naive = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"));

    if let Ok(dt) = naive {
        return format!(
            "{}, {:02}:{:02}",
            german_day(dt.date()),
            dt.hour(),
            dt.minute()
        );
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_or_else(|_| raw.to_string(), german_day)
}

fn german_day(date: NaiveDate) -> String {
    let month = GERMAN_MONTHS
        .get(date.month0() as usize)
        .copied()
        .unwrap_or_default();
    format!("{}. {} {}", date.day(), month, date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339_keeps_offset() {
        assert_eq!(
            format_german_datetime("2025-03-05T14:30:00Z"),
            "5. März 2025, 14:30"
        );
        assert_eq!(
            format_german_datetime("2025-12-24T09:05:00.000+01:00"),
            "24. Dezember 2025, 09:05"
        );
    }

    #[test]
    fn test_naive_and_date_only() {
        assert_eq!(
            format_german_datetime("2024-01-15 08:00:00"),
            "15. Januar 2024, 08:00"
        );
        assert_eq!(format_german_datetime("2024-01-01"), "1. Januar 2024");
    }

    #[test]
    fn test_unparsable_is_shown_verbatim() {
        assert_eq!(format_german_datetime("morgen"), "morgen");
    }
}
