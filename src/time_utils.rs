// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Today's date in the server's local zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Date as shown on the dashboard (`5.6.2023.`).
pub fn format_date_sr(date: NaiveDate) -> String {
    date.format("%-d.%-m.%Y.").to_string()
}

/// Wall-clock time as shown on the dashboard (`18:05`).
pub fn format_time_sr(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%H:%M").to_string()
}

/// Bounds used to select one calendar day of food-log entries.
///
/// The upper bound is exclusive and stops at `23:59:59`.
pub fn day_bounds(date: NaiveDate) -> (String, String) {
    let day = date.format("%Y-%m-%d");
    (format!("{day}T00:00:00"), format!("{day}T23:59:59"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_date_sr() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 5).unwrap();
        assert_eq!(format_date_sr(date), "5.6.2023.");
    }

    #[test]
    fn test_day_bounds() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let (start, end) = day_bounds(date);
        assert_eq!(start, "2024-03-09T00:00:00");
        assert_eq!(end, "2024-03-09T23:59:59");
    }

    #[test]
    fn test_format_utc_rfc3339() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_utc_rfc3339(ts), "2024-01-02T03:04:05Z");
    }
}
