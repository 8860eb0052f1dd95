// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting and truncation.
//!
//! All day arithmetic in this crate happens on calendar dates after
//! truncating timestamps against UTC, the zone `recorded_at` is stored
//! in. Truncating against the local machine clock would shift entries
//! logged near midnight into the wrong day.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Truncate a UTC timestamp to its calendar date.
pub fn truncate_to_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Today's calendar date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate_keeps_utc_day() {
        // 23:52 UTC stays on the 23rd regardless of any local offset
        let ts = Utc.with_ymd_and_hms(2025, 5, 23, 23, 52, 0).unwrap();
        assert_eq!(
            truncate_to_date(ts),
            NaiveDate::from_ymd_opt(2025, 5, 23).unwrap()
        );
    }

    #[test]
    fn test_format_utc_rfc3339() {
        let ts = Utc.with_ymd_and_hms(2025, 5, 23, 14, 52, 0).unwrap();
        assert_eq!(format_utc_rfc3339(ts), "2025-05-23T14:52:00Z");
    }
}
