// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trailing 7-day date window used by the dashboard.

use chrono::{Days, NaiveDate};

use crate::error::AppError;

/// Number of days in a dashboard window.
pub const WINDOW_DAYS: u64 = 7;

/// Build the 7-day window ending on `anchor`.
///
/// Returns `[anchor - 6d, ..., anchor]`, strictly ascending, always
/// exactly 7 calendar dates. Arithmetic is on calendar dates only, so
/// month/year boundaries and DST shifts cannot skip or repeat a day.
/// Anchors within 6 days of the calendar minimum fail with
/// `InvalidRange` rather than overflowing.
pub fn build_window(anchor: NaiveDate) -> Result<Vec<NaiveDate>, AppError> {
    (0..WINDOW_DAYS)
        .rev()
        .map(|back| {
            anchor.checked_sub_days(Days::new(back)).ok_or_else(|| {
                AppError::InvalidRange(format!("{} is too early for a 7-day window", anchor))
            })
        })
        .collect()
}
