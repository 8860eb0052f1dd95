// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard aggregates derived from a joined 7-day window.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::{ActivityRecord, Category};
use crate::services::join::DailyAggregate;
use crate::services::window::WINDOW_DAYS;

/// The three dashboard metrics, rounded for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// CO2 logged on the selected day, kg
    pub selected_day_co2: f64,
    /// Mean daily CO2 across the window; the divisor is always 7, so
    /// days without activity pull the mean down
    pub weekly_avg: f64,
    /// Total CO2 per category over the window. Categories with no
    /// activity in the window are omitted, not zero-filled.
    pub by_category: HashMap<Category, f64>,
}

/// Derive the dashboard metrics for a window.
///
/// `daily` is the joined window (one entry per axis date) and
/// `activities` is the same owner-scoped snapshot the join consumed.
/// Sums run at full precision; rounding to 2 decimals happens once at
/// the end.
pub fn summarize(
    daily: &[DailyAggregate],
    selected_date: NaiveDate,
    activities: &[ActivityRecord],
) -> DashboardSummary {
    let selected_day_co2 = daily
        .iter()
        .find(|aggregate| aggregate.date == selected_date)
        .map(|aggregate| aggregate.user_co2_kg)
        .unwrap_or(0.0);

    let total: f64 = daily.iter().map(|aggregate| aggregate.user_co2_kg).sum();
    let weekly_avg = total / WINDOW_DAYS as f64;

    let window_dates: Vec<NaiveDate> = daily.iter().map(|aggregate| aggregate.date).collect();
    let mut by_category: HashMap<Category, f64> = HashMap::new();
    for activity in activities {
        if window_dates.contains(&activity.recorded_date()) {
            *by_category.entry(activity.category).or_insert(0.0) += activity.co2_kg;
        }
    }
    for sum in by_category.values_mut() {
        *sum = round2(*sum);
    }

    DashboardSummary {
        selected_day_co2: round2(selected_day_co2),
        weekly_avg: round2(weekly_avg),
        by_category,
    }
}

/// Round half-away-from-zero to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::join::join_daily;
    use crate::services::window::build_window;
    use chrono::{TimeZone, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn activity(date: (i32, u32, u32), category: Category, co2: f64) -> ActivityRecord {
        ActivityRecord {
            user_id: "u1".to_string(),
            category,
            amount: 1.0,
            co2_kg: co2,
            recorded_at: Utc
                .with_ymd_and_hms(date.0, date.1, date.2, 12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_weekly_avg_divides_by_seven() {
        // One day with 2.10 kg, six empty days: mean is 2.10 / 7 = 0.30
        let anchor = d(2025, 5, 23);
        let window = build_window(anchor).unwrap();
        let activities = vec![activity((2025, 5, 20), Category::Electricity, 2.1)];
        let daily = join_daily(&activities, &[], &window);

        let summary = summarize(&daily, anchor, &activities);

        assert_eq!(summary.weekly_avg, 0.30);
    }

    #[test]
    fn test_selected_day_total() {
        let anchor = d(2025, 5, 23);
        let window = build_window(anchor).unwrap();
        let activities = vec![
            activity((2025, 5, 23), Category::Driving, 0.9),
            activity((2025, 5, 23), Category::Electricity, 2.1),
            activity((2025, 5, 22), Category::Driving, 1.8),
        ];
        let daily = join_daily(&activities, &[], &window);

        let summary = summarize(&daily, anchor, &activities);

        assert_eq!(summary.selected_day_co2, 3.0);
    }

    #[test]
    fn test_selected_date_outside_window_is_zero() {
        let anchor = d(2025, 5, 23);
        let window = build_window(anchor).unwrap();
        let activities = vec![activity((2025, 5, 23), Category::Driving, 0.9)];
        let daily = join_daily(&activities, &[], &window);

        let summary = summarize(&daily, d(2025, 1, 1), &activities);

        assert_eq!(summary.selected_day_co2, 0.0);
    }

    #[test]
    fn test_breakdown_omits_absent_categories() {
        let anchor = d(2025, 5, 23);
        let window = build_window(anchor).unwrap();
        let activities = vec![activity((2025, 5, 22), Category::Electricity, 2.1)];
        let daily = join_daily(&activities, &[], &window);

        let summary = summarize(&daily, anchor, &activities);

        assert_eq!(summary.by_category.get(&Category::Electricity), Some(&2.1));
        assert!(!summary.by_category.contains_key(&Category::Driving));
    }

    #[test]
    fn test_breakdown_excludes_activities_outside_window() {
        let anchor = d(2025, 5, 23);
        let window = build_window(anchor).unwrap();
        let activities = vec![
            activity((2025, 5, 22), Category::Driving, 0.9),
            activity((2025, 4, 1), Category::Driving, 99.0),
        ];
        let daily = join_daily(&activities, &[], &window);

        let summary = summarize(&daily, anchor, &activities);

        assert_eq!(summary.by_category.get(&Category::Driving), Some(&0.9));
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let anchor = d(2025, 5, 23);
        let window = build_window(anchor).unwrap();
        let activities = vec![
            activity((2025, 5, 21), Category::Driving, 1.234),
            activity((2025, 5, 22), Category::Electricity, 0.567),
        ];
        let daily = join_daily(&activities, &[], &window);

        let first = summarize(&daily, anchor, &activities);
        let second = summarize(&daily, anchor, &activities);

        assert_eq!(first, second);
    }

    #[test]
    fn test_rounding_happens_after_summation() {
        let anchor = d(2025, 5, 23);
        let window = build_window(anchor).unwrap();
        // Three entries of 0.005 sum to 0.015 -> 0.02. Rounding each
        // entry before summing would compound to 0.03.
        let activities = vec![
            activity((2025, 5, 21), Category::Driving, 0.005),
            activity((2025, 5, 21), Category::Driving, 0.005),
            activity((2025, 5, 21), Category::Driving, 0.005),
        ];
        let daily = join_daily(&activities, &[], &window);

        let summary = summarize(&daily, d(2025, 5, 21), &activities);

        assert_eq!(summary.selected_day_co2, 0.02);
        assert_eq!(summary.weekly_avg, 0.0);
    }
}
