// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Joins the personal activity series and the grid-intensity series
//! onto a shared date axis.
//!
//! Both joins are pure functions over already-fetched snapshots. A
//! missing grid sample is a data-completeness gap, not an error: the
//! dashboard join fills it with `0`, the export join keeps it as `None`
//! so the report can distinguish "no data" from "measured zero".

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::{ActivityRecord, Category, GridIntensitySample};

/// Per-day summary of one user's emissions joined with grid intensity.
///
/// Ephemeral; recomputed on every dashboard request.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    /// Sum of the owner's `co2_kg` on this date, full precision; `0.0`
    /// when nothing was logged
    pub user_co2_kg: f64,
    /// Grid intensity for the date, `0.0` when no sample exists
    pub grid_kg_per_kwh: f64,
}

/// One per-activity row of the monthly export.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyReportRow {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: f64,
    pub co2_kg: f64,
    /// `None` when no grid sample exists for the date
    pub grid_kg_per_kwh: Option<f64>,
}

fn grid_by_date(grid: &[GridIntensitySample]) -> HashMap<NaiveDate, f64> {
    grid.iter().map(|g| (g.date, g.kg_co2_per_kwh)).collect()
}

/// Dashboard join: one `DailyAggregate` per axis date, in axis order.
///
/// Output length always equals axis length; days with no activity are
/// zero-filled rather than omitted.
pub fn join_daily(
    activities: &[ActivityRecord],
    grid: &[GridIntensitySample],
    axis: &[NaiveDate],
) -> Vec<DailyAggregate> {
    let grid = grid_by_date(grid);

    let mut co2_by_date: HashMap<NaiveDate, f64> = HashMap::new();
    for activity in activities {
        *co2_by_date.entry(activity.recorded_date()).or_insert(0.0) += activity.co2_kg;
    }

    axis.iter()
        .map(|&date| DailyAggregate {
            date,
            user_co2_kg: co2_by_date.get(&date).copied().unwrap_or(0.0),
            grid_kg_per_kwh: grid.get(&date).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Export join: one row per activity in `[start, end]` inclusive,
/// sorted by `recorded_at` ascending (stable, so same-instant entries
/// keep their input order).
pub fn join_month(
    activities: &[ActivityRecord],
    grid: &[GridIntensitySample],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<MonthlyReportRow> {
    let grid = grid_by_date(grid);

    let mut in_range: Vec<&ActivityRecord> = activities
        .iter()
        .filter(|a| {
            let date = a.recorded_date();
            date >= start && date <= end
        })
        .collect();
    in_range.sort_by_key(|a| a.recorded_at);

    in_range
        .into_iter()
        .map(|a| {
            let date = a.recorded_date();
            MonthlyReportRow {
                date,
                category: a.category,
                amount: a.amount,
                co2_kg: a.co2_kg,
                grid_kg_per_kwh: grid.get(&date).copied(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn activity(date: (i32, u32, u32), hour: u32, category: Category, co2: f64) -> ActivityRecord {
        ActivityRecord {
            user_id: "u1".to_string(),
            category,
            amount: 1.0,
            co2_kg: co2,
            recorded_at: Utc
                .with_ymd_and_hms(date.0, date.1, date.2, hour, 0, 0)
                .unwrap(),
        }
    }

    fn sample(date: (i32, u32, u32), kg: f64) -> GridIntensitySample {
        GridIntensitySample {
            date: d(date.0, date.1, date.2),
            kg_co2_per_kwh: kg,
        }
    }

    #[test]
    fn test_join_daily_length_matches_axis() {
        let axis: Vec<NaiveDate> = (17..=23).map(|day| d(2025, 5, day)).collect();
        let activities = vec![activity((2025, 5, 20), 10, Category::Driving, 0.9)];
        let grid = vec![sample((2025, 5, 20), 0.25)];

        let joined = join_daily(&activities, &grid, &axis);

        assert_eq!(joined.len(), axis.len());
        for (aggregate, date) in joined.iter().zip(&axis) {
            assert_eq!(aggregate.date, *date);
        }
    }

    #[test]
    fn test_join_daily_zero_fills_missing_days() {
        let axis = vec![d(2025, 5, 19), d(2025, 5, 20)];
        let activities = vec![activity((2025, 5, 20), 10, Category::Driving, 0.9)];

        let joined = join_daily(&activities, &[], &axis);

        assert_eq!(joined[0].user_co2_kg, 0.0);
        assert_eq!(joined[0].grid_kg_per_kwh, 0.0);
        assert_eq!(joined[1].user_co2_kg, 0.9);
    }

    #[test]
    fn test_join_daily_sums_across_categories() {
        let axis = vec![d(2025, 5, 20)];
        let activities = vec![
            activity((2025, 5, 20), 8, Category::Driving, 0.9),
            activity((2025, 5, 20), 19, Category::Electricity, 2.1),
        ];

        let joined = join_daily(&activities, &[], &axis);

        assert!((joined[0].user_co2_kg - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_join_daily_ignores_activities_outside_axis() {
        let axis = vec![d(2025, 5, 20)];
        let activities = vec![activity((2025, 5, 1), 10, Category::Driving, 5.0)];

        let joined = join_daily(&activities, &[], &axis);

        assert_eq!(joined[0].user_co2_kg, 0.0);
    }

    #[test]
    fn test_join_month_filters_and_sorts_ascending() {
        let activities = vec![
            activity((2025, 5, 20), 10, Category::Driving, 0.9),
            activity((2025, 5, 3), 10, Category::Electricity, 2.1),
            activity((2025, 6, 1), 10, Category::Driving, 1.8),
        ];

        let rows = join_month(&activities, &[], d(2025, 5, 1), d(2025, 5, 31));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, d(2025, 5, 3));
        assert_eq!(rows[1].date, d(2025, 5, 20));
    }

    #[test]
    fn test_join_month_grid_missing_is_none_not_zero() {
        let activities = vec![
            activity((2025, 5, 10), 10, Category::Driving, 0.9),
            activity((2025, 5, 11), 10, Category::Driving, 0.9),
        ];
        let grid = vec![sample((2025, 5, 10), 0.25)];

        let rows = join_month(&activities, &grid, d(2025, 5, 1), d(2025, 5, 31));

        assert_eq!(rows[0].grid_kg_per_kwh, Some(0.25));
        assert_eq!(rows[1].grid_kg_per_kwh, None);
    }

    #[test]
    fn test_join_month_stable_for_same_instant() {
        let mut first = activity((2025, 5, 10), 10, Category::Driving, 0.9);
        let mut second = activity((2025, 5, 10), 10, Category::Electricity, 2.1);
        first.amount = 1.0;
        second.amount = 2.0;

        let rows = join_month(&[first, second], &[], d(2025, 5, 1), d(2025, 5, 31));

        assert_eq!(rows[0].amount, 1.0);
        assert_eq!(rows[1].amount, 2.0);
    }
}
