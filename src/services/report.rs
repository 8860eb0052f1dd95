// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Monthly CSV report rendering.

use chrono::{Days, Months, NaiveDate};

use crate::error::AppError;
use crate::services::join::MonthlyReportRow;

/// Fixed column order of the report body.
const COLUMNS: [&str; 5] = ["date", "category", "amount", "co2_kg", "grid_kg_per_kwh"];

/// Resolve `(year, month)` to the inclusive first/last day of the month.
///
/// Fails with `InvalidRange` when the pair is not a valid calendar
/// month.
pub fn month_range(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), AppError> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::InvalidRange(format!("{}-{} is not a valid month", year, month)))?;
    // First day of the next month, minus one day. Checked because the
    // final month of the supported calendar has no next month.
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .ok_or_else(|| {
            AppError::InvalidRange(format!("{}-{} is outside the supported calendar", year, month))
        })?;
    Ok((start, end))
}

/// Filename the export endpoint attaches the report as.
pub fn report_filename(year: i32, month: u32) -> String {
    format!("carbon-coach-{:04}-{:02}.csv", year, month)
}

/// Render a month of joined rows as the downloadable report.
///
/// Layout: title line, `User:` line, blank line, CSV header, one CSV
/// line per row. A missing grid sample renders as an empty field so a
/// reader can tell "no data" from "measured zero".
pub fn render(rows: &[MonthlyReportRow], owner_display_name: &str) -> String {
    let mut out = String::new();
    out.push_str("Carbon Coach Monthly Report\n");
    out.push_str(&format!("User: {}\n", escape_field(owner_display_name)));
    out.push('\n');
    out.push_str(&COLUMNS.join(","));
    out.push('\n');

    for row in rows {
        let grid = match row.grid_kg_per_kwh {
            Some(kg) => format!("{:.2}", kg),
            None => String::new(),
        };
        let line = [
            row.date.format("%Y-%m-%d").to_string(),
            escape_field(row.category.as_str()),
            row.amount.to_string(),
            format!("{:.2}", row.co2_kg),
            grid,
        ]
        .join(",");
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Quote a field only when it would break the tabular format.
///
/// None of the defined fields contain a delimiter under normal
/// operation, but a hostile display name must not corrupt the file.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
