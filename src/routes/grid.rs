// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public grid-intensity routes.
//!
//! Grid data is national, not user-scoped, so no authentication is
//! required to read it.

use crate::error::{AppError, Result};
use crate::time_utils::today_utc;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const MAX_RANGE_DAYS: u32 = 366;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/grid-intensity", get(get_grid_intensity))
}

#[derive(Deserialize)]
struct GridQuery {
    /// Trailing number of days, default 7
    range: Option<u32>,
    /// Last day of the range (YYYY-MM-DD), default today (UTC)
    end: Option<String>,
}

#[derive(Serialize)]
pub struct GridSampleResponse {
    pub date: NaiveDate,
    pub kg_co2_per_kwh: f64,
}

/// Get daily grid-intensity samples for a trailing date range,
/// ascending. Days without a stored sample are simply absent.
async fn get_grid_intensity(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GridQuery>,
) -> Result<Json<Vec<GridSampleResponse>>> {
    let range = params.range.unwrap_or(7);
    if range == 0 || range > MAX_RANGE_DAYS {
        return Err(AppError::InvalidRange(format!(
            "range must be between 1 and {}",
            MAX_RANGE_DAYS
        )));
    }

    let end = match params.end.as_deref() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidRange(format!("'{}' is not a YYYY-MM-DD date", raw)))?,
        None => today_utc(),
    };
    let from = end
        .checked_sub_days(Days::new(u64::from(range) - 1))
        .ok_or_else(|| {
            AppError::InvalidRange("range extends past the start of the calendar".to_string())
        })?;

    let samples = state.db.get_grid_samples(from, end).await?;

    Ok(Json(
        samples
            .into_iter()
            .map(|sample| GridSampleResponse {
                date: sample.date,
                kg_co2_per_kwh: sample.kg_co2_per_kwh,
            })
            .collect(),
    ))
}
