// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.
//!
//! Every request runs its own fetch-then-compute cycle over an
//! owner-scoped snapshot; nothing derived here is ever persisted.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ActivityRecord, Category};
use crate::services::{aggregate, join, report, window};
use crate::time_utils::{format_utc_rfc3339, today_utc};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/activities", get(get_activities).post(log_activity))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/export", get(export_month))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
pub struct UserResponse {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(UserResponse {
        user_id: profile.user_id,
        email: profile.email,
        display_name: profile.display_name,
    }))
}

// ─── Activities ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct ActivityResponse {
    pub category: Category,
    pub amount: f64,
    pub co2_kg: f64,
    pub recorded_at: String,
}

impl From<ActivityRecord> for ActivityResponse {
    fn from(record: ActivityRecord) -> Self {
        Self {
            category: record.category,
            amount: record.amount,
            co2_kg: record.co2_kg,
            recorded_at: format_utc_rfc3339(record.recorded_at),
        }
    }
}

/// Get all of the user's activities, newest first.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<ActivityResponse>>> {
    let activities = state.db.get_activities_for_user(&user.user_id).await?;

    Ok(Json(
        activities.into_iter().map(ActivityResponse::from).collect(),
    ))
}

#[derive(Deserialize, Validate)]
pub struct LogActivityRequest {
    pub category: Category,
    /// km for driving, kWh for electricity
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
    /// Defaults to now (UTC) when omitted
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Log a new activity.
///
/// The CO2 mass is computed once here, before the write; the stored
/// value is immutable afterwards. A rejected amount writes nothing.
async fn log_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<LogActivityRequest>,
) -> Result<(StatusCode, Json<ActivityResponse>)> {
    payload
        .validate()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let co2_kg = state.emissions.compute(payload.category, payload.amount)?;

    let record = ActivityRecord {
        user_id: user.user_id.clone(),
        category: payload.category,
        amount: payload.amount,
        co2_kg,
        recorded_at: payload.recorded_at.unwrap_or_else(Utc::now),
    };
    state.db.add_activity(&record).await?;

    tracing::info!(
        user_id = %user.user_id,
        category = %record.category,
        co2_kg,
        "Activity logged"
    );

    Ok((StatusCode::CREATED, Json(ActivityResponse::from(record))))
}

// ─── Dashboard ───────────────────────────────────────────────

#[derive(Deserialize)]
struct DashboardQuery {
    /// Anchor date (YYYY-MM-DD); the window is the 7 days ending here.
    /// Defaults to today (UTC).
    date: Option<String>,
}

#[derive(Serialize)]
pub struct DashboardDay {
    pub date: NaiveDate,
    pub user_co2_kg: f64,
    pub grid_kg_per_kwh: f64,
}

#[derive(Serialize)]
pub struct DashboardResponse {
    pub days: Vec<DashboardDay>,
    pub selected_day_co2: f64,
    pub weekly_avg: f64,
    pub by_category: HashMap<Category, f64>,
}

fn parse_anchor_date(raw: Option<&str>) -> Result<NaiveDate> {
    match raw {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidRange(format!("'{}' is not a YYYY-MM-DD date", raw))),
        None => Ok(today_utc()),
    }
}

/// 7-day dashboard ending on the selected date.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>> {
    let anchor = parse_anchor_date(params.date.as_deref())?;
    let axis = window::build_window(anchor)?;

    let activities = state
        .db
        .get_activities_in_range(&user.user_id, axis[0], anchor)
        .await?;
    let grid = state.db.get_grid_samples(axis[0], anchor).await?;

    let daily = join::join_daily(&activities, &grid, &axis);
    let summary = aggregate::summarize(&daily, anchor, &activities);

    let days = daily
        .into_iter()
        .map(|day| DashboardDay {
            date: day.date,
            user_co2_kg: aggregate::round2(day.user_co2_kg),
            grid_kg_per_kwh: aggregate::round2(day.grid_kg_per_kwh),
        })
        .collect();

    Ok(Json(DashboardResponse {
        days,
        selected_day_co2: summary.selected_day_co2,
        weekly_avg: summary.weekly_avg,
        by_category: summary.by_category,
    }))
}

// ─── Monthly Export ──────────────────────────────────────────

#[derive(Deserialize)]
struct ExportQuery {
    year: i32,
    month: u32,
}

/// Download one month of activities as CSV.
async fn export_month(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ExportQuery>,
) -> Result<impl IntoResponse> {
    let (start, end) = report::month_range(params.year, params.month)?;

    let activities = state
        .db
        .get_activities_in_range(&user.user_id, start, end)
        .await?;
    let grid = state.db.get_grid_samples(start, end).await?;
    let display_name = state
        .db
        .get_user(&user.user_id)
        .await?
        .map(|profile| profile.display_name)
        .unwrap_or_else(|| user.user_id.clone());

    let rows = join::join_month(&activities, &grid, start, end);
    let body = report::render(&rows, &display_name);

    tracing::info!(
        user_id = %user.user_id,
        year = params.year,
        month = params.month,
        rows = rows.len(),
        "Monthly report exported"
    );

    let filename = report::report_filename(params.year, params.month);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    ))
}
