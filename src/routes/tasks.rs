// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Task handler routes for scheduled jobs.
//!
//! These endpoints are called by Cloud Scheduler, not directly by
//! users. Cloud Run strips the scheduler headers from external
//! requests, so their presence guarantees internal origin.

use crate::config::GRID_INGEST_JOB_NAME;
use crate::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// Task handler routes (called by Cloud Scheduler).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/tasks/ingest-grid", post(ingest_grid))
}

#[derive(Debug, Default, Deserialize)]
pub struct IngestGridPayload {
    /// Day to ingest; defaults to yesterday (UTC), the most recent
    /// complete day the feed publishes
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Fetch one day of the grid feed and upsert its daily average.
///
/// Re-running for a day that already has a sample overwrites it; the
/// job is safe to retry.
async fn ingest_grid(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
    Json(payload): Json<IngestGridPayload>,
) -> StatusCode {
    // Security check: ensure the request comes from our scheduler job
    let job_header = headers.get("x-cloudscheduler-jobname");
    let is_valid_job = job_header
        .and_then(|h| h.to_str().ok())
        .map(|name| name == GRID_INGEST_JOB_NAME)
        .unwrap_or(false);

    if !is_valid_job {
        tracing::warn!(
            header = ?job_header,
            "Blocked unauthorized access to ingest_grid"
        );
        return StatusCode::FORBIDDEN;
    }

    let date = payload
        .date
        .unwrap_or_else(crate::services::GridFeedService::default_ingest_date);

    tracing::info!(date = %date, "Ingesting grid intensity from scheduler");

    match state.grid_feed.ingest_day(&state.db, date).await {
        Ok(sample) => {
            tracing::info!(
                date = %date,
                kg_co2_per_kwh = sample.kg_co2_per_kwh,
                "Grid ingestion complete"
            );
            StatusCode::OK
        }
        Err(e) => {
            // Non-2xx makes the scheduler retry later
            tracing::error!(date = %date, error = %e, "Grid ingestion failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
