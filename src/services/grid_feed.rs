// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Grid-operator feed client and daily ingestion.
//!
//! The operator's dashboard API reports sub-daily carbon intensity in
//! grams CO2 per kWh. Ingestion averages one day's readings into a
//! single kg-per-kWh sample and upserts it keyed by date, so a rerun
//! for the same day simply overwrites the prior value.

use chrono::{Days, NaiveDate};
use serde::Deserialize;

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::GridIntensitySample;
use crate::time_utils::today_utc;

/// Client for the grid-operator intensity feed.
#[derive(Clone)]
pub struct GridFeedService {
    http: reqwest::Client,
    base_url: String,
    region: String,
}

/// Feed response envelope.
#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(rename = "Rows")]
    rows: Option<Vec<FeedRow>>,
}

/// One sub-daily reading, grams CO2 per kWh.
#[derive(Debug, Deserialize)]
struct FeedRow {
    #[serde(rename = "Value")]
    value: f64,
}

impl GridFeedService {
    pub fn new(base_url: &str, region: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.to_string(),
            region: region.to_string(),
        }
    }

    /// Fetch one day's readings and average them into kg CO2 per kWh.
    pub async fn fetch_day(&self, date: NaiveDate) -> Result<f64, AppError> {
        // The feed wants "23-May-2025" style dates
        let formatted = date.format("%d-%b-%Y").to_string();

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("region", self.region.as_str()),
                ("chartType", "co2"),
                ("dateRange", "day"),
                ("dateFrom", formatted.as_str()),
                ("dateTo", formatted.as_str()),
                ("areas", "co2intensity,co2intensityforecast"),
            ])
            .send()
            .await
            .map_err(|e| AppError::GridFeed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::GridFeed(format!(
                "Feed returned HTTP {}",
                response.status()
            )));
        }

        let feed: FeedResponse = response
            .json()
            .await
            .map_err(|e| AppError::GridFeed(format!("Malformed feed response: {}", e)))?;

        let rows = match feed.rows {
            Some(rows) if !rows.is_empty() => rows,
            _ => {
                return Err(AppError::GridFeed(format!(
                    "Feed returned no readings for {}",
                    date
                )))
            }
        };

        let sum_grams: f64 = rows.iter().map(|r| r.value).sum();
        Ok(sum_grams / rows.len() as f64 / 1000.0)
    }

    /// Fetch and store the sample for `date` (last-write-wins upsert).
    pub async fn ingest_day(&self, db: &FirestoreDb, date: NaiveDate) -> Result<GridIntensitySample, AppError> {
        let kg_co2_per_kwh = self.fetch_day(date).await?;

        let sample = GridIntensitySample {
            date,
            kg_co2_per_kwh,
        };
        db.upsert_grid_sample(&sample).await?;

        tracing::info!(date = %date, kg_co2_per_kwh, "Stored grid intensity sample");

        Ok(sample)
    }

    /// The date the scheduled job ingests when none is given.
    ///
    /// The feed publishes complete days only, so the default is
    /// yesterday in UTC.
    pub fn default_ingest_date() -> NaiveDate {
        today_utc() - Days::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_date_format() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 23).unwrap();
        assert_eq!(date.format("%d-%b-%Y").to_string(), "23-May-2025");
    }

    #[test]
    fn test_feed_response_parsing() {
        let json = r#"{"Rows":[{"Value":250.0,"EffectiveTime":"23-May-2025 00:15"},{"Value":350.0}]}"#;
        let feed: FeedResponse = serde_json::from_str(json).unwrap();
        let rows = feed.rows.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value, 250.0);
    }

    #[test]
    fn test_feed_response_without_rows() {
        let feed: FeedResponse = serde_json::from_str(r#"{"Status":"error"}"#).unwrap();
        assert!(feed.rows.is_none());
    }
}
