// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily grid carbon-intensity sample from the national feed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day's average grid carbon intensity.
///
/// Stored in Firestore with the ISO date string as the document ID, so
/// there is at most one sample per day and re-ingestion for an existing
/// date overwrites the prior value (last-write-wins, no history).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridIntensitySample {
    /// Calendar day the sample covers (unique key)
    pub date: NaiveDate,
    /// Average intensity for that day, kg CO2 per kWh
    pub kg_co2_per_kwh: f64,
}

impl GridIntensitySample {
    /// Document ID used for storage; identical dates collapse to one row.
    pub fn doc_id(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_id_is_iso_date() {
        let sample = GridIntensitySample {
            date: NaiveDate::from_ymd_opt(2025, 5, 23).unwrap(),
            kg_co2_per_kwh: 0.25,
        };
        assert_eq!(sample.doc_id(), "2025-05-23");
    }
}
