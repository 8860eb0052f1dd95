// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logged activity model for storage and API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Closed set of activity categories the tracker understands.
///
/// The unit of `amount` depends on the category: kilometers for
/// `Driving`, kilowatt-hours for `Electricity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Driving,
    Electricity,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Driving => "driving",
            Category::Electricity => "electricity",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored activity record in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Owner's user ID; records are never shared between users
    pub user_id: String,
    /// Activity category
    pub category: Category,
    /// Amount in category units (km or kWh); always positive
    pub amount: f64,
    /// CO2 mass in kg, computed once at creation and never recomputed.
    /// Factor-table changes must not retroactively alter past records.
    pub co2_kg: f64,
    /// When the activity happened (UTC)
    pub recorded_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Calendar date of the record, truncated in UTC.
    ///
    /// This is the join key used by the dashboard and export joins.
    pub fn recorded_date(&self) -> NaiveDate {
        crate::time_utils::truncate_to_date(self.recorded_at)
    }
}
