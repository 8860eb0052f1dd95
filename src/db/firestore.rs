// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage, read-only here)
//! - Activities (one document per logged activity)
//! - Grid intensity (one document per calendar day)

use chrono::NaiveDate;

use crate::db::collections;
use crate::error::AppError;
use crate::models::{ActivityRecord, GridIntensitySample, User};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing async-trait
        // or a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user profile by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Store a new activity record under a generated document ID.
    pub async fn add_activity(&self, activity: &ActivityRecord) -> Result<(), AppError> {
        let _: ActivityRecord = self
            .get_client()?
            .fluent()
            .insert()
            .into(collections::ACTIVITIES)
            .generate_document_id()
            .object(activity)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get all of one user's activities, newest first.
    pub async fn get_activities_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<ActivityRecord>, AppError> {
        let user_id = user_id.to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(move |q| q.field("user_id").eq(user_id.clone()))
            .order_by([(
                "recorded_at",
                firestore::FirestoreQueryDirection::Descending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get one user's activities recorded on any day in `[from, to]`
    /// inclusive, oldest first.
    pub async fn get_activities_in_range(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ActivityRecord>, AppError> {
        let user_id = user_id.to_string();
        let (lower, upper) = activity_range_bounds(from, to);
        self.get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    q.field("recorded_at").greater_than_or_equal(lower.clone()),
                    q.field("recorded_at").less_than_or_equal(upper.clone()),
                ])
            })
            .order_by([(
                "recorded_at",
                firestore::FirestoreQueryDirection::Ascending,
            )])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Grid Intensity Operations ───────────────────────────────

    /// Create or overwrite the sample for its date.
    ///
    /// The document ID is the ISO date string, so concurrent ingestion
    /// runs for the same day resolve to last-write-wins.
    pub async fn upsert_grid_sample(&self, sample: &GridIntensitySample) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::GRID_INTENSITY)
            .document_id(sample.doc_id())
            .object(sample)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get samples for an inclusive date range, ascending.
    pub async fn get_grid_samples(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<GridIntensitySample>, AppError> {
        // dates are stored as "YYYY-MM-DD" strings, which order correctly
        let from = from.format("%Y-%m-%d").to_string();
        let to = to.format("%Y-%m-%d").to_string();
        self.get_client()?
            .fluent()
            .select()
            .from(collections::GRID_INTENSITY)
            .filter(move |q| {
                q.for_all([
                    q.field("date").greater_than_or_equal(from.clone()),
                    q.field("date").less_than_or_equal(to.clone()),
                ])
            })
            .order_by([("date", firestore::FirestoreQueryDirection::Ascending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

/// String bounds for an inclusive day range over `recorded_at`.
///
/// Timestamps are stored as RFC3339 strings, which order
/// lexicographically the same as chronologically except that a
/// subsecond stamp sorts before the bare-seconds form of the same
/// instant ('.' < 'Z'). The lower bound is therefore the bare date,
/// which precedes every timestamp on that day, and the upper bound's
/// final second admits its subseconds for the same reason.
fn activity_range_bounds(from: NaiveDate, to: NaiveDate) -> (String, String) {
    (
        from.format("%Y-%m-%d").to_string(),
        format!("{}T23:59:59Z", to.format("%Y-%m-%d")),
    )
}
