// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use carbon_coach::config::Config;
use carbon_coach::db::FirestoreDb;
use carbon_coach::routes::create_router;
use carbon_coach::services::{EmissionCalculator, GridFeedService};
use carbon_coach::AppState;
use std::sync::Arc;

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> FirestoreDb {
    FirestoreDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    let emissions = EmissionCalculator::default();
    let grid_feed = GridFeedService::new(&config.grid_api_url, &config.grid_region);

    let state = Arc::new(AppState {
        config,
        db,
        emissions,
        grid_feed,
    });

    (create_router(state.clone()), state)
}

/// Create a signed session JWT for tests.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    carbon_coach::middleware::auth::create_jwt(user_id, signing_key)
        .expect("Failed to create test JWT")
}
