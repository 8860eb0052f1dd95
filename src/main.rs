// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Carbon Coach API Server
//!
//! Tracks personal carbon emissions by converting logged activities to
//! CO2 mass and joining them with the daily grid-intensity feed.

use carbon_coach::{
    config::Config,
    db::FirestoreDb,
    services::{EmissionCalculator, EmissionFactors, GridFeedService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Carbon Coach API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    // Emission factors are fixed configuration; stored records keep the
    // value they were computed with even if these change later
    let emissions = EmissionCalculator::new(EmissionFactors::default());

    // Initialize grid feed client
    let grid_feed = GridFeedService::new(&config.grid_api_url, &config.grid_region);
    tracing::info!(
        url = %config.grid_api_url,
        region = %config.grid_region,
        "Grid feed client initialized"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        emissions,
        grid_feed,
    });

    // Build router
    let app = carbon_coach::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carbon_coach=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
