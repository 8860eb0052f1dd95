// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Carbon Coach: personal carbon-footprint tracking backend.
//!
//! This crate provides the backend API for logging activities (driving,
//! electricity use), converting them to CO2 mass, combining them with
//! the daily national grid-intensity series, and serving dashboard
//! aggregates and monthly CSV exports.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{EmissionCalculator, GridFeedService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub emissions: EmissionCalculator,
    pub grid_feed: GridFeedService,
}
