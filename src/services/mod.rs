// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.
//!
//! The aggregation core (`emissions`, `window`, `join`, `aggregate`,
//! `report`) is pure and synchronous; only `grid_feed` talks to the
//! network.

pub mod aggregate;
pub mod emissions;
pub mod grid_feed;
pub mod join;
pub mod report;
pub mod window;

pub use aggregate::{summarize, DashboardSummary};
pub use emissions::{EmissionCalculator, EmissionFactors};
pub use grid_feed::GridFeedService;
pub use join::{join_daily, join_month, DailyAggregate, MonthlyReportRow};
pub use window::build_window;
