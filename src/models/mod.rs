// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod grid;
pub mod user;

pub use activity::{ActivityRecord, Category};
pub use grid::GridIntensitySample;
pub use user::User;
