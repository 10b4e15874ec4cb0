// ABOUTME: HTTP route organization for the meal plan API
// ABOUTME: Groups handlers by concern and shares session extraction across them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

/// Cache and profile administration endpoints
pub mod admin;
/// Health and readiness endpoints
pub mod health;
/// Meal plan generation endpoint
pub mod meal_plan;
/// OpenAPI documentation endpoints
#[cfg(feature = "openapi")]
pub mod openapi;
/// User profile storage endpoints
pub mod user_data;

pub use admin::AdminRoutes;
pub use health::HealthRoutes;
pub use meal_plan::MealPlanRoutes;
pub use user_data::UserDataRoutes;

use crate::profile::DEFAULT_SESSION;
use http::HeaderMap;

/// Header carrying the client-chosen session identifier
pub const SESSION_HEADER: &str = "x-session-id";

/// Session key for a request, falling back to the shared default session
#[must_use]
pub fn session_of(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map_or_else(|| DEFAULT_SESSION.to_owned(), str::to_owned)
}
