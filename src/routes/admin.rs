// ABOUTME: Administrative endpoint clearing cached upstream data and stored profiles
// ABOUTME: Used between test runs and after upstream data corrections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use crate::cache::CacheProvider;
use crate::errors::AppResult;
use crate::resources::ServerResources;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use tracing::info;

/// Admin routes implementation
pub struct AdminRoutes;

impl AdminRoutes {
    /// Create the administrative routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/clear-cache", post(clear_cache))
            .with_state(resources)
    }
}

/// Flush every cache and drop all stored profiles
async fn clear_cache(
    State(resources): State<Arc<ServerResources>>,
) -> AppResult<Json<serde_json::Value>> {
    let profiles_before = resources.profiles.len();

    resources.cache.clear_all().await?;
    resources.profiles.clear();

    info!(profiles_cleared = profiles_before, "All caches and profiles cleared");

    Ok(Json(serde_json::json!({
        "message": "Cache cleared successfully"
    })))
}
