// ABOUTME: User profile storage endpoints with partial-update merge semantics
// ABOUTME: POST validates and merges into the session profile, GET echoes it back
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use crate::errors::{AppError, AppResult};
use crate::models::UserProfile;
use crate::profile::validate_update;
use crate::resources::ServerResources;
use crate::routes::session_of;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use http::HeaderMap;
use std::sync::Arc;
use tracing::{debug, info};

/// User data routes implementation
pub struct UserDataRoutes;

impl UserDataRoutes {
    /// Create the user data storage routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/user-data", post(store_user_data))
            .route("/api/user-data", get(get_user_data))
            .with_state(resources)
    }
}

/// Validate a partial update and merge it into the session profile
///
/// All fields are optional; valid fields of earlier updates survive. On any
/// invalid field the whole update is rejected with a per-field error map and
/// nothing is stored.
async fn store_user_data(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<serde_json::Value>> {
    let session = session_of(&headers);
    debug!(%session, "Received user data update");

    let update = validate_update(&payload).map_err(|errors| {
        debug!(%session, ?errors, "User data validation failed");
        AppError::invalid_input("Invalid data provided")
            .with_details(serde_json::json!({ "details": errors }))
    })?;

    let stored = resources.profiles.update(&session, &update);
    info!(
        %session,
        missing = ?stored.missing_required_fields(),
        "User profile updated"
    );

    Ok(Json(serde_json::json!({
        "message": "Data received and validated successfully",
        "receivedData": update,
    })))
}

/// Current profile for the request's session, `{}` when nothing is stored
async fn get_user_data(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
) -> Json<UserProfile> {
    let session = session_of(&headers);
    Json(resources.profiles.get(&session))
}
