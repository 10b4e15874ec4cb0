// ABOUTME: Meal plan generation endpoint combining the session profile with query overrides
// ABOUTME: Rejects incomplete profiles with the required-field list before touching upstreams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use crate::errors::{AppError, AppResult};
use crate::external::CalorieQuery;
use crate::plan::{PlanRequest, PlanResponse};
use crate::profile::validate_update;
use crate::resources::ServerResources;
use crate::routes::session_of;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use http::HeaderMap;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Meal plan routes implementation
pub struct MealPlanRoutes;

impl MealPlanRoutes {
    /// Create the meal plan routes
    ///
    /// Both spellings of the path are served; older clients use the
    /// hyphenated form.
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/get_meal_plan", get(get_meal_plan))
            .route("/get-meal-plan", get(get_meal_plan))
            .with_state(resources)
    }
}

/// One-off overrides for a single plan request, merged over the stored profile
#[derive(Debug, Default, Deserialize)]
struct PlanOverrides {
    age: Option<String>,
    weight: Option<String>,
    height: Option<String>,
    gender: Option<String>,
    activity_level: Option<String>,
    goal: Option<String>,
    location: Option<String>,
}

impl PlanOverrides {
    /// Query parameters as a JSON object for the shared field validator
    fn as_payload(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for (field, value) in [
            ("age", &self.age),
            ("weight", &self.weight),
            ("height", &self.height),
            ("gender", &self.gender),
            ("activity_level", &self.activity_level),
            ("goal", &self.goal),
            ("location", &self.location),
        ] {
            if let Some(value) = value {
                object.insert(field.to_owned(), serde_json::Value::String(value.clone()));
            }
        }
        serde_json::Value::Object(object)
    }
}

async fn get_meal_plan(
    State(resources): State<Arc<ServerResources>>,
    headers: HeaderMap,
    Query(overrides): Query<PlanOverrides>,
) -> AppResult<Json<PlanResponse>> {
    let session = session_of(&headers);

    let override_update = validate_update(&overrides.as_payload()).map_err(|errors| {
        debug!(%session, ?errors, "Rejected meal plan query overrides");
        AppError::invalid_input("Invalid data provided")
            .with_details(serde_json::json!({ "details": errors }))
    })?;

    let mut profile = resources.profiles.get(&session);
    profile.merge(&override_update);

    let missing = profile.missing_required_fields();
    if !missing.is_empty() {
        debug!(%session, ?missing, "Meal plan requested with incomplete profile");
        return Err(AppError::missing_fields(
            &missing,
            serde_json::to_value(&profile)?,
        ));
    }

    // Completeness was checked above; the destructuring cannot fail.
    let (Some(age), Some(weight), Some(height), Some(gender), Some(activity_level)) = (
        profile.age,
        profile.weight,
        profile.height,
        profile.gender,
        profile.activity_level,
    ) else {
        return Err(AppError::internal("Profile completeness check failed"));
    };

    let request = PlanRequest {
        query: CalorieQuery {
            age,
            weight,
            height,
            gender,
            activity_level,
            goal: profile.goal.unwrap_or_default(),
        },
        location: profile.trimmed_location().map(str::to_owned),
    };

    let plan = resources.plan_service.generate(&request).await?;
    Ok(Json(plan))
}
