// ABOUTME: OpenAPI documentation and Swagger UI, compiled behind the openapi feature
// ABOUTME: Publishes the profile schemas and an interactive /api-docs explorer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use crate::models::{ActivityLevel, Gender, Goal, UserProfile};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI documentation root
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mahlzeit Server API",
        description = "Personalized daily meal plans from biometrics, weather, and German recipe search"
    ),
    components(schemas(UserProfile, Gender, ActivityLevel, Goal)),
    tags(
        (name = "Meal Planning", description = "Meal plan generation"),
        (name = "User Data Management", description = "Session profile storage"),
        (name = "System Management", description = "Health and cache administration")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/api-docs`
#[must_use]
pub fn routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
