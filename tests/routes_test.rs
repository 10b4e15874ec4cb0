// ABOUTME: Integration tests for the HTTP API using mocked upstream services
// ABOUTME: Covers profile storage, plan generation, session isolation, and cache clearing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use anyhow::Result;
use axum::body::Body;
use axum::Router;
use http::{header, Request, StatusCode};
use mahlzeit_server::cache::memory::InMemoryCache;
use mahlzeit_server::cache::{CacheConfig, CacheProvider};
use mahlzeit_server::config::ServerConfig;
use mahlzeit_server::external::{
    MockCalorieCalculator, MockGeocoder, MockRecipeSource, MockWeatherProvider,
};
use mahlzeit_server::resources::ServerResources;
use mahlzeit_server::server::MealPlanServer;
use std::sync::Arc;
use tower::ServiceExt;

/// Build a router over mocked upstreams
async fn test_app(weather: MockWeatherProvider, recipes: MockRecipeSource) -> Result<Router> {
    let cache = InMemoryCache::new(CacheConfig {
        enable_background_cleanup: false,
        ..CacheConfig::default()
    })
    .await?;

    let resources = ServerResources::with_upstreams(
        ServerConfig::default(),
        cache,
        Arc::new(MockGeocoder::returning(52.52, 13.405)),
        Arc::new(weather),
        Arc::new(MockCalorieCalculator::returning(2000.0)),
        Arc::new(recipes),
    );

    Ok(MealPlanServer::new(Arc::new(resources)).router())
}

/// Default app: moderate weather, the same recipe list for every category
async fn default_app() -> Result<Router> {
    test_app(
        MockWeatherProvider::returning(15.0),
        MockRecipeSource::with_kcals(&[600.0, 700.0]),
    )
    .await
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn post_json(path: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Result<serde_json::Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn complete_profile() -> serde_json::Value {
    serde_json::json!({
        "age": 30,
        "weight": 70,
        "height": 175,
        "gender": "male",
        "activity_level": "moderately_active"
    })
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let app = default_app().await?;
    let response = app.oneshot(get("/health")).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["status"], "ok");

    Ok(())
}

#[tokio::test]
async fn test_responses_suppress_client_caching() -> Result<()> {
    let app = default_app().await?;
    let response = app.oneshot(get("/health")).await?;

    assert_eq!(
        response.headers()[header::CACHE_CONTROL],
        "no-store, no-cache, must-revalidate, private"
    );
    assert_eq!(response.headers()[header::PRAGMA], "no-cache");

    Ok(())
}

#[tokio::test]
async fn test_store_and_fetch_user_data() -> Result<()> {
    let app = default_app().await?;

    let response = app
        .clone()
        .oneshot(post_json("/api/user-data", &serde_json::json!({ "age": 30 })))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "Data received and validated successfully");
    assert_eq!(body["receivedData"]["age"], 30);

    // Second partial update merges with the first
    let response = app
        .clone()
        .oneshot(post_json("/api/user-data", &serde_json::json!({ "weight": 70 })))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/user-data")).await?;
    let body = body_json(response).await?;
    assert_eq!(body["age"], 30);
    assert_eq!(body["weight"], 70.0);

    Ok(())
}

#[tokio::test]
async fn test_invalid_user_data_is_rejected_per_field() -> Result<()> {
    let app = default_app().await?;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/user-data",
            &serde_json::json!({ "age": 150, "gender": "unknown", "weight": 70 }),
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert_eq!(body["error"], "Invalid data provided");
    assert_eq!(body["details"]["age"], "Invalid value for age");
    assert_eq!(body["details"]["gender"], "Invalid value for gender");

    // Nothing was stored from the rejected update
    let response = app.oneshot(get("/api/user-data")).await?;
    let body = body_json(response).await?;
    assert!(body.get("weight").is_none());

    Ok(())
}

#[tokio::test]
async fn test_meal_plan_requires_complete_profile() -> Result<()> {
    let app = default_app().await?;

    let response = app
        .clone()
        .oneshot(post_json("/api/user-data", &serde_json::json!({ "age": 30 })))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/get_meal_plan")).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert_eq!(body["error"], "Missing required parameters");
    let required: Vec<&str> = body["required"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(required, vec!["weight", "height", "gender", "activity_level"]);
    assert_eq!(body["currentData"]["age"], 30);

    Ok(())
}

#[tokio::test]
async fn test_meal_plan_happy_path() -> Result<()> {
    let app = default_app().await?;

    let response = app
        .clone()
        .oneshot(post_json("/api/user-data", &complete_profile()))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/get_meal_plan")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;

    assert_eq!(body["calorieRequirement"], 2000.0);
    assert_eq!(body["goal"], "maintain");
    assert_eq!(body["feelsLikeTemperature"], 15.0);
    assert_eq!(
        body["locationUsed"],
        "Not provided (using default temperature)"
    );

    // The reported total matches the sum of the chosen meals.
    let meals = &body["meals"];
    let sum = meals["breakfast"]["nutrition"]["kcal"].as_f64().unwrap()
        + meals["lunch"]["nutrition"]["kcal"].as_f64().unwrap()
        + meals["dinner"]["nutrition"]["kcal"].as_f64().unwrap();
    assert!((body["totalCalories"].as_f64().unwrap() - sum).abs() < f64::EPSILON);

    Ok(())
}

#[tokio::test]
async fn test_meal_plan_hyphenated_alias() -> Result<()> {
    let app = default_app().await?;

    let response = app
        .clone()
        .oneshot(post_json("/api/user-data", &complete_profile()))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/get-meal-plan")).await?;
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_meal_plan_from_query_parameters_only() -> Result<()> {
    let app = default_app().await?;

    // No stored profile; everything arrives as query overrides.
    let response = app
        .oneshot(get(
            "/get_meal_plan?age=30&weight=70&height=175&gender=male&activity_level=moderately_active&goal=gain",
        ))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["goal"], "gain");

    Ok(())
}

#[tokio::test]
async fn test_meal_plan_rejects_invalid_query_override() -> Result<()> {
    let app = default_app().await?;

    let response = app.oneshot(get("/get_meal_plan?age=abc")).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert_eq!(body["error"], "Invalid data provided");
    assert_eq!(body["details"]["age"], "Invalid value for age");

    Ok(())
}

#[tokio::test]
async fn test_meal_plan_with_location_uses_weather() -> Result<()> {
    // Hot weather: the warm band's light menu is used.
    let recipes = MockRecipeSource::with_kcals(&[600.0, 700.0])
        .category("Salate", &[650.0])
        .category("Leichtes Frühstück", &[600.0])
        .category("Leichtes Abendessen", &[700.0]);
    let app = test_app(MockWeatherProvider::returning(28.0), recipes).await?;

    let mut profile = complete_profile();
    profile["location"] = serde_json::json!("Sevilla, Spain");
    let response = app
        .clone()
        .oneshot(post_json("/api/user-data", &profile))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/get_meal_plan")).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["feelsLikeTemperature"], 28.0);
    assert_eq!(body["locationUsed"], "Sevilla, Spain");
    assert_eq!(body["meals"]["lunch"]["nutrition"]["kcal"], 650.0);

    Ok(())
}

#[tokio::test]
async fn test_meal_plan_insufficient_recipes() -> Result<()> {
    let app = test_app(
        MockWeatherProvider::returning(15.0),
        MockRecipeSource::with_kcals(&[600.0]).category("Hauptgericht", &[]),
    )
    .await?;

    let response = app
        .clone()
        .oneshot(post_json("/api/user-data", &complete_profile()))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/get_meal_plan")).await?;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await?;
    assert_eq!(body["error"], "Not enough recipes found.");

    Ok(())
}

#[tokio::test]
async fn test_sessions_are_isolated() -> Result<()> {
    let app = default_app().await?;

    let request = Request::builder()
        .method("POST")
        .uri("/api/user-data")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-session-id", "alice")
        .body(Body::from(serde_json::to_vec(&serde_json::json!({ "age": 30 }))?))
        .unwrap();
    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);

    // A different session sees an empty profile
    let request = Request::builder()
        .uri("/api/user-data")
        .header("x-session-id", "bob")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await?;
    let body = body_json(response).await?;
    assert_eq!(body, serde_json::json!({}));

    // Alice still sees hers
    let request = Request::builder()
        .uri("/api/user-data")
        .header("x-session-id", "alice")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await?;
    let body = body_json(response).await?;
    assert_eq!(body["age"], 30);

    Ok(())
}

#[tokio::test]
async fn test_clear_cache_drops_profiles() -> Result<()> {
    let app = default_app().await?;

    let response = app
        .clone()
        .oneshot(post_json("/api/user-data", &complete_profile()))
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/clear-cache")
                .body(Body::empty())
                .unwrap(),
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    assert_eq!(body["message"], "Cache cleared successfully");

    let response = app.oneshot(get("/api/user-data")).await?;
    let body = body_json(response).await?;
    assert_eq!(body, serde_json::json!({}));

    Ok(())
}
