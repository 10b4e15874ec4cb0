// ABOUTME: Health-calculator API client computing daily caloric needs from biometrics
// ABOUTME: Mifflin-St Jeor equation upstream with tolerant numeric coercion and 12h caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use crate::cache::memory::InMemoryCache;
use crate::cache::{CacheConfig, CacheKey, CacheProvider, CacheResource};
use crate::config::environment::ExternalServiceConfig;
use crate::errors::{AppError, AppResult};
use crate::external::host_of;
use crate::models::{ActivityLevel, Gender, Goal};
use serde::Deserialize;
use tracing::debug;

/// Complete biometric parameter set for a daily-calories calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorieQuery {
    pub age: u32,
    /// Weight in kilograms
    pub weight: f64,
    /// Height in centimeters
    pub height: f64,
    pub gender: Gender,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

impl CalorieQuery {
    fn cache_resource(&self) -> CacheResource {
        CacheResource::daily_calories(
            self.age,
            self.weight,
            self.height,
            self.gender.as_str(),
            self.activity_level.as_str(),
            self.goal.as_str(),
        )
    }
}

/// Computes the daily calorie requirement for a biometric profile
#[async_trait::async_trait]
pub trait CalorieCalculator: Send + Sync {
    /// Daily calorie target in kcal for the given parameters
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails
    async fn daily_target(&self, query: &CalorieQuery) -> AppResult<f64>;
}

/// Health-calculator `/dcn` response envelope
#[derive(Debug, Deserialize)]
struct CalorieResponse {
    caloric_needs: CaloricNeeds,
}

#[derive(Debug, Deserialize)]
struct CaloricNeeds {
    /// Reported either as a number or as a string like "2446.5 kcal"
    calories: serde_json::Value,
}

/// Parse the leading float of a string, `NaN` when no digits lead it
///
/// Matches the permissive numeric coercion the upstream's string form needs:
/// "2446.5 kcal" parses as 2446.5, garbage parses as `NaN` and flows through
/// the selection fallback instead of failing the request.
fn parse_float_prefix(s: &str) -> f64 {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let mut end = 0;
    let mut seen_dot = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => {
                i += 1;
                end = i;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                i += 1;
            }
            _ => break,
        }
    }
    if end == 0 {
        return f64::NAN;
    }
    t[..end].parse().unwrap_or(f64::NAN)
}

fn coerce_calories(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        serde_json::Value::String(s) => parse_float_prefix(s),
        _ => f64::NAN,
    }
}

/// Health-calculator API (RapidAPI) client
pub struct HealthCalculatorClient {
    http: reqwest::Client,
    config: ExternalServiceConfig,
    cache: InMemoryCache,
    cache_config: CacheConfig,
}

impl HealthCalculatorClient {
    /// Create a new calorie client sharing the server cache
    #[must_use]
    pub fn new(
        http: reqwest::Client,
        config: ExternalServiceConfig,
        cache: InMemoryCache,
        cache_config: CacheConfig,
    ) -> Self {
        Self {
            http,
            config,
            cache,
            cache_config,
        }
    }
}

#[async_trait::async_trait]
impl CalorieCalculator for HealthCalculatorClient {
    async fn daily_target(&self, query: &CalorieQuery) -> AppResult<f64> {
        let key = CacheKey::new(query.cache_resource());
        if let Some(cached) = self.cache.get::<f64>(&key).await? {
            debug!(calories = cached, "Calorie target cache hit");
            return Ok(cached);
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::config("CALORIERAPIDAPI_KEY not configured"))?;

        let url = format!("{}/dcn", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", host_of(&self.config.base_url))
            .query(&[
                ("age", query.age.to_string()),
                ("weight", query.weight.to_string()),
                ("height", query.height.to_string()),
                ("gender", query.gender.as_str().to_owned()),
                ("activity_level", query.activity_level.as_str().to_owned()),
                ("goal", query.goal.as_str().to_owned()),
                ("equation", "mifflin".to_owned()),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_service("calories", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "calories",
                format!("HTTP {}", response.status()),
            ));
        }

        let body: CalorieResponse = response
            .json()
            .await
            .map_err(|e| AppError::external_service("calories", e.to_string()))?;

        let calories = coerce_calories(&body.caloric_needs.calories);

        // JSON cannot carry NaN, so only finite targets are cached.
        if calories.is_finite() {
            let ttl = self.cache_config.ttl_for_resource(&key.resource);
            self.cache.set(&key, &calories, ttl).await?;
        }
        debug!(calories, goal = query.goal.as_str(), "Fetched daily calorie target");

        Ok(calories)
    }
}

/// Mock calorie calculator returning a fixed target, for tests
pub struct MockCalorieCalculator {
    /// Target to return; `None` simulates an upstream failure
    pub calories: Option<f64>,
}

impl MockCalorieCalculator {
    /// Mock returning the given daily target for every profile
    #[must_use]
    pub const fn returning(calories: f64) -> Self {
        Self {
            calories: Some(calories),
        }
    }

    /// Mock that fails every calculation
    #[must_use]
    pub const fn failing() -> Self {
        Self { calories: None }
    }
}

#[async_trait::async_trait]
impl CalorieCalculator for MockCalorieCalculator {
    async fn daily_target(&self, _query: &CalorieQuery) -> AppResult<f64> {
        self.calories
            .ok_or_else(|| AppError::external_service("calories", "unavailable"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_prefix() {
        assert!((parse_float_prefix("2446.5 kcal") - 2446.5).abs() < f64::EPSILON);
        assert!((parse_float_prefix("  -12.5abc") - (-12.5)).abs() < f64::EPSILON);
        assert!(parse_float_prefix("kcal").is_nan());
        assert!(parse_float_prefix("").is_nan());
    }

    #[test]
    fn test_coerce_calories_number_and_string() {
        assert!((coerce_calories(&serde_json::json!(2000.0)) - 2000.0).abs() < f64::EPSILON);
        assert!((coerce_calories(&serde_json::json!("1850 kcal")) - 1850.0).abs() < f64::EPSILON);
        assert!(coerce_calories(&serde_json::Value::Null).is_nan());
    }

    #[test]
    fn test_calorie_response_parsing() {
        let raw = r#"{ "caloric_needs": { "calories": 2446.55, "goal": "maintain" } }"#;
        let parsed: CalorieResponse = serde_json::from_str(raw).unwrap();
        assert!((coerce_calories(&parsed.caloric_needs.calories) - 2446.55).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cache_fingerprint_covers_all_parameters() {
        let base = CalorieQuery {
            age: 30,
            weight: 70.0,
            height: 175.0,
            gender: Gender::Male,
            activity_level: ActivityLevel::ModeratelyActive,
            goal: Goal::Maintain,
        };
        let mut other = base;
        other.goal = Goal::Gain;
        assert_ne!(base.cache_resource(), other.cache_resource());
    }
}
