// ABOUTME: API-Ninjas weather client fetching the feels-like temperature at coordinates
// ABOUTME: Cache-first lookup with a 1-hour TTL to track weather volatility
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use crate::cache::memory::InMemoryCache;
use crate::cache::{CacheConfig, CacheKey, CacheProvider, CacheResource};
use crate::config::environment::ExternalServiceConfig;
use crate::errors::{AppError, AppResult};
use crate::models::Coordinates;
use serde::Deserialize;
use tracing::debug;

/// Provides the current feels-like temperature at a coordinate pair
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Feels-like temperature in Celsius at the given position
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails
    async fn feels_like(&self, position: Coordinates) -> AppResult<f64>;
}

/// Subset of the API-Ninjas weather response we consume
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    feels_like: f64,
}

/// API-Ninjas weather endpoint client
pub struct ApiNinjasWeatherClient {
    http: reqwest::Client,
    config: ExternalServiceConfig,
    cache: InMemoryCache,
    cache_config: CacheConfig,
}

impl ApiNinjasWeatherClient {
    /// Create a new weather client sharing the server cache
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
impl WeatherProvider for ApiNinjasWeatherClient {
    async fn feels_like(&self, position: Coordinates) -> AppResult<f64> {
        let key = CacheKey::new(CacheResource::feels_like(
            position.latitude,
            position.longitude,
        ));
        if let Some(cached) = self.cache.get::<f64>(&key).await? {
            debug!(lat = position.latitude, lon = position.longitude, "Weather cache hit");
            return Ok(cached);
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::config("NINJA_API_KEY not configured"))?;

        let url = format!("{}/weather", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .header("X-Api-Key", api_key)
            .query(&[
                ("lat", position.latitude.to_string()),
                ("lon", position.longitude.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_service("weather", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "weather",
                format!("HTTP {}", response.status()),
            ));
        }

        let body: WeatherResponse = response
            .json()
            .await
            .map_err(|e| AppError::external_service("weather", e.to_string()))?;

        let ttl = self.cache_config.ttl_for_resource(&key.resource);
        self.cache.set(&key, &body.feels_like, ttl).await?;
        debug!(
            lat = position.latitude,
            lon = position.longitude,
            feels_like = body.feels_like,
            "Fetched feels-like temperature"
        );

        Ok(body.feels_like)
    }
}

/// Mock weather provider returning a fixed temperature, for tests
pub struct MockWeatherProvider {
    /// Temperature to return; `None` simulates an upstream failure
    pub temperature: Option<f64>,
}

impl MockWeatherProvider {
    /// Mock returning the given feels-like temperature everywhere
    #[must_use]
    pub const fn returning(temperature: f64) -> Self {
        Self {
            temperature: Some(temperature),
        }
    }

    /// Mock that fails every lookup
    #[must_use]
    pub const fn failing() -> Self {
        Self { temperature: None }
    }
}

#[async_trait::async_trait]
impl WeatherProvider for MockWeatherProvider {
    async fn feels_like(&self, _position: Coordinates) -> AppResult<f64> {
        self.temperature
            .ok_or_else(|| AppError::external_service("weather", "unavailable"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_response_parsing() {
        let raw = r#"{
            "wind_speed": 4.1, "temp": 13.0, "feels_like": 11.4,
            "humidity": 72, "cloud_pct": 90
        }"#;
        let parsed: WeatherResponse = serde_json::from_str(raw).unwrap();
        assert!((parsed.feels_like - 11.4).abs() < f64::EPSILON);
    }
}
