// ABOUTME: Google Maps Geocoding API client resolving location strings to coordinates
// ABOUTME: Cache-first lookup with a 12-hour TTL on resolved coordinates
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

/// Resolves a free-form location string to geographic coordinates
#[async_trait::async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolve `location` ("city, country") to coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails or the location is unknown
    async fn resolve(&self, location: &str) -> AppResult<Coordinates>;
}

/// Google Geocoding API response envelope
#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Google Maps Geocoding API client
pub struct GoogleGeocodingClient {
    http: reqwest::Client,
    config: ExternalServiceConfig,
    cache: InMemoryCache,
    cache_config: CacheConfig,
}

impl GoogleGeocodingClient {
    /// Create a new geocoding client sharing the server cache
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

    fn api_key(&self) -> AppResult<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::config("GOOGLE_GEOCODE_API_KEY not configured"))
    }
}

#[async_trait::async_trait]
impl Geocoder for GoogleGeocodingClient {
    async fn resolve(&self, location: &str) -> AppResult<Coordinates> {
        let key = CacheKey::new(CacheResource::coordinates(location));
        if let Some(cached) = self.cache.get::<Coordinates>(&key).await? {
            debug!(location, "Geocoding cache hit");
            return Ok(cached);
        }

        let api_key = self.api_key()?;
        let url = format!("{}/json", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("address", location), ("key", api_key)])
            .send()
            .await
            .map_err(|e| AppError::external_service("geocoding", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "geocoding",
                format!("HTTP {}", response.status()),
            ));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| AppError::external_service("geocoding", e.to_string()))?;

        if body.status != "OK" {
            return Err(AppError::external_service(
                "geocoding",
                format!("status {} for location '{location}'", body.status),
            ));
        }

        let first = body.results.first().ok_or_else(|| {
            AppError::external_service("geocoding", format!("no results for '{location}'"))
        })?;

        let coords = Coordinates {
            latitude: first.geometry.location.lat,
            longitude: first.geometry.location.lng,
        };

        let ttl = self.cache_config.ttl_for_resource(&key.resource);
        self.cache.set(&key, &coords, ttl).await?;
        debug!(location, lat = coords.latitude, lon = coords.longitude, "Geocoded location");

        Ok(coords)
    }
}

/// Mock geocoder returning a fixed result, for tests
pub struct MockGeocoder {
    /// Result to return; `None` simulates an unknown location
    pub coordinates: Option<Coordinates>,
}

impl MockGeocoder {
    /// Mock that resolves every location to the given coordinates
    #[must_use]
    pub const fn returning(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinates: Some(Coordinates {
                latitude,
                longitude,
            }),
        }
    }

    /// Mock that fails every lookup
    #[must_use]
    pub const fn failing() -> Self {
        Self { coordinates: None }
    }
}

#[async_trait::async_trait]
impl Geocoder for MockGeocoder {
    async fn resolve(&self, location: &str) -> AppResult<Coordinates> {
        self.coordinates.ok_or_else(|| {
            AppError::external_service("geocoding", format!("no results for '{location}'"))
        })
    }
}
