// ABOUTME: External service clients for geocoding, weather, calorie, and recipe upstreams
// ABOUTME: Shared HTTP client construction and trait seams for mockable upstream access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

/// Daily calorie requirement client (health-calculator API)
pub mod calories;
/// Location-to-coordinates client (Google Maps Geocoding API)
pub mod geocoding;
/// Recipe search client (gustar.io German recipes API)
pub mod recipes;
/// Feels-like temperature client (API-Ninjas weather endpoint)
pub mod weather;

pub use calories::{CalorieCalculator, CalorieQuery, HealthCalculatorClient, MockCalorieCalculator};
pub use geocoding::{Geocoder, GoogleGeocodingClient, MockGeocoder};
pub use recipes::{GustarRecipeClient, MockRecipeSource, RecipeSource};
pub use weather::{ApiNinjasWeatherClient, MockWeatherProvider, WeatherProvider};

use crate::errors::{AppError, AppResult};
use std::time::Duration;

/// Build a reqwest client with the configured per-request timeout
///
/// # Errors
///
/// Returns a configuration error if the client fails to construct
pub fn build_http_client(timeout_secs: u64) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))
}

/// Host portion of a base URL, as required by the `X-RapidAPI-Host` header
#[must_use]
pub fn host_of(base_url: &str) -> &str {
    let stripped = base_url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    stripped.split('/').next().unwrap_or(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of_strips_scheme_and_path() {
        assert_eq!(
            host_of("https://health-calculator-api.p.rapidapi.com"),
            "health-calculator-api.p.rapidapi.com"
        );
        assert_eq!(
            host_of("https://maps.googleapis.com/maps/api/geocode"),
            "maps.googleapis.com"
        );
        assert_eq!(host_of("http://localhost:8080/v1"), "localhost:8080");
    }
}
