// ABOUTME: Centralized server resources shared across all route handlers
// ABOUTME: Wires configuration, cache, upstream clients, and the plan service together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use crate::cache::memory::InMemoryCache;
use crate::cache::{CacheConfig, CacheProvider};
use crate::config::ServerConfig;
use crate::errors::AppResult;
use crate::external::{
    build_http_client, ApiNinjasWeatherClient, CalorieCalculator, Geocoder, GoogleGeocodingClient,
    GustarRecipeClient, HealthCalculatorClient, RecipeSource, WeatherProvider,
};
use crate::plan::PlanService;
use crate::profile::ProfileStore;
use std::sync::Arc;

/// Shared resources for all route handlers
///
/// Constructed once at startup and passed to routes as `Arc<ServerResources>`,
/// so every handler sees the same cache, profile store, and upstream clients.
pub struct ServerResources {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Upstream response cache
    pub cache: InMemoryCache,
    /// Session-keyed user profiles
    pub profiles: Arc<ProfileStore>,
    /// Meal plan orchestration over the upstream clients
    pub plan_service: PlanService,
}

impl ServerResources {
    /// Build resources with the real upstream clients
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or cache fails to initialize
    pub async fn new(config: ServerConfig) -> AppResult<Self> {
        let cache_config = CacheConfig::from_settings(&config.cache);
        let cache = InMemoryCache::new(cache_config.clone()).await?;
        let http = build_http_client(config.external_services.request_timeout_secs)?;

        let geocoder: Arc<dyn Geocoder> = Arc::new(GoogleGeocodingClient::new(
            http.clone(),
            config.external_services.geocoding.clone(),
            cache.clone(),
            cache_config.clone(),
        ));
        let weather: Arc<dyn WeatherProvider> = Arc::new(ApiNinjasWeatherClient::new(
            http.clone(),
            config.external_services.weather.clone(),
            cache.clone(),
            cache_config.clone(),
        ));
        let calories: Arc<dyn CalorieCalculator> = Arc::new(HealthCalculatorClient::new(
            http.clone(),
            config.external_services.calories.clone(),
            cache.clone(),
            cache_config.clone(),
        ));
        let recipes: Arc<dyn RecipeSource> = Arc::new(GustarRecipeClient::new(
            http,
            config.external_services.recipes.clone(),
            cache.clone(),
            cache_config,
        ));

        Ok(Self::with_upstreams(
            config, cache, geocoder, weather, calories, recipes,
        ))
    }

    /// Build resources over caller-supplied upstream clients (tests use mocks)
    #[must_use]
    pub fn with_upstreams(
        config: ServerConfig,
        cache: InMemoryCache,
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn WeatherProvider>,
        calories: Arc<dyn CalorieCalculator>,
        recipes: Arc<dyn RecipeSource>,
    ) -> Self {
        let plan_service = PlanService::new(geocoder, weather, calories, recipes, config.plan.clone());

        Self {
            config: Arc::new(config),
            cache,
            profiles: Arc::new(ProfileStore::new()),
            plan_service,
        }
    }
}
