// ABOUTME: gustar.io German recipe search client with per-category caching
// ABOUTME: Filters out recipes without usable calorie data before they enter selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use crate::cache::memory::InMemoryCache;
use crate::cache::{CacheConfig, CacheKey, CacheProvider, CacheResource};
use crate::config::environment::ExternalServiceConfig;
use crate::errors::{AppError, AppResult};
use crate::external::host_of;
use crate::models::Recipe;
use std::collections::HashMap;
use tracing::debug;

/// Searches recipes by meal-category text
#[async_trait::async_trait]
pub trait RecipeSource: Send + Sync {
    /// Recipes matching the given German category label
    ///
    /// Only recipes with a positive, finite `nutrition.kcal` are returned;
    /// an empty list is a valid (cacheable) result, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream call fails
    async fn search(&self, category: &str) -> AppResult<Vec<Recipe>>;
}

/// Keep only recipes whose calorie value can drive selection
fn usable_recipes(raw: Vec<serde_json::Value>) -> Vec<Recipe> {
    raw.into_iter()
        .filter_map(|value| serde_json::from_value::<Recipe>(value).ok())
        .filter(|recipe| recipe.kcal().is_finite() && recipe.kcal() > 0.0)
        .collect()
}

/// gustar.io German recipes API (RapidAPI) client
pub struct GustarRecipeClient {
    http: reqwest::Client,
    config: ExternalServiceConfig,
    cache: InMemoryCache,
    cache_config: CacheConfig,
}

impl GustarRecipeClient {
    /// Create a new recipe client sharing the server cache
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
impl RecipeSource for GustarRecipeClient {
    async fn search(&self, category: &str) -> AppResult<Vec<Recipe>> {
        let key = CacheKey::new(CacheResource::recipes(category));
        if let Some(cached) = self.cache.get::<Vec<Recipe>>(&key).await? {
            debug!(category, count = cached.len(), "Recipe cache hit");
            return Ok(cached);
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::config("RAPIDAPI_KEY not configured"))?;

        let url = format!("{}/search_api", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .header("X-RapidAPI-Key", api_key)
            .header("X-RapidAPI-Host", host_of(&self.config.base_url))
            .query(&[("text", category), ("ingLimit", "0")])
            .send()
            .await
            .map_err(|e| AppError::external_service("recipes", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "recipes",
                format!("HTTP {}", response.status()),
            ));
        }

        let raw: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| AppError::external_service("recipes", e.to_string()))?;

        let recipes = usable_recipes(raw);

        let ttl = self.cache_config.ttl_for_resource(&key.resource);
        self.cache.set(&key, &recipes, ttl).await?;
        debug!(category, count = recipes.len(), "Fetched recipes");

        Ok(recipes)
    }
}

/// Mock recipe source serving fixed per-category lists, for tests
#[derive(Default)]
pub struct MockRecipeSource {
    by_category: HashMap<String, Vec<Recipe>>,
    /// List served for categories without an explicit entry
    pub fallback: Vec<Recipe>,
}

impl MockRecipeSource {
    /// Mock serving recipes with the given kcal values for every category
    #[must_use]
    pub fn with_kcals(kcals: &[f64]) -> Self {
        Self {
            by_category: HashMap::new(),
            fallback: kcals.iter().copied().map(Recipe::from_kcal).collect(),
        }
    }

    /// Serve a specific kcal list for one category
    #[must_use]
    pub fn category(mut self, category: &str, kcals: &[f64]) -> Self {
        self.by_category.insert(
            category.to_owned(),
            kcals.iter().copied().map(Recipe::from_kcal).collect(),
        );
        self
    }
}

#[async_trait::async_trait]
impl RecipeSource for MockRecipeSource {
    async fn search(&self, category: &str) -> AppResult<Vec<Recipe>> {
        Ok(self
            .by_category
            .get(category)
            .unwrap_or(&self.fallback)
            .clone())
    }
}
