// ABOUTME: Meal plan orchestration over the calorie, geocoding, weather, and recipe upstreams
// ABOUTME: Degrades missing weather to a default temperature; calorie failures are fatal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use crate::config::environment::PlanConfig;
use crate::errors::{AppError, AppResult};
use crate::external::{CalorieCalculator, CalorieQuery, Geocoder, RecipeSource, WeatherProvider};
use crate::models::{Goal, Recipe};
use crate::plan::categories::TemperatureBand;
use crate::plan::selection::select_meals;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Placeholder reported when no location was provided or usable
pub const LOCATION_NOT_PROVIDED: &str = "Not provided (using default temperature)";

/// Everything needed to compute one daily plan
#[derive(Debug, Clone)]
pub struct PlanRequest {
    /// Complete biometric parameter set
    pub query: CalorieQuery,
    /// Optional "city, country" string for weather-aware categories
    pub location: Option<String>,
}

/// The three chosen meals, one per slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meals {
    pub breakfast: Recipe,
    pub lunch: Recipe,
    pub dinner: Recipe,
}

/// Wire shape of a computed daily meal plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// Daily calorie target from the calculator upstream
    pub calorie_requirement: f64,
    pub goal: Goal,
    /// Feels-like temperature the categories were derived from
    pub feels_like_temperature: f64,
    /// Echo of the provided location, or the not-provided placeholder
    pub location_used: String,
    pub meals: Meals,
    /// Sum of the chosen meals' kcal values
    pub total_calories: f64,
}

/// Computes daily meal plans from the four upstream services
#[derive(Clone)]
pub struct PlanService {
    geocoder: Arc<dyn Geocoder>,
    weather: Arc<dyn WeatherProvider>,
    calories: Arc<dyn CalorieCalculator>,
    recipes: Arc<dyn RecipeSource>,
    config: PlanConfig,
}

impl PlanService {
    /// Create a new plan service over the given upstream clients
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        weather: Arc<dyn WeatherProvider>,
        calories: Arc<dyn CalorieCalculator>,
        recipes: Arc<dyn RecipeSource>,
        config: PlanConfig,
    ) -> Self {
        Self {
            geocoder,
            weather,
            calories,
            recipes,
            config,
        }
    }

    /// Compute a daily plan with a freshly seeded RNG
    ///
    /// `StdRng` rather than the thread-local RNG so the returned future
    /// stays `Send` for the HTTP handlers.
    ///
    /// # Errors
    ///
    /// Returns an error if the calorie upstream fails, a recipe search fails,
    /// or any meal category comes back empty.
    pub async fn generate(&self, request: &PlanRequest) -> AppResult<PlanResponse> {
        let mut rng = rand::rngs::StdRng::from_entropy();
        self.generate_with_rng(request, &mut rng).await
    }

    /// Compute a daily plan with a caller-supplied RNG (deterministic tests)
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::generate`].
    pub async fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        request: &PlanRequest,
        rng: &mut R,
    ) -> AppResult<PlanResponse> {
        // A missing calorie target is fatal; the plan has no meaning without it.
        let calorie_requirement = self.calories.daily_target(&request.query).await?;

        let feels_like = self.resolve_feels_like(request.location.as_deref()).await;
        let band = TemperatureBand::from_feels_like(feels_like);
        let categories = band.categories();

        let (breakfasts, lunches, dinners) = tokio::join!(
            self.recipes.search(categories.breakfast),
            self.recipes.search(categories.lunch),
            self.recipes.search(categories.dinner),
        );
        let (breakfasts, lunches, dinners) = (breakfasts?, lunches?, dinners?);

        if breakfasts.is_empty() || lunches.is_empty() || dinners.is_empty() {
            warn!(
                band = ?band,
                breakfasts = breakfasts.len(),
                lunches = lunches.len(),
                dinners = dinners.len(),
                "A meal category returned no usable recipes"
            );
            return Err(AppError::insufficient_recipes());
        }

        let selection = select_meals(
            &breakfasts,
            &lunches,
            &dinners,
            calorie_requirement,
            self.config.calorie_tolerance_kcal,
            self.config.max_selection_attempts,
            rng,
        );

        info!(
            target = calorie_requirement,
            total = selection.plan.total_kcal,
            attempts = selection.attempts,
            within_tolerance = selection.within_tolerance,
            band = ?band,
            "Meal plan computed"
        );

        let location_used = request
            .location
            .clone()
            .unwrap_or_else(|| LOCATION_NOT_PROVIDED.to_owned());

        Ok(PlanResponse {
            calorie_requirement,
            goal: request.query.goal,
            feels_like_temperature: feels_like,
            location_used,
            meals: Meals {
                breakfast: selection.plan.breakfast,
                lunch: selection.plan.lunch,
                dinner: selection.plan.dinner,
            },
            total_calories: selection.plan.total_kcal,
        })
    }

    /// Resolve the feels-like temperature for an optional location
    ///
    /// Geocoding or weather failures never fail the plan; they degrade to the
    /// configured default temperature.
    async fn resolve_feels_like(&self, location: Option<&str>) -> f64 {
        let Some(location) = location else {
            return self.config.default_feels_like_celsius;
        };

        let coords = match self.geocoder.resolve(location).await {
            Ok(coords) => coords,
            Err(e) => {
                warn!(location, error = %e, "Geocoding failed, using default temperature");
                return self.config.default_feels_like_celsius;
            }
        };

        match self.weather.feels_like(coords).await {
            Ok(temperature) => temperature,
            Err(e) => {
                warn!(location, error = %e, "Weather lookup failed, using default temperature");
                self.config.default_feels_like_celsius
            }
        }
    }
}
