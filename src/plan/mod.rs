// ABOUTME: Meal plan engine combining temperature bands, category mapping, and selection
// ABOUTME: Orchestrates upstream data into a daily three-meal plan near the calorie target
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

/// Temperature bands and their meal-category mapping
pub mod categories;
/// Random meal-combination search
pub mod selection;
/// Plan orchestration over the external services
pub mod service;

pub use categories::{MealCategories, TemperatureBand};
pub use selection::{select_meals, Selection};
pub use service::{PlanRequest, PlanResponse, PlanService};
