// ABOUTME: Core data models for user profiles, recipes, and assembled meal plans
// ABOUTME: Defines typed enums for biometric inputs and the wire shape of plan responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// User gender, as accepted by the calorie calculator API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse from a string, case-insensitively
    #[must_use]
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    /// The lowercase wire form expected by the calorie calculator
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Physical activity level, as accepted by the calorie calculator API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    ExtraActive,
}

impl ActivityLevel {
    /// Parse from the exact snake_case wire form
    #[must_use]
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "sedentary" => Some(Self::Sedentary),
            "lightly_active" => Some(Self::LightlyActive),
            "moderately_active" => Some(Self::ModeratelyActive),
            "very_active" => Some(Self::VeryActive),
            "extra_active" => Some(Self::ExtraActive),
            _ => None,
        }
    }

    /// The snake_case wire form expected by the calorie calculator
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::LightlyActive => "lightly_active",
            Self::ModeratelyActive => "moderately_active",
            Self::VeryActive => "very_active",
            Self::ExtraActive => "extra_active",
        }
    }
}

/// Weight goal used for the daily calorie calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl Goal {
    /// Parse from the exact lowercase wire form
    #[must_use]
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "lose" => Some(Self::Lose),
            "maintain" => Some(Self::Maintain),
            "gain" => Some(Self::Gain),
            _ => None,
        }
    }

    /// The lowercase wire form
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lose => "lose",
            Self::Maintain => "maintain",
            Self::Gain => "gain",
        }
    }
}

/// A partially-filled user profile
///
/// Every field is optional: profiles are built up by merging partial updates
/// and only checked for completeness when a meal plan is requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserProfile {
    /// Age in years (1-119)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Weight in kilograms (30-300 exclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Height in centimeters (100-250 exclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<Goal>,
    /// Free-form "city, country" string; optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl UserProfile {
    /// Field names required before a meal plan can be computed
    pub const REQUIRED_FIELDS: [&'static str; 5] =
        ["age", "weight", "height", "gender", "activity_level"];

    /// Overlay `other` onto `self`: fields present in `other` win
    pub fn merge(&mut self, other: &Self) {
        if other.age.is_some() {
            self.age = other.age;
        }
        if other.weight.is_some() {
            self.weight = other.weight;
        }
        if other.height.is_some() {
            self.height = other.height;
        }
        if other.gender.is_some() {
            self.gender = other.gender;
        }
        if other.activity_level.is_some() {
            self.activity_level = other.activity_level;
        }
        if other.goal.is_some() {
            self.goal = other.goal;
        }
        if other.location.is_some() {
            self.location.clone_from(&other.location);
        }
    }

    /// Names of required fields still missing from this profile
    #[must_use]
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.age.is_none() {
            missing.push("age");
        }
        if self.weight.is_none() {
            missing.push("weight");
        }
        if self.height.is_none() {
            missing.push("height");
        }
        if self.gender.is_none() {
            missing.push("gender");
        }
        if self.activity_level.is_none() {
            missing.push("activity_level");
        }
        missing
    }

    /// Location, if present and non-blank
    #[must_use]
    pub fn trimmed_location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Geographic coordinates resolved from a location name
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Nutrition facts attached to a recipe
///
/// Only `kcal` is interpreted; everything else the upstream reports is kept
/// verbatim and passed through to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nutrition {
    pub kcal: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A recipe returned by the recipe search API
///
/// Opaque payload apart from `nutrition.kcal`: title, ingredients, images and
/// whatever else the upstream adds all ride along in `extra` unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub nutrition: Nutrition,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Recipe {
    /// Caloric value of this recipe in kcal
    #[must_use]
    pub const fn kcal(&self) -> f64 {
        self.nutrition.kcal
    }

    /// Minimal recipe carrying only a calorie value (test construction)
    #[must_use]
    pub fn from_kcal(kcal: f64) -> Self {
        Self {
            nutrition: Nutrition {
                kcal,
                extra: serde_json::Map::new(),
            },
            extra: serde_json::Map::new(),
        }
    }
}

/// A selected day of meals with the recomputed calorie total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    pub breakfast: Recipe,
    pub lunch: Recipe,
    pub dinner: Recipe,
    /// Sum of the three recipes' kcal values, recomputed at selection time
    pub total_kcal: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_merge_overlays_fields() {
        let mut base = UserProfile {
            age: Some(30),
            weight: Some(70.0),
            ..UserProfile::default()
        };
        let update = UserProfile {
            weight: Some(72.5),
            gender: Some(Gender::Female),
            ..UserProfile::default()
        };
        base.merge(&update);

        assert_eq!(base.age, Some(30));
        assert_eq!(base.weight, Some(72.5));
        assert_eq!(base.gender, Some(Gender::Female));
    }

    #[test]
    fn test_missing_required_fields() {
        let profile = UserProfile {
            age: Some(30),
            gender: Some(Gender::Male),
            ..UserProfile::default()
        };
        assert_eq!(
            profile.missing_required_fields(),
            vec!["weight", "height", "activity_level"]
        );
        assert!(UserProfile::default().missing_required_fields().len() == 5);
    }

    #[test]
    fn test_trimmed_location_filters_blank() {
        let mut profile = UserProfile::default();
        assert_eq!(profile.trimmed_location(), None);
        profile.location = Some("   ".into());
        assert_eq!(profile.trimmed_location(), None);
        profile.location = Some(" Berlin, DE ".into());
        assert_eq!(profile.trimmed_location(), Some("Berlin, DE"));
    }

    #[test]
    fn test_recipe_opaque_passthrough() {
        let raw = serde_json::json!({
            "title": "Linsensuppe",
            "image_urls": ["https://example.com/a.jpg"],
            "nutrition": { "kcal": 450.0, "protein": 18.2 }
        });
        let recipe: Recipe = serde_json::from_value(raw.clone()).unwrap();
        assert!((recipe.kcal() - 450.0).abs() < f64::EPSILON);

        // Round-trips with unknown fields intact
        let back = serde_json::to_value(&recipe).unwrap();
        assert_eq!(back["title"], raw["title"]);
        assert_eq!(back["nutrition"]["protein"], raw["nutrition"]["protein"]);
    }
}
