// ABOUTME: Feels-like temperature banding and the German meal-category labels per band
// ABOUTME: Band boundaries at 10 and 20 Celsius, boundaries and non-finite values go neutral
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use serde::{Deserialize, Serialize};

/// Weather-derived temperature band steering recipe categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureBand {
    /// Feels-like below 10 Celsius
    Cold,
    /// Feels-like above 20 Celsius
    Warm,
    /// Everything else, including exactly 10 or 20 and non-finite input
    Neutral,
}

impl TemperatureBand {
    /// Classify a feels-like temperature in Celsius
    ///
    /// `NaN` fails both comparisons and lands in the neutral band, so a
    /// garbage upstream reading degrades to the season-independent menu.
    #[must_use]
    pub fn from_feels_like(celsius: f64) -> Self {
        if celsius < 10.0 {
            Self::Cold
        } else if celsius > 20.0 {
            Self::Warm
        } else {
            Self::Neutral
        }
    }

    /// German search labels for the three meal slots in this band
    #[must_use]
    pub const fn categories(self) -> MealCategories {
        match self {
            Self::Cold => MealCategories {
                breakfast: "Warme Frühstücksgerichte",
                lunch: "Suppe",
                dinner: "Deftiges Abendessen",
            },
            Self::Warm => MealCategories {
                breakfast: "Leichtes Frühstück",
                lunch: "Salate",
                dinner: "Leichtes Abendessen",
            },
            Self::Neutral => MealCategories {
                breakfast: "Frühstück",
                lunch: "Hauptgericht",
                dinner: "Abendessen",
            },
        }
    }
}

/// German category labels used as recipe search text, one per meal slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MealCategories {
    pub breakfast: &'static str,
    pub lunch: &'static str,
    pub dinner: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_classification() {
        assert_eq!(TemperatureBand::from_feels_like(-5.0), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::from_feels_like(9.9), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::from_feels_like(15.0), TemperatureBand::Neutral);
        assert_eq!(TemperatureBand::from_feels_like(20.1), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::from_feels_like(35.0), TemperatureBand::Warm);
    }

    #[test]
    fn test_boundaries_are_neutral() {
        assert_eq!(TemperatureBand::from_feels_like(10.0), TemperatureBand::Neutral);
        assert_eq!(TemperatureBand::from_feels_like(20.0), TemperatureBand::Neutral);
    }

    #[test]
    fn test_non_finite_is_neutral() {
        assert_eq!(TemperatureBand::from_feels_like(f64::NAN), TemperatureBand::Neutral);
        assert_eq!(
            TemperatureBand::from_feels_like(f64::INFINITY),
            TemperatureBand::Warm
        );
        assert_eq!(
            TemperatureBand::from_feels_like(f64::NEG_INFINITY),
            TemperatureBand::Cold
        );
    }

    #[test]
    fn test_cold_band_categories() {
        let categories = TemperatureBand::Cold.categories();
        assert_eq!(categories.breakfast, "Warme Frühstücksgerichte");
        assert_eq!(categories.lunch, "Suppe");
        assert_eq!(categories.dinner, "Deftiges Abendessen");
    }

    #[test]
    fn test_neutral_band_categories() {
        let categories = TemperatureBand::Neutral.categories();
        assert_eq!(categories.breakfast, "Frühstück");
        assert_eq!(categories.lunch, "Hauptgericht");
        assert_eq!(categories.dinner, "Abendessen");
    }
}
