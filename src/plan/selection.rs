// ABOUTME: Bounded random search for a three-meal combination near the calorie target
// ABOUTME: Keeps the last sampled combination when the attempt budget runs out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use crate::models::{MealPlan, Recipe};
use rand::Rng;

/// Outcome of the meal-combination search
#[derive(Debug, Clone)]
pub struct Selection {
    /// Chosen meals with their recomputed calorie total
    pub plan: MealPlan,
    /// Number of combinations sampled (1..=budget)
    pub attempts: u32,
    /// Whether the final combination landed inside the tolerance window
    pub within_tolerance: bool,
}

/// Randomly sample one recipe per slot until the total lands within
/// `tolerance` kcal of `target`, up to `max_attempts` samples
///
/// Every attempt draws all three slots fresh. When the budget is exhausted
/// the last sampled combination is returned as-is, so callers always get a
/// plan once the input lists are non-empty. A `NaN` target can never satisfy
/// the window and deterministically exhausts the budget.
///
/// # Panics
///
/// Panics if any input list is empty; callers gate on that before selecting.
pub fn select_meals<R: Rng + ?Sized>(
    breakfasts: &[Recipe],
    lunches: &[Recipe],
    dinners: &[Recipe],
    target: f64,
    tolerance: f64,
    max_attempts: u32,
    rng: &mut R,
) -> Selection {
    assert!(
        !breakfasts.is_empty() && !lunches.is_empty() && !dinners.is_empty(),
        "meal selection requires non-empty recipe lists"
    );

    let mut attempts = 0;
    let mut picks = (0, 0, 0);
    let mut within_tolerance = false;

    while attempts < max_attempts {
        attempts += 1;
        picks = (
            rng.gen_range(0..breakfasts.len()),
            rng.gen_range(0..lunches.len()),
            rng.gen_range(0..dinners.len()),
        );

        let total = breakfasts[picks.0].kcal() + lunches[picks.1].kcal() + dinners[picks.2].kcal();
        if (total - target).abs() <= tolerance {
            within_tolerance = true;
            break;
        }
    }

    let breakfast = breakfasts[picks.0].clone();
    let lunch = lunches[picks.1].clone();
    let dinner = dinners[picks.2].clone();
    let total_kcal = breakfast.kcal() + lunch.kcal() + dinner.kcal();

    Selection {
        plan: MealPlan {
            breakfast,
            lunch,
            dinner,
            total_kcal,
        },
        attempts,
        within_tolerance,
    }
}
