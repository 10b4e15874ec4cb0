// ABOUTME: Session-keyed user profile store with field-level validation of partial updates
// ABOUTME: Profiles merge incrementally; completeness is only enforced at plan time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use crate::models::{ActivityLevel, Gender, Goal, UserProfile};
use dashmap::DashMap;
use std::collections::BTreeMap;

/// Profile key used when a request carries no session header
pub const DEFAULT_SESSION: &str = "default";

/// Per-field validation errors, field name to message
pub type FieldErrors = BTreeMap<String, String>;

fn invalid(errors: &mut FieldErrors, field: &str) {
    errors.insert(field.to_owned(), format!("Invalid value for {field}"));
}

/// Numeric coercion: JSON numbers and numeric strings are both accepted
fn as_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_str(value: &serde_json::Value) -> Option<&str> {
    value.as_str()
}

/// Validate a partial profile update given as a JSON object
///
/// Checks each known field independently and collects all failures; unknown
/// fields are ignored. `null` explicitly clears nothing and passes through
/// as absent, mirroring a field simply not being sent.
///
/// # Errors
///
/// Returns the per-field error map when any present field fails validation.
pub fn validate_update(payload: &serde_json::Value) -> Result<UserProfile, FieldErrors> {
    let mut profile = UserProfile::default();
    let mut errors = FieldErrors::new();

    let Some(object) = payload.as_object() else {
        errors.insert("body".to_owned(), "Expected a JSON object".to_owned());
        return Err(errors);
    };

    for (field, value) in object {
        if value.is_null() {
            continue;
        }
        match field.as_str() {
            "age" => match as_number(value) {
                // Integer years, exclusive bounds
                Some(n) if n.fract() == 0.0 && n > 0.0 && n < 120.0 => {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                    {
                        profile.age = Some(n as u32);
                    }
                }
                _ => invalid(&mut errors, field),
            },
            "weight" => match as_number(value) {
                Some(n) if n > 30.0 && n < 300.0 => profile.weight = Some(n),
                _ => invalid(&mut errors, field),
            },
            "height" => match as_number(value) {
                Some(n) if n > 100.0 && n < 250.0 => profile.height = Some(n),
                _ => invalid(&mut errors, field),
            },
            "gender" => match as_str(value).and_then(Gender::parse_str) {
                Some(gender) => profile.gender = Some(gender),
                None => invalid(&mut errors, field),
            },
            "activity_level" => match as_str(value).and_then(ActivityLevel::parse_str) {
                Some(level) => profile.activity_level = Some(level),
                None => invalid(&mut errors, field),
            },
            "goal" => match as_str(value).and_then(Goal::parse_str) {
                Some(goal) => profile.goal = Some(goal),
                None => invalid(&mut errors, field),
            },
            "location" => match as_str(value) {
                Some(s) if !s.trim().is_empty() => profile.location = Some(s.to_owned()),
                _ => invalid(&mut errors, field),
            },
            // Unknown fields are dropped rather than stored
            _ => {}
        }
    }

    if errors.is_empty() {
        Ok(profile)
    } else {
        Err(errors)
    }
}

/// Concurrent session-to-profile map
///
/// Sessions are client-chosen opaque strings from the `x-session-id` header;
/// requests without one share the [`DEFAULT_SESSION`] profile.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: DashMap<String, UserProfile>,
}

impl ProfileStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Profile for a session, empty if the session is unknown
    #[must_use]
    pub fn get(&self, session: &str) -> UserProfile {
        self.profiles
            .get(session)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Merge a validated partial update into a session's profile
    ///
    /// Returns the profile as stored after the merge.
    pub fn update(&self, session: &str, update: &UserProfile) -> UserProfile {
        let mut entry = self.profiles.entry(session.to_owned()).or_default();
        entry.merge(update);
        entry.clone()
    }

    /// Drop every stored profile
    pub fn clear(&self) {
        self.profiles.clear();
    }

    /// Number of stored profiles
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether no profiles are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
