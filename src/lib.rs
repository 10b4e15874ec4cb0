// ABOUTME: Main library entry point for the Mahlzeit meal plan server
// ABOUTME: Provides a weather-aware daily meal plan HTTP API over four upstream services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

#![deny(unsafe_code)]

//! # Mahlzeit Server
//!
//! An HTTP service computing personalized daily meal plans. Each plan combines
//! the user's daily calorie requirement, the feels-like temperature at their
//! location, and German recipe search results into a breakfast/lunch/dinner
//! selection near the calorie target.
//!
//! ## Pipeline
//!
//! 1. **Calories**: Mifflin-St Jeor daily target from the stored biometrics
//! 2. **Weather**: geocode the optional location, fetch the feels-like
//!    temperature, and pick a cold/warm/neutral menu accordingly
//! 3. **Recipes**: search one German category per meal slot
//! 4. **Selection**: bounded random search for a combination within
//!    100 kcal of the target
//!
//! Upstream responses are cached in-memory with per-resource TTLs; profiles
//! are stored per session and merged from partial updates.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mahlzeit_server::config::environment::ServerConfig;
//! use mahlzeit_server::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     // Load configuration
//!     let config = ServerConfig::from_env()?;
//!
//!     println!("Mahlzeit server configured with port: HTTP={}", config.http_port);
//!
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the binary crate (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access them.

/// Upstream response caching with TTLs and LRU eviction
pub mod cache;

/// Environment-driven configuration
pub mod config;

/// Unified error handling with stable error codes
pub mod errors;

/// External service clients (geocoding, weather, calories, recipes)
pub mod external;

/// Structured logging setup
pub mod logging;

/// `HTTP` middleware (CORS, cache suppression)
pub mod middleware;

/// Core data models (profiles, recipes, meal plans)
pub mod models;

/// Meal plan engine (temperature bands, selection, orchestration)
pub mod plan;

/// Session-keyed profile storage and validation
pub mod profile;

/// Shared server resources container
pub mod resources;

/// `HTTP` route handlers
pub mod routes;

/// `HTTP` server assembly and lifecycle
pub mod server;
