// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, API credentials, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

/// Default feels-like temperature (Celsius) when no location is available
pub const DEFAULT_FEELS_LIKE_CELSIUS: f64 = 15.0;

/// Calorie tolerance window (kcal) around the daily target
pub const CALORIE_TOLERANCE_KCAL: f64 = 100.0;

/// Attempt budget for the random meal-combination search
pub const MAX_SELECTION_ATTEMPTS: u32 = 100;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// CORS settings
    pub cors: CorsConfig,
    /// External service configuration
    pub external_services: ExternalServicesConfig,
    /// Upstream response cache TTLs
    pub cache: CacheTtlSettings,
    /// Meal plan behavior settings
    pub plan: PlanConfig,
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated allowed origins, or "*" for any
    pub allowed_origins: String,
}

/// External service configuration for all four upstreams
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalServicesConfig {
    /// Geocoding service configuration (Google Maps Geocoding API)
    pub geocoding: ExternalServiceConfig,
    /// Weather service configuration (API-Ninjas weather endpoint)
    pub weather: ExternalServiceConfig,
    /// Daily calorie calculator configuration (health-calculator API)
    pub calories: ExternalServiceConfig,
    /// Recipe search configuration (gustar.io German recipes API)
    pub recipes: ExternalServiceConfig,
    /// Per-request timeout for upstream calls, in seconds
    pub request_timeout_secs: u64,
}

/// Configuration for a single external service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalServiceConfig {
    /// API key, if the service requires one
    pub api_key: Option<String>,
    /// Service base URL
    pub base_url: String,
    /// Enable this service
    pub enabled: bool,
}

/// TTLs for the upstream response caches, in seconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheTtlSettings {
    /// Geocoded coordinates (long-lived data)
    pub coordinates_secs: u64,
    /// Feels-like temperature (volatile data)
    pub feels_like_secs: u64,
    /// Daily calorie targets
    pub calories_secs: u64,
    /// Recipe lists per category
    pub recipes_secs: u64,
    /// Maximum number of cache entries
    pub max_entries: usize,
}

impl Default for CacheTtlSettings {
    fn default() -> Self {
        Self {
            coordinates_secs: 43_200, // 12 hours
            feels_like_secs: 3_600,   // 1 hour
            calories_secs: 43_200,    // 12 hours
            recipes_secs: 43_200,     // 12 hours
            max_entries: 1_000,
        }
    }
}

/// Meal plan behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Temperature substituted when no location is resolved (Celsius)
    pub default_feels_like_celsius: f64,
    /// Accepted deviation from the calorie target (kcal)
    pub calorie_tolerance_kcal: f64,
    /// Random-search attempt budget
    pub max_selection_attempts: u32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            default_feels_like_celsius: DEFAULT_FEELS_LIKE_CELSIUS,
            calorie_tolerance_kcal: CALORIE_TOLERANCE_KCAL,
            max_selection_attempts: MAX_SELECTION_ATTEMPTS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric environment value fails to parse or
    /// validation rejects the resulting configuration.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            http_port: env_var_or("HTTP_PORT", "8000")?
                .parse()
                .context("Invalid HTTP_PORT value")?,
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")?),
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*")?,
            },
            external_services: ExternalServicesConfig {
                geocoding: ExternalServiceConfig {
                    api_key: env::var("GOOGLE_GEOCODE_API_KEY").ok(),
                    base_url: env_var_or(
                        "GEOCODING_BASE_URL",
                        "https://maps.googleapis.com/maps/api/geocode",
                    )?,
                    enabled: env_var_or("GEOCODING_SERVICE_ENABLED", "true")?
                        .parse()
                        .context("Invalid GEOCODING_SERVICE_ENABLED value")?,
                },
                weather: ExternalServiceConfig {
                    api_key: env::var("NINJA_API_KEY").ok(),
                    base_url: env_var_or("WEATHER_BASE_URL", "https://api.api-ninjas.com/v1")?,
                    enabled: env_var_or("WEATHER_SERVICE_ENABLED", "true")?
                        .parse()
                        .context("Invalid WEATHER_SERVICE_ENABLED value")?,
                },
                calories: ExternalServiceConfig {
                    api_key: env::var("CALORIERAPIDAPI_KEY").ok(),
                    base_url: env_var_or(
                        "CALORIE_API_BASE_URL",
                        "https://health-calculator-api.p.rapidapi.com",
                    )?,
                    enabled: true,
                },
                recipes: ExternalServiceConfig {
                    api_key: env::var("RAPIDAPI_KEY").ok(),
                    base_url: env_var_or(
                        "RECIPE_API_BASE_URL",
                        "https://gustar-io-deutsche-rezepte.p.rapidapi.com",
                    )?,
                    enabled: true,
                },
                request_timeout_secs: env_var_or("UPSTREAM_TIMEOUT_SECS", "10")?
                    .parse()
                    .context("Invalid UPSTREAM_TIMEOUT_SECS value")?,
            },
            cache: CacheTtlSettings {
                coordinates_secs: env_var_or("CACHE_TTL_COORDINATES", "43200")?
                    .parse()
                    .context("Invalid CACHE_TTL_COORDINATES value")?,
                feels_like_secs: env_var_or("CACHE_TTL_FEELS_LIKE", "3600")?
                    .parse()
                    .context("Invalid CACHE_TTL_FEELS_LIKE value")?,
                calories_secs: env_var_or("CACHE_TTL_CALORIES", "43200")?
                    .parse()
                    .context("Invalid CACHE_TTL_CALORIES value")?,
                recipes_secs: env_var_or("CACHE_TTL_RECIPES", "43200")?
                    .parse()
                    .context("Invalid CACHE_TTL_RECIPES value")?,
                max_entries: env_var_or("CACHE_MAX_ENTRIES", "1000")?
                    .parse()
                    .context("Invalid CACHE_MAX_ENTRIES value")?,
            },
            plan: PlanConfig::default(),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error on structurally invalid settings. Missing API keys
    /// only produce warnings: the affected upstream fails per-request and the
    /// pipeline degrades the way its caller defines.
    pub fn validate(&self) -> Result<()> {
        if self.cache.max_entries == 0 {
            return Err(anyhow::anyhow!("CACHE_MAX_ENTRIES must be greater than 0"));
        }
        if self.external_services.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS must be greater than 0"));
        }

        for (name, service) in [
            ("GOOGLE_GEOCODE_API_KEY", &self.external_services.geocoding),
            ("NINJA_API_KEY", &self.external_services.weather),
            ("CALORIERAPIDAPI_KEY", &self.external_services.calories),
            ("RAPIDAPI_KEY", &self.external_services.recipes),
        ] {
            if service.enabled && service.api_key.is_none() {
                warn!("Missing API key in environment: {name}");
            }
        }

        Ok(())
    }

    /// One-line configuration summary for startup logging (no secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http_port={} log_level={} geocoding={} weather={} cache_max_entries={}",
            self.http_port,
            self.log_level,
            self.external_services.geocoding.enabled,
            self.external_services.weather.enabled,
            self.cache.max_entries
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8000,
            log_level: LogLevel::Info,
            cors: CorsConfig {
                allowed_origins: "*".into(),
            },
            external_services: ExternalServicesConfig {
                geocoding: ExternalServiceConfig {
                    api_key: None,
                    base_url: "https://maps.googleapis.com/maps/api/geocode".into(),
                    enabled: true,
                },
                weather: ExternalServiceConfig {
                    api_key: None,
                    base_url: "https://api.api-ninjas.com/v1".into(),
                    enabled: true,
                },
                calories: ExternalServiceConfig {
                    api_key: None,
                    base_url: "https://health-calculator-api.p.rapidapi.com".into(),
                    enabled: true,
                },
                recipes: ExternalServiceConfig {
                    api_key: None,
                    base_url: "https://gustar-io-deutsche-rezepte.p.rapidapi.com".into(),
                    enabled: true,
                },
                request_timeout_secs: 10,
            },
            cache: CacheTtlSettings::default(),
            plan: PlanConfig::default(),
        }
    }
}

/// Get environment variable with default fallback
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.http_port, 8000);
        assert_eq!(config.plan.max_selection_attempts, 100);
    }

    #[test]
    fn test_cache_ttls_match_data_volatility() {
        let cache = CacheTtlSettings::default();
        // Weather is the only short-lived entry; the rest are 12 hours.
        assert!(cache.feels_like_secs < cache.coordinates_secs);
        assert_eq!(cache.coordinates_secs, 43_200);
        assert_eq!(cache.feels_like_secs, 3_600);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str_or_default("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_str_or_default("bogus"), LogLevel::Info);
    }
}
