// ABOUTME: Cache abstraction layer for upstream API response caching
// ABOUTME: Structured cache keys per upstream resource with per-resource TTLs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

/// In-memory cache implementation
pub mod memory;

use crate::config::environment::CacheTtlSettings;
use crate::errors::AppResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default interval between background expired-entry sweeps
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300;

/// Cache provider trait for pluggable backend implementations
///
/// # Examples
///
/// ```rust,no_run
/// use mahlzeit_server::cache::{CacheConfig, CacheKey, CacheProvider, CacheResource};
/// use mahlzeit_server::cache::memory::InMemoryCache;
/// use std::time::Duration;
/// # async fn example() -> Result<(), mahlzeit_server::errors::AppError> {
///
/// let config = CacheConfig {
///     enable_background_cleanup: false, // Disable for example
///     ..Default::default()
/// };
/// let cache: InMemoryCache = InMemoryCache::new(config).await?;
///
/// let key = CacheKey::new(CacheResource::coordinates("Berlin, Germany"));
/// cache.set(&key, &(52.52_f64, 13.405_f64), Duration::from_secs(3600)).await?;
///
/// let cached: Option<(f64, f64)> = cache.get(&key).await?;
/// if let Some((lat, lon)) = cached {
///     println!("Cached coordinates: {lat}, {lon}");
/// }
///
/// cache.invalidate(&key).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait::async_trait]
pub trait CacheProvider: Send + Sync + Clone {
    /// Create new cache instance with configuration
    ///
    /// # Errors
    ///
    /// Returns an error if cache initialization fails
    async fn new(config: CacheConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Store value in cache with TTL
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or storage fails
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> AppResult<()>;

    /// Retrieve value from cache, `None` on miss or expiry
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails
    async fn get<T: for<'de> Deserialize<'de>>(&self, key: &CacheKey) -> AppResult<Option<T>>;

    /// Remove single cache entry
    ///
    /// # Errors
    ///
    /// Returns an error if invalidation fails
    async fn invalidate(&self, key: &CacheKey) -> AppResult<()>;

    /// Check if key exists in cache
    ///
    /// # Errors
    ///
    /// Returns an error if existence check fails
    async fn exists(&self, key: &CacheKey) -> AppResult<bool>;

    /// Get remaining TTL for key
    ///
    /// # Errors
    ///
    /// Returns an error if TTL check fails
    async fn ttl(&self, key: &CacheKey) -> AppResult<Option<Duration>>;

    /// Verify cache backend is healthy
    ///
    /// # Errors
    ///
    /// Returns an error if health check fails
    async fn health_check(&self) -> AppResult<()>;

    /// Clear all cache entries (admin endpoint and tests)
    ///
    /// # Errors
    ///
    /// Returns an error if clear operation fails
    async fn clear_all(&self) -> AppResult<()>;
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries
    pub max_entries: usize,
    /// Cleanup interval for expired entries
    pub cleanup_interval: Duration,
    /// Enable background cleanup task (should be false in tests to avoid runtime conflicts)
    pub enable_background_cleanup: bool,
    /// Per-resource TTL configuration
    pub ttl: CacheTtlSettings,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1_000,
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
            // Default to enabled - production code should use background cleanup
            // Tests can explicitly disable by setting to false
            enable_background_cleanup: true,
            ttl: CacheTtlSettings::default(),
        }
    }
}

impl CacheConfig {
    /// Build cache configuration from the server's TTL settings
    #[must_use]
    pub fn from_settings(settings: &CacheTtlSettings) -> Self {
        Self {
            max_entries: settings.max_entries,
            ttl: settings.clone(),
            ..Self::default()
        }
    }

    /// Get TTL duration for a specific cache resource type
    #[must_use]
    pub const fn ttl_for_resource(&self, resource: &CacheResource) -> Duration {
        match resource {
            CacheResource::Coordinates { .. } => Duration::from_secs(self.ttl.coordinates_secs),
            CacheResource::FeelsLike { .. } => Duration::from_secs(self.ttl.feels_like_secs),
            CacheResource::DailyCalories { .. } => Duration::from_secs(self.ttl.calories_secs),
            CacheResource::Recipes { .. } => Duration::from_secs(self.ttl.recipes_secs),
        }
    }
}

/// Structured cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Specific resource being cached
    pub resource: CacheResource,
}

impl CacheKey {
    /// Create new cache key
    #[must_use]
    pub const fn new(resource: CacheResource) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mahlzeit:{}", self.resource)
    }
}

/// Cache resource types with specific parameters
///
/// Variant parameters are pre-normalized strings so keys stay `Eq + Hash`
/// and equivalent inputs ("Berlin, DE" vs "berlin,de") share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheResource {
    /// Geocoded coordinates for a location string (12h TTL)
    Coordinates {
        /// Normalized location (lowercase, whitespace stripped)
        location: String,
    },
    /// Feels-like temperature at a coordinate pair (1h TTL)
    FeelsLike {
        /// Coordinates rounded to 4 decimal places, "lat,lon"
        position: String,
    },
    /// Daily calorie requirement for a biometric parameter set (12h TTL)
    DailyCalories {
        /// Colon-joined biometric parameters
        fingerprint: String,
    },
    /// Recipe list for a meal category (12h TTL)
    Recipes {
        /// German category label as sent to the recipe search
        category: String,
    },
}

impl CacheResource {
    /// Coordinates entry, normalizing the location string
    #[must_use]
    pub fn coordinates(location: &str) -> Self {
        let normalized: String = location
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        Self::Coordinates {
            location: normalized,
        }
    }

    /// Feels-like entry for a coordinate pair
    ///
    /// Rounding to 4 decimals (~11m) keeps nearby lookups on one entry.
    #[must_use]
    pub fn feels_like(latitude: f64, longitude: f64) -> Self {
        Self::FeelsLike {
            position: format!("{latitude:.4},{longitude:.4}"),
        }
    }

    /// Daily-calories entry keyed on the full biometric parameter set
    #[must_use]
    pub fn daily_calories(
        age: u32,
        weight: f64,
        height: f64,
        gender: &str,
        activity_level: &str,
        goal: &str,
    ) -> Self {
        Self::DailyCalories {
            fingerprint: format!("{age}:{weight}:{height}:{gender}:{activity_level}:{goal}"),
        }
    }

    /// Recipe-list entry for a category
    #[must_use]
    pub fn recipes(category: &str) -> Self {
        Self::Recipes {
            category: category.to_owned(),
        }
    }
}

impl fmt::Display for CacheResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinates { location } => write!(f, "coords:{location}"),
            Self::FeelsLike { position } => write!(f, "feels_like:{position}"),
            Self::DailyCalories { fingerprint } => write!(f, "calories:{fingerprint}"),
            Self::Recipes { category } => write!(f, "recipes:{category}"),
        }
    }
}
