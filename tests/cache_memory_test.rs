// ABOUTME: Integration tests for the in-memory upstream cache
// ABOUTME: Tests TTL expiration, LRU capacity limits, and background cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mahlzeit Project

use anyhow::Result;
use mahlzeit_server::cache::memory::InMemoryCache;
use mahlzeit_server::cache::{CacheConfig, CacheKey, CacheProvider, CacheResource};
use mahlzeit_server::models::Recipe;
use std::time::Duration;

/// Helper: Create in-memory cache with custom config
async fn create_test_cache(max_entries: usize, cleanup_interval_secs: u64) -> Result<InMemoryCache> {
    let config = CacheConfig {
        max_entries,
        cleanup_interval: Duration::from_secs(cleanup_interval_secs),
        enable_background_cleanup: false, // Disable in tests to avoid tokio runtime conflicts
        ..CacheConfig::default()
    };
    Ok(InMemoryCache::new(config).await?)
}

#[tokio::test]
async fn test_cache_set_and_get() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;
    let key = CacheKey::new(CacheResource::coordinates("Berlin, Germany"));
    let data = (52.52_f64, 13.405_f64);

    cache.set(&key, &data, Duration::from_secs(10)).await?;

    let retrieved: Option<(f64, f64)> = cache.get(&key).await?;
    assert_eq!(retrieved, Some(data));

    Ok(())
}

#[tokio::test]
async fn test_cache_expiration() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;
    let key = CacheKey::new(CacheResource::feels_like(52.52, 13.405));

    cache.set(&key, &11.4_f64, Duration::from_secs(1)).await?;

    // Should exist immediately
    assert!(cache.exists(&key).await?);

    // Wait for expiration
    tokio::time::sleep(Duration::from_millis(1100)).await;

    // Should be expired
    let retrieved: Option<f64> = cache.get(&key).await?;
    assert_eq!(retrieved, None);
    assert!(!cache.exists(&key).await?);

    Ok(())
}

#[tokio::test]
async fn test_cache_ttl() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;
    let key = CacheKey::new(CacheResource::recipes("Suppe"));
    let recipes = vec![Recipe::from_kcal(450.0)];

    cache.set(&key, &recipes, Duration::from_secs(10)).await?;

    let ttl = cache.ttl(&key).await?;
    assert!(ttl.is_some());
    assert!(ttl.unwrap().as_secs() <= 10);
    assert!(ttl.unwrap().as_secs() >= 9); // Should be close to 10

    Ok(())
}

#[tokio::test]
async fn test_cache_invalidate() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;
    let key = CacheKey::new(CacheResource::daily_calories(
        30,
        70.0,
        175.0,
        "male",
        "moderately_active",
        "maintain",
    ));

    cache.set(&key, &2000.0_f64, Duration::from_secs(60)).await?;
    assert!(cache.exists(&key).await?);

    cache.invalidate(&key).await?;

    assert!(!cache.exists(&key).await?);
    let retrieved: Option<f64> = cache.get(&key).await?;
    assert_eq!(retrieved, None);

    Ok(())
}

#[tokio::test]
async fn test_cache_capacity_eviction() -> Result<()> {
    // Create cache with very small capacity
    let cache = create_test_cache(10, 300).await?;

    // Fill cache beyond capacity
    for i in 0..20 {
        let key = CacheKey::new(CacheResource::recipes(&format!("Kategorie {i}")));
        cache.set(&key, &vec![Recipe::from_kcal(100.0)], Duration::from_secs(60))
            .await?;
    }

    // LRU eviction keeps the cache at capacity
    let mut count = 0;
    for i in 0..20 {
        let key = CacheKey::new(CacheResource::recipes(&format!("Kategorie {i}")));
        if cache.exists(&key).await? {
            count += 1;
        }
    }
    assert_eq!(count, 10);

    // The most recently written entries survive
    let newest = CacheKey::new(CacheResource::recipes("Kategorie 19"));
    assert!(cache.exists(&newest).await?);

    Ok(())
}

#[tokio::test]
async fn test_cache_background_cleanup() -> Result<()> {
    // Short cleanup interval, background task enabled
    let config = CacheConfig {
        max_entries: 100,
        cleanup_interval: Duration::from_secs(1),
        enable_background_cleanup: true,
        ..CacheConfig::default()
    };
    let cache = InMemoryCache::new(config).await?;

    let keys: Vec<_> = (0..5)
        .map(|i| CacheKey::new(CacheResource::recipes(&format!("Gericht {i}"))))
        .collect();

    for key in &keys {
        cache.set(key, &vec![Recipe::from_kcal(250.0)], Duration::from_secs(1))
            .await?;
    }

    for key in &keys {
        assert!(cache.exists(key).await?);
    }

    // Wait for expiration + cleanup cycles (1s TTL + 1s cleanup interval + margin)
    tokio::time::sleep(Duration::from_millis(2500)).await;

    for key in &keys {
        assert!(!cache.exists(key).await?);
    }

    Ok(())
}

#[tokio::test]
async fn test_cache_clear_all() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;

    let keys: Vec<_> = (0..10)
        .map(|i| CacheKey::new(CacheResource::coordinates(&format!("Stadt {i}"))))
        .collect();

    for key in &keys {
        cache.set(key, &(0.0_f64, 0.0_f64), Duration::from_secs(60)).await?;
    }

    for key in &keys {
        assert!(cache.exists(key).await?);
    }

    cache.clear_all().await?;

    for key in &keys {
        assert!(!cache.exists(key).await?);
    }

    Ok(())
}

#[tokio::test]
async fn test_cache_health_check() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;

    // In-memory cache should always be healthy
    cache.health_check().await?;

    Ok(())
}

#[tokio::test]
async fn test_cache_different_resource_types() -> Result<()> {
    let cache = create_test_cache(100, 300).await?;

    let resources = vec![
        CacheResource::coordinates("Hamburg"),
        CacheResource::feels_like(53.55, 9.99),
        CacheResource::daily_calories(25, 60.0, 165.0, "female", "sedentary", "lose"),
        CacheResource::recipes("Abendessen"),
    ];

    for resource in &resources {
        let key = CacheKey::new(resource.clone());
        cache.set(&key, &1_f64, Duration::from_secs(60)).await?;
    }

    // All should be retrievable under distinct keys
    for resource in resources {
        let key = CacheKey::new(resource);
        let retrieved: Option<f64> = cache.get(&key).await?;
        assert_eq!(retrieved, Some(1.0));
    }

    Ok(())
}
