//! Caching layer for place resolution.
//!
//! Every mode of a query resolves the same two places, and users tend to
//! ask about the same cities repeatedly. Resolved places are cached by
//! normalised query text; concurrent lookups of the same place share one
//! upstream request. Failures are never cached.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::planner::{GeoResolver, Place, ResolveError};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Place resolver with caching.
///
/// Wraps any `GeoResolver` and caches successful resolutions.
pub struct CachedGeoResolver<R> {
    inner: R,
    places: MokaCache<String, Place>,
}

impl<R: GeoResolver> CachedGeoResolver<R> {
    /// Create a new cached resolver.
    pub fn new(inner: R, config: &CacheConfig) -> Self {
        let places = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, places }
    }

    /// Access the underlying resolver for lookups that bypass the cache.
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Get cache statistics.
    pub fn entry_count(&self) -> u64 {
        self.places.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.places.invalidate_all();
    }
}

impl<R: GeoResolver> GeoResolver for CachedGeoResolver<R> {
    async fn resolve(&self, place: &str) -> Result<Place, ResolveError> {
        let entry = self
            .places
            .entry(cache_key(place))
            .or_try_insert_with(self.inner.resolve(place))
            .await
            .map_err(|e| (*e).clone())?;

        if entry.is_fresh() {
            debug!(place, "Geocoded");
        } else {
            debug!(place, "Geocode cache hit");
        }
        Ok(entry.into_value())
    }
}

/// Case- and whitespace-insensitive key for a place name.
fn cache_key(place: &str) -> String {
    place
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
