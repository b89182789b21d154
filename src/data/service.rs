//! Cache-checked location queries
//!
//! Every read except a single-location lookup goes through the shared
//! `ResponseCache` first. Cached payloads are the raw JSON bodies, decoded on
//! each hit.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{ApiError, FilterCriteria, Location, NewLocation, QueryParams, Transport};
use crate::cache::ResponseCache;

const LOCATIONS_PATH: &str = "/locations";
const COUNT_PATH: &str = "/locations/count";
const CITIES_PATH: &str = "/cities";
const CATEGORIES_PATH: &str = "/categories";
const COUNTRIES_PATH: &str = "/countries";

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

/// Location query service
///
/// Cloning is cheap; clones share the transport and the cache.
#[derive(Clone)]
pub struct LocationService {
    transport: Arc<dyn Transport>,
    cache: Arc<Mutex<ResponseCache>>,
}

impl LocationService {
    pub fn new(transport: Arc<dyn Transport>, cache: ResponseCache) -> Self {
        Self {
            transport,
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    fn lock_cache(&self) -> MutexGuard<'_, ResponseCache> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// GET `path` through the cache, storing the body only if it decodes
    async fn cached_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: QueryParams,
    ) -> Result<T, ApiError> {
        let key = params.cache_key(path);

        let hit = self.lock_cache().get(&key).cloned();
        if let Some(payload) = hit {
            return Ok(serde_json::from_value(payload)?);
        }

        tracing::debug!(%key, "cache miss");
        let payload = self.transport.get(path, &params).await?;
        let decoded = T::deserialize(&payload)?;
        self.lock_cache().put(key, payload);
        Ok(decoded)
    }

    /// Lists locations matching the server-side part of `criteria`
    ///
    /// `criteria.search` is ignored here; callers filter locally.
    pub async fn list_locations(&self, criteria: &FilterCriteria) -> Result<Vec<Location>, ApiError> {
        self.cached_get(LOCATIONS_PATH, criteria.location_params())
            .await
    }

    /// Number of locations matching country, city and category
    pub async fn count_locations(&self, criteria: &FilterCriteria) -> Result<u64, ApiError> {
        let response: CountResponse = self.cached_get(COUNT_PATH, criteria.count_params()).await?;
        Ok(response.count)
    }

    /// Fetches one location, bypassing the cache
    pub async fn get_location_by_id(&self, id: u64) -> Result<Location, ApiError> {
        let path = format!("{}/{}", LOCATIONS_PATH, id);
        let payload = self.transport.get(&path, &QueryParams::new()).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// Validates and submits a new location
    ///
    /// Nothing is cached or invalidated; list results may stay stale until
    /// their TTL runs out.
    pub async fn create_location(&self, new_location: &NewLocation) -> Result<Location, ApiError> {
        new_location.validate().map_err(ApiError::Invalid)?;
        let body = serde_json::to_value(new_location)?;
        let payload = self.transport.post(LOCATIONS_PATH, body).await?;
        Ok(serde_json::from_value(payload)?)
    }

    /// City names, optionally scoped to one country
    pub async fn list_cities(&self, country: Option<&str>) -> Result<Vec<String>, ApiError> {
        let mut params = QueryParams::new();
        params.insert_opt(
            "country",
            country
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        );
        self.cached_get(CITIES_PATH, params).await
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, ApiError> {
        self.cached_get(CATEGORIES_PATH, QueryParams::new()).await
    }

    pub async fn list_countries(&self) -> Result<Vec<String>, ApiError> {
        self.cached_get(COUNTRIES_PATH, QueryParams::new()).await
    }

    /// Drops every cached response
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    /// Number of cached responses, expired ones included
    pub fn cached_entries(&self) -> usize {
        self.lock_cache().len()
    }

    /// Seeds the cache directly
    #[cfg(test)]
    fn prime(&self, key: impl Into<String>, payload: serde_json::Value) {
        self.lock_cache().put(key, payload);
    }
}
