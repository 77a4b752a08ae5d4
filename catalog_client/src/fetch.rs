//! Cache-aside fetch pipeline
//!
//! Uses async reqwest for non-blocking HTTP requests. A fetch checks the
//! cache, goes to the network on a miss, decodes strictly and writes the
//! decoded value back to the cache on a best-effort basis.

use crate::cache::TieredCache;
use catalog_common::{Endpoint, FetchError, RequestSpec, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;

/// Async catalog client. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone, Default)]
pub struct CatalogClient {
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub fn with_http(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch `endpoint` and decode it into `T`.
    ///
    /// With both `cache` and `key`, a non-expired cached value is returned
    /// without touching the network, and a freshly decoded value is written
    /// back. Supplying only one of them fails with `CacheMismatch`.
    ///
    /// The returned future owns everything it needs, so it can be spawned or
    /// handed to [`crate::join::join_all`]. Concurrent fetches for the same
    /// key are not coalesced; each one goes to the network.
    pub fn fetch<T>(
        &self,
        endpoint: Endpoint,
        cache: Option<Arc<TieredCache<T>>>,
        key: Option<String>,
    ) -> impl Future<Output = Result<T>> + Send + 'static
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let http = self.http.clone();
        async move {
            let target = match (cache, key) {
                (Some(cache), Some(key)) => Some((cache, key)),
                (None, None) => None,
                (cache, key) => {
                    log::error!(
                        "Fetch for {} called with cache: {}, key: {}",
                        endpoint.path,
                        cache.is_some(),
                        key.is_some()
                    );
                    return Err(FetchError::CacheMismatch {
                        has_cache: cache.is_some(),
                        has_key: key.is_some(),
                    });
                }
            };

            // Check cache first
            if let Some((cache, key)) = &target {
                if let Some(value) = cache.get(key) {
                    log::debug!("Cache hit for {}", key);
                    return Ok(value);
                }
                log::info!("Cache miss for {}, fetching {}", key, endpoint.path);
            }

            let request = endpoint.build_request()?;
            let value: T = execute(&http, request).await?;

            // Store in cache; a failed write never fails the fetch
            if let Some((cache, key)) = &target {
                if let Err(e) = cache.insert(key, &value) {
                    log::warn!("Failed to cache {} in '{}': {}", key, cache.namespace(), e);
                }
            }

            Ok(value)
        }
    }

    /// Fetch through `cache` under `key`
    pub fn fetch_cached<T>(
        &self,
        endpoint: Endpoint,
        cache: &Arc<TieredCache<T>>,
        key: impl Into<String>,
    ) -> impl Future<Output = Result<T>> + Send + 'static
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    {
        self.fetch(endpoint, Some(Arc::clone(cache)), Some(key.into()))
    }

    /// Fetch straight from the network
    pub fn fetch_uncached<T>(&self, endpoint: Endpoint) -> impl Future<Output = Result<T>> + Send + 'static
    where
        T: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
    {
        self.fetch(endpoint, None, None)
    }
}

/// Send a built request and decode a 2xx body into `T`
async fn execute<T: DeserializeOwned>(http: &reqwest::Client, request: RequestSpec) -> Result<T> {
    log::debug!("{:?} {}", request.method, request.url.path());

    let mut builder = http.request(request.method.as_method(), request.url.clone());
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    if let Some(body) = request.body {
        builder = builder.body(body);
    }

    let response = builder.send().await?;
    let status = response.status();
    if !status.is_success() {
        log::warn!("{} returned {}", request.url.path(), status);
        return Err(FetchError::HttpStatus(status));
    }

    let bytes = response.bytes().await?;
    let value = serde_json::from_slice(&bytes).map_err(|e| {
        log::warn!("Failed to decode {}: {}", request.url.path(), e);
        FetchError::Decode(e)
    })?;
    Ok(value)
}

#[cfg(test)]
#[path = "fetch_tests.rs"]
mod tests;
