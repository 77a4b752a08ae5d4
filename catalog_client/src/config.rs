//! Runtime configuration for the catalog client

use std::path::PathBuf;
use std::time::Duration;

/// Default number of entries kept in a namespace's memory tier
pub const DEFAULT_MEMORY_COUNT_LIMIT: usize = 50;

/// Default time-to-live of a cached entry (3 hours)
pub const DEFAULT_TTL: Duration = Duration::from_secs(3 * 60 * 60);

/// Limits and expiry for one cache namespace. Fixed once the cache is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum entries in memory; 0 disables the bound
    pub memory_count_limit: usize,
    /// Maximum total serialised bytes in memory; 0 disables the bound
    pub memory_cost_limit: usize,
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory_count_limit: DEFAULT_MEMORY_COUNT_LIMIT,
            memory_cost_limit: 0,
            ttl: DEFAULT_TTL,
        }
    }
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_memory_count_limit(mut self, limit: usize) -> Self {
        self.memory_count_limit = limit;
        self
    }

    pub fn with_memory_cost_limit(mut self, limit: usize) -> Self {
        self.memory_cost_limit = limit;
        self
    }

    /// TTL given in minutes; huge values saturate instead of overflowing
    pub fn with_ttl_minutes(self, minutes: u64) -> Self {
        self.with_ttl(Duration::from_secs(minutes.saturating_mul(60)))
    }
}

/// Everything needed to talk to the catalog API and cache its answers
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub locale: String,
    pub scheme: String,
    pub host: String,
    /// Root directory; each namespace gets a subdirectory
    pub cache_dir: PathBuf,
    pub cache: CacheConfig,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            locale: "en-US".to_string(),
            scheme: "https".to_string(),
            host: "api.themoviedb.org".to_string(),
            cache_dir: default_cache_dir(),
            cache: CacheConfig::default(),
        }
    }
}

/// Returns the default cache root: ~/.cache/catalog_client
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("catalog_client")
}
