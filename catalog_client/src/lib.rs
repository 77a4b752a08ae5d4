//! Catalog Client - cached, concurrent access to a movie/TV catalog API
//!
//! Endpoints are described as data, fetched through a memory + disk cache
//! with per-entry expiry, and screens that need several queries fan them out
//! and join the results in order.

pub mod cache;
pub mod config;
pub mod fetch;
pub mod join;
pub mod models;
pub mod screens;
pub mod tmdb;

pub use cache::{CacheRegistry, CacheStats, Namespace, RegistryConfig, TieredCache};
pub use catalog_common::{cache_key, Endpoint, FetchError, HttpMethod, Result};
pub use config::{CacheConfig, ClientConfig};
pub use fetch::CatalogClient;
pub use join::{join2, join3, join_all};
pub use tmdb::{MovieList, TmdbApi};
