//! Catalog Common - shared types for catalog API access
//!
//! Endpoint descriptions, the cache key convention and the fetch error
//! taxonomy used by every catalog client.

pub mod endpoint;
pub mod error;
pub mod key;

pub use endpoint::{Endpoint, HttpMethod, RequestSpec};
pub use error::{FetchError, Result};
pub use key::cache_key;
