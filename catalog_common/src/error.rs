//! Error types for catalog fetches

use thiserror::Error;

/// Every way a single catalog fetch can fail.
///
/// Errors are surfaced verbatim to the caller; nothing here is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint could not be turned into a valid request URL
    #[error("Invalid endpoint URL {url}: {reason}")]
    UrlConstruction { url: String, reason: String },

    /// Only one of cache / key was supplied to a fetch
    #[error("Cache and key must be supplied together (cache: {has_cache}, key: {has_key})")]
    CacheMismatch { has_cache: bool, has_key: bool },

    /// HTTP request failed (DNS, connection refused, timeout, ...)
    #[error("Network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// A spawned fetch task ended without producing a result
    #[error("Fetch task failed: {0}")]
    Join(String),
}

impl FetchError {
    /// Status code carried by an `HttpStatus` error
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpStatus(status) => Some(status.as_u16()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err)
    }
}

/// Result alias for catalog fetches
pub type Result<T> = std::result::Result<T, FetchError>;
