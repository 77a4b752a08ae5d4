//! Two-tier (memory + disk) cache with per-entry expiry

use super::clock::{Clock, SystemClock};
use super::disk::DiskTier;
use super::memory::MemoryTier;
use crate::config::CacheConfig;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Failure to persist an entry. The fetch pipeline only ever logs these.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cache serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A cached value with the time it was stored and how long it stays valid
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub value: T,
    pub stored_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    /// An entry is expired once `ttl` has fully elapsed since `stored_at`
    pub fn expired(&self, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(self.stored_at);
        match chrono::Duration::from_std(self.ttl) {
            Ok(ttl) => age >= ttl,
            // TTL beyond chrono's range never elapses
            Err(_) => false,
        }
    }
}

/// On-disk layout of an entry
#[derive(Serialize)]
struct DiskRecordRef<'a, T> {
    stored_at: DateTime<Utc>,
    ttl_ms: u64,
    value: &'a T,
}

#[derive(Deserialize)]
struct DiskRecord<T> {
    stored_at: DateTime<Utc>,
    ttl_ms: u64,
    value: T,
}

/// Counters snapshot for one namespace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub memory_hits: u64,
    pub disk_hits: u64,
    pub misses: u64,
    pub expired: u64,
}

#[derive(Default)]
struct Counters {
    memory_hits: AtomicU64,
    disk_hits: AtomicU64,
    misses: AtomicU64,
    expired: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// Keyed store of decoded values for one entity kind.
///
/// `get` checks memory, then disk (promoting disk hits into memory).
/// `insert` writes through to both tiers. Safe to share across tasks via `Arc`.
pub struct TieredCache<T> {
    namespace: String,
    config: CacheConfig,
    memory: Mutex<MemoryTier<T>>,
    disk: DiskTier,
    /// Serialises disk read-check-delete against write-rename. Taken before
    /// `memory` whenever both are held.
    disk_lock: Mutex<()>,
    clock: Arc<dyn Clock>,
    counters: Counters,
}

impl<T> TieredCache<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Create a cache whose disk tier lives in `dir`
    pub fn new(namespace: impl Into<String>, dir: &Path, config: CacheConfig) -> Self {
        Self::with_clock(namespace, dir, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        namespace: impl Into<String>,
        dir: &Path,
        config: CacheConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let namespace = namespace.into();
        log::info!(
            "Cache '{}': {} entries in memory, ttl {:?}",
            namespace,
            config.memory_count_limit,
            config.ttl
        );
        Self {
            memory: Mutex::new(MemoryTier::new(
                config.memory_count_limit,
                config.memory_cost_limit,
            )),
            disk: DiskTier::new(dir),
            disk_lock: Mutex::new(()),
            namespace,
            config,
            clock,
            counters: Counters::default(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn dir(&self) -> &Path {
        self.disk.dir()
    }

    /// Look up a non-expired value; expired entries found on the way are deleted
    pub fn get(&self, key: &str) -> Option<T> {
        let now = self.clock.now();

        {
            let mut memory = self.memory.lock();
            let lookup = memory
                .get(key)
                .map(|entry| (!entry.expired(now)).then(|| entry.value.clone()));
            match lookup {
                Some(Some(value)) => {
                    Counters::bump(&self.counters.memory_hits);
                    log::debug!("Memory cache hit for {}", key);
                    return Some(value);
                }
                Some(None) => {
                    memory.remove(key);
                    Counters::bump(&self.counters.expired);
                    log::debug!("Expired memory entry for {}", key);
                }
                None => {}
            }
        }

        let (entry, cost) = {
            let _guard = self.disk_lock.lock();
            let Some(bytes) = self.disk.read(key) else {
                Counters::bump(&self.counters.misses);
                return None;
            };
            let record: DiskRecord<T> = match serde_json::from_slice(&bytes) {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("Discarding unreadable cache entry for {}: {}", key, e);
                    self.disk.remove(key);
                    Counters::bump(&self.counters.misses);
                    return None;
                }
            };
            let entry = CacheEntry {
                value: record.value,
                stored_at: record.stored_at,
                ttl: Duration::from_millis(record.ttl_ms),
            };
            if entry.expired(now) {
                log::debug!("Expired disk entry for {}", key);
                self.disk.remove(key);
                Counters::bump(&self.counters.expired);
                Counters::bump(&self.counters.misses);
                return None;
            }
            (entry, bytes.len())
        };

        let value = entry.value.clone();
        self.memory.lock().promote(key.to_string(), entry, cost);
        Counters::bump(&self.counters.disk_hits);
        log::debug!("Disk cache hit for {}", key);
        Some(value)
    }

    /// Store a value with the namespace's configured TTL
    pub fn insert(&self, key: &str, value: &T) -> Result<(), CacheError> {
        self.insert_with_ttl(key, value, self.config.ttl)
    }

    /// Store a value in both tiers, stamped with the current time.
    ///
    /// The memory tier is updated even when the disk write fails.
    pub fn insert_with_ttl(&self, key: &str, value: &T, ttl: Duration) -> Result<(), CacheError> {
        // Held across both tiers: concurrent writers of one key must leave
        // memory and disk holding the same, latest-stamped value
        let _guard = self.disk_lock.lock();
        let stored_at = self.clock.now();
        let bytes = serde_json::to_vec(&DiskRecordRef {
            stored_at,
            ttl_ms: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
            value,
        })?;

        let evicted = self.memory.lock().insert(
            key.to_string(),
            CacheEntry {
                value: value.clone(),
                stored_at,
                ttl,
            },
            bytes.len(),
        );
        if evicted > 0 {
            log::debug!("'{}' evicted {} entries from memory", self.namespace, evicted);
        }

        self.disk.write(key, &bytes)?;
        log::debug!("Cached {} in '{}'", key, self.namespace);
        Ok(())
    }

    pub fn remove(&self, key: &str) {
        let _guard = self.disk_lock.lock();
        self.memory.lock().remove(key);
        self.disk.remove(key);
    }

    pub fn clear(&self) {
        let _guard = self.disk_lock.lock();
        self.memory.lock().clear();
        self.disk.clear();
        log::info!("Cleared cache '{}'", self.namespace);
    }

    pub fn len_in_memory(&self) -> usize {
        self.memory.lock().len()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            memory_hits: self.counters.memory_hits.load(Ordering::Relaxed),
            disk_hits: self.counters.disk_hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            expired: self.counters.expired.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
#[path = "tiered_tests.rs"]
mod tests;
