//! Bounded in-memory tier with least-recently-used eviction

use super::tiered::CacheEntry;
use lru::LruCache;
use std::num::NonZeroUsize;

struct Slot<T> {
    entry: CacheEntry<T>,
    cost: usize,
}

/// In-memory tier. A limit of 0 means "unbounded" for that dimension.
///
/// Recency and the count limit are handled by [`LruCache`]; the cost limit is
/// enforced on top by popping least-recently-used entries.
/// Not synchronised on its own; the owning cache wraps it in a mutex.
pub(crate) struct MemoryTier<T> {
    slots: LruCache<String, Slot<T>>,
    cost_limit: usize,
    total_cost: usize,
}

impl<T> MemoryTier<T> {
    pub(crate) fn new(count_limit: usize, cost_limit: usize) -> Self {
        let slots = match NonZeroUsize::new(count_limit) {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };
        Self {
            slots,
            cost_limit,
            total_cost: 0,
        }
    }

    /// Look up an entry and mark it as most recently used
    pub(crate) fn get(&mut self, key: &str) -> Option<&CacheEntry<T>> {
        self.slots.get(key).map(|slot| &slot.entry)
    }

    /// Insert or replace an entry, then evict down to the configured limits.
    /// Returns how many other entries were evicted.
    pub(crate) fn insert(&mut self, key: String, entry: CacheEntry<T>, cost: usize) -> usize {
        let mut evicted = 0;
        self.total_cost += cost;
        if let Some((old_key, old)) = self.slots.push(key.clone(), Slot { entry, cost }) {
            self.total_cost -= old.cost;
            if old_key != key {
                log::debug!("Evicting '{}' from memory tier", old_key);
                evicted += 1;
            }
        }

        while self.cost_limit > 0 && self.total_cost > self.cost_limit {
            let Some((old_key, old)) = self.slots.pop_lru() else { break };
            self.total_cost -= old.cost;
            if old_key != key {
                log::debug!("Evicting '{}' from memory tier", old_key);
                evicted += 1;
            }
        }
        evicted
    }

    /// Insert an entry read back from disk unless memory already holds one
    /// stored at the same time or later.
    pub(crate) fn promote(&mut self, key: String, entry: CacheEntry<T>, cost: usize) -> usize {
        if let Some(existing) = self.slots.peek(&key) {
            if existing.entry.stored_at >= entry.stored_at {
                return 0;
            }
        }
        self.insert(key, entry, cost)
    }

    pub(crate) fn remove(&mut self, key: &str) -> bool {
        match self.slots.pop(key) {
            Some(old) => {
                self.total_cost -= old.cost;
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.total_cost = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[cfg(test)]
    pub(crate) fn total_cost(&self) -> usize {
        self.total_cost
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.slots.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::time::Duration;

    fn entry(value: u32) -> CacheEntry<u32> {
        CacheEntry {
            value,
            stored_at: Utc::now(),
            ttl: Duration::from_secs(60),
        }
    }

    #[test]
    fn evicts_least_recently_used_over_count_limit() {
        let mut tier = MemoryTier::new(2, 0);
        tier.insert("a".to_string(), entry(1), 1);
        tier.insert("b".to_string(), entry(2), 1);

        // Touch "a" so "b" becomes the eviction candidate
        assert!(tier.get("a").is_some());
        let evicted = tier.insert("c".to_string(), entry(3), 1);

        assert_eq!(evicted, 1);
        assert!(tier.contains("a"));
        assert!(!tier.contains("b"));
        assert!(tier.contains("c"));
        assert_eq!(tier.total_cost(), 2);
    }

    #[test]
    fn evicts_by_cost_limit() {
        let mut tier = MemoryTier::new(0, 10);
        tier.insert("a".to_string(), entry(1), 4);
        tier.insert("b".to_string(), entry(2), 4);
        let evicted = tier.insert("c".to_string(), entry(3), 4);

        assert_eq!(evicted, 1);
        assert_eq!(tier.len(), 2);
        assert!(!tier.contains("a"));
        assert_eq!(tier.total_cost(), 8);
    }

    #[test]
    fn cost_eviction_follows_recency() {
        let mut tier = MemoryTier::new(0, 10);
        tier.insert("a".to_string(), entry(1), 4);
        tier.insert("b".to_string(), entry(2), 4);
        assert!(tier.get("a").is_some());
        tier.insert("c".to_string(), entry(3), 4);

        assert!(tier.contains("a"));
        assert!(!tier.contains("b"));
    }

    #[test]
    fn oversized_entry_is_not_kept() {
        let mut tier = MemoryTier::new(0, 10);
        tier.insert("small".to_string(), entry(1), 2);
        tier.insert("huge".to_string(), entry(2), 50);

        assert_eq!(tier.len(), 0);
        assert_eq!(tier.total_cost(), 0);
    }

    #[test]
    fn replacing_entry_updates_cost() {
        let mut tier = MemoryTier::new(0, 0);
        tier.insert("a".to_string(), entry(1), 5);
        let evicted = tier.insert("a".to_string(), entry(2), 3);

        assert_eq!(evicted, 0);
        assert_eq!(tier.len(), 1);
        assert_eq!(tier.total_cost(), 3);
        assert_eq!(tier.get("a").unwrap().value, 2);
    }

    #[test]
    fn replacing_at_count_limit_evicts_nothing() {
        let mut tier = MemoryTier::new(2, 0);
        tier.insert("a".to_string(), entry(1), 1);
        tier.insert("b".to_string(), entry(2), 1);
        let evicted = tier.insert("a".to_string(), entry(3), 1);

        assert_eq!(evicted, 0);
        assert!(tier.contains("a"));
        assert!(tier.contains("b"));
    }

    #[test]
    fn zero_limits_mean_unbounded() {
        let mut tier = MemoryTier::new(0, 0);
        for i in 0..500 {
            tier.insert(format!("k{i}"), entry(i), 100);
        }
        assert_eq!(tier.len(), 500);
    }

    #[test]
    fn promote_keeps_newer_entry() {
        let mut tier = MemoryTier::new(0, 0);
        let newer = entry(2);
        let mut older = entry(1);
        older.stored_at = newer.stored_at - chrono::Duration::seconds(10);

        tier.insert("a".to_string(), newer, 1);
        tier.promote("a".to_string(), older, 1);

        assert_eq!(tier.get("a").unwrap().value, 2);
    }
}
