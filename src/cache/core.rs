//! Bounded access cache with frequency-based eviction
//!
//! Keys map to entries carrying an access count and a last-access time. When
//! the cache is full, the entry with the lowest access count is evicted,
//! oldest access first on ties. A staleness sweep removes entries that have
//! not been touched within the configured window.

use anyhow::Result;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Default maximum number of entries
pub const DEFAULT_MAX_CAPACITY: usize = 150;

/// Default window after which an untouched entry is considered stale
pub const DEFAULT_STALENESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Snapshot of cache counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
}

struct CacheEntry<V> {
    payload: V,
    access_count: u64,
    last_access: Instant,
    // seq orders same-count entries; Instant alone can collide on coarse clocks
    last_access_seq: u64,
}

/// Bounded key/value cache, safe for concurrent use from parallel workers
pub struct AccessCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    max_capacity: usize,
    staleness_window: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
    access_seq: AtomicU64,
}

impl<V: Clone> AccessCache<V> {
    pub fn new(max_capacity: usize, staleness_window: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_capacity: max_capacity.max(1),
            staleness_window,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            access_seq: AtomicU64::new(0),
        }
    }

    /// Look up `key`, falling back to `loader` on a miss.
    ///
    /// A hit bumps the entry's access count and timestamp. On a miss the
    /// loaded value is stored only when the loader reports one; loader errors
    /// propagate and nothing is cached for them.
    pub fn get_with<F>(&self, key: &str, loader: F) -> Result<Option<V>>
    where
        F: FnOnce() -> Result<Option<V>>,
    {
        {
            let mut entries = self.entries.lock().expect("cache lock poisoned");
            if let Some(entry) = entries.get_mut(key) {
                entry.access_count += 1;
                entry.last_access = Instant::now();
                entry.last_access_seq = self.next_seq();
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(Some(entry.payload.clone()));
            }
        }

        // Loader runs outside the lock, other workers keep hitting the cache
        self.misses.fetch_add(1, Ordering::Relaxed);
        match loader()? {
            Some(value) => {
                self.put(key, value.clone());
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Insert or overwrite `key`, evicting exactly one entry first when full
    pub fn put(&self, key: &str, value: V) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        if entries.len() >= self.max_capacity {
            Self::evict_one(&mut entries);
        }
        entries.insert(key.to_string(), self.fresh_entry(value));
    }

    /// Insert `key` only if absent, without touching the hit/miss counters.
    /// Used by the warm path, which loads directly from the backing store.
    pub fn prime(&self, key: &str, value: V) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        if entries.contains_key(key) {
            return;
        }
        if entries.len() >= self.max_capacity {
            Self::evict_one(&mut entries);
        }
        entries.insert(key.to_string(), self.fresh_entry(value));
    }

    /// Remove every entry unaccessed for longer than the staleness window.
    /// Returns the number of entries removed.
    pub fn purge_stale(&self) -> usize {
        let now = Instant::now();
        let window = self.staleness_window;
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.last_access) <= window);
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, "staleness sweep evicted entries");
        }
        removed
    }

    /// Hit rate over all accesses so far, 0.0 before the first access
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Drop all entries and reset the counters
    pub fn clear(&self) {
        self.entries.lock().expect("cache lock poisoned").clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Average access count per resident entry, for the stats display
    pub fn mean_access_count(&self) -> f64 {
        let entries = self.entries.lock().expect("cache lock poisoned");
        if entries.is_empty() {
            return 0.0;
        }
        let total: u64 = entries.values().map(|e| e.access_count).sum();
        total as f64 / entries.len() as f64
    }

    fn fresh_entry(&self, value: V) -> CacheEntry<V> {
        CacheEntry {
            payload: value,
            access_count: 1,
            last_access: Instant::now(),
            last_access_seq: self.next_seq(),
        }
    }

    fn next_seq(&self) -> u64 {
        self.access_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Scan for the lowest access count, earliest access on ties, and remove it
    fn evict_one(entries: &mut HashMap<String, CacheEntry<V>>) {
        let victim = entries
            .iter()
            .min_by_key(|(_, e)| (e.access_count, e.last_access_seq))
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            tracing::debug!(key = %key, "evicting least-frequently-used entry");
            entries.remove(&key);
        }
    }

}
