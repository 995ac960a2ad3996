use std::collections::{HashMap, VecDeque};

/// Counters for one [`FifoCache`] since its last reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to build a new value.
    pub misses: u64,
    /// Entries dropped to stay within capacity.
    pub evictions: u64,
    /// Entries currently retained.
    pub retained: usize,
}

/// Bounded cache keyed by a precomputed 64-bit key, evicting oldest-inserted first.
///
/// Lookups do not refresh an entry's position. A capacity of `0` disables retention.
#[derive(Debug)]
pub(crate) struct FifoCache<V> {
    capacity: usize,
    order: VecDeque<u64>,
    entries: HashMap<u64, V>,
    stats: CacheStats,
}

impl<V: Clone> FifoCache<V> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            entries: HashMap::with_capacity(capacity),
            stats: CacheStats::default(),
        }
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            retained: self.entries.len(),
            ..self.stats
        }
    }

    /// Drop every entry and zero the counters.
    pub(crate) fn reset(&mut self) {
        self.order.clear();
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    /// Return the cached value for `key`, building and inserting it on a miss.
    pub(crate) fn get_or_try_insert_with<E>(
        &mut self,
        key: u64,
        build: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(v) = self.entries.get(&key) {
            self.stats.hits = self.stats.hits.saturating_add(1);
            return Ok(v.clone());
        }

        self.stats.misses = self.stats.misses.saturating_add(1);
        let v = build()?;
        if self.capacity == 0 {
            return Ok(v);
        }

        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.evictions = self.stats.evictions.saturating_add(1);
        }

        self.order.push_back(key);
        self.entries.insert(key, v.clone());
        Ok(v)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/cache.rs"]
mod tests;
