//! Cache statistics tracking
//!
//! Only the primary keyed read (`LfuCache::get`) feeds the hit and miss
//! counters. Bulk peeks, `pop` and the insert-if-absent helpers leave them
//! untouched.

/// Running counters owned by a cache
#[derive(Debug, Default, Clone)]
pub(crate) struct Counters {
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl Counters {
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn snapshot(&self, capacity: usize) -> CacheStats {
        CacheStats {
            capacity,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }
}

/// Point-in-time statistics for a cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    capacity: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl CacheStats {
    /// Capacity at the time of the snapshot
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get total hits
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Get total misses
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Get total evictions
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// `(capacity, hits, misses)`
impl From<CacheStats> for (usize, u64, u64) {
    fn from(stats: CacheStats) -> Self {
        (stats.capacity, stats.hits, stats.misses)
    }
}
