//! Cached value plus its decayed-frequency metadata

/// Visit count given to a freshly inserted entry
///
/// New entries start hot so that a burst of inserts does not immediately
/// evict the keys it just added.
pub const INITIAL_WEIGHT: u32 = 255;

/// A value stored in the cache
#[derive(Debug, Clone)]
pub struct Entry<V> {
    value: V,
    visit_count: u32,
    last_visit: u32,
}

impl<V> Entry<V> {
    /// Create an entry first visited at `now`
    pub fn new(value: V, now: u32) -> Self {
        Self {
            value,
            visit_count: INITIAL_WEIGHT,
            last_visit: now,
        }
    }

    /// Count a read at minute `now` and hand back the value
    pub fn record_visit(&mut self, now: u32) -> &V {
        self.visit_count = self.visit_count.saturating_add(1);
        self.last_visit = now;
        &self.value
    }

    /// Visit count minus the minutes elapsed since the last visit, floored at 0
    pub fn weight(&self, now: u32) -> u32 {
        let decay = now.wrapping_sub(self.last_visit);
        self.visit_count.saturating_sub(decay)
    }

    /// Borrow the value without counting a visit
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Swap in a new value, leaving the visit metadata alone
    pub fn replace(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    /// Take ownership of the value
    pub fn into_value(self) -> V {
        self.value
    }

    /// Number of recorded visits (including the initial weight)
    pub fn visit_count(&self) -> u32 {
        self.visit_count
    }

    /// Minute of the most recent visit
    pub fn last_visit(&self) -> u32 {
        self.last_visit
    }
}
