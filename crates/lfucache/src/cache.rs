//! Approximate LFU cache
//!
//! Entries carry a visit count that decays by one per idle minute. When the
//! cache is full the entry with the lowest decayed count is evicted, found
//! either by an exact scan or by bucket sampling (see [`crate::eviction`]).

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use ahash::RandomState;
use indexmap::map::{self, IndexMap};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::entry::Entry;
use crate::error::{BoxError, Error, Result};
use crate::eviction;
use crate::stats::{CacheStats, Counters};

/// Fixed-capacity cache evicting the least frequently used entry
///
/// Not internally synchronized; wrap it in [`crate::SyncLfuCache`] (or your
/// own lock) to share it between threads.
pub struct LfuCache<K, V, C = SystemClock> {
    entries: IndexMap<K, Entry<V>, RandomState>,
    capacity: usize,
    counters: Counters,
    clock: C,
    rng: SmallRng,
}

impl<K, V> LfuCache<K, V, SystemClock>
where
    K: Hash + Eq + Clone,
{
    /// Create a new cache holding at most `capacity` entries
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_clock(capacity, SystemClock)
    }
}

impl<K, V, C> LfuCache<K, V, C>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    /// Create a cache that reads time from `clock`
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - `capacity` is zero
    pub fn with_clock(capacity: usize, clock: C) -> Result<Self> {
        Self::build(capacity, clock, SmallRng::from_entropy())
    }

    /// Create a cache with a seeded sampling generator, for reproducible eviction
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - `capacity` is zero
    pub fn with_seed(capacity: usize, clock: C, seed: u64) -> Result<Self> {
        Self::build(capacity, clock, SmallRng::seed_from_u64(seed))
    }

    fn build(capacity: usize, clock: C, rng: SmallRng) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::zero_capacity());
        }

        Ok(Self {
            entries: IndexMap::with_hasher(RandomState::new()),
            capacity,
            counters: Counters::default(),
            clock,
            rng,
        })
    }

    /// Get a value, counting a visit and a hit
    ///
    /// # Errors
    /// * `Error::NotFound` - key is absent (counted as a miss)
    pub fn get<Q>(&mut self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now_minutes();
        match self.entries.get_mut(key) {
            Some(entry) => {
                self.counters.record_hit();
                Ok(entry.record_visit(now))
            }
            None => {
                self.counters.record_miss();
                Err(Error::NotFound)
            }
        }
    }

    /// Borrow a value without counting a visit, hit or miss
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(Entry::value)
    }

    /// Borrow a value or fall back to `default`, without counting anything
    pub fn get_or<'a, Q>(&'a self, key: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.peek(key).unwrap_or(default)
    }

    /// Check whether a key is present; no visit is recorded
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Current decayed weight of a key
    pub fn weight_of<Q>(&self, key: &Q) -> Option<u32>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now_minutes();
        self.entries.get(key).map(|entry| entry.weight(now))
    }

    /// Snapshot of all keys
    pub fn peek_keys(&self) -> Vec<K> {
        self.entries.keys().cloned().collect()
    }

    /// Snapshot of all values
    ///
    /// Every listed entry has a visit recorded, exactly as `get` would, so
    /// listing values raises their eviction priority. Hits and misses are
    /// not counted.
    pub fn peek_values(&mut self) -> Vec<&V> {
        let now = self.clock.now_minutes();
        self.entries
            .values_mut()
            .map(|entry| entry.record_visit(now))
            .collect()
    }

    /// Snapshot of all key/value pairs
    ///
    /// Records a visit on every entry, like [`LfuCache::peek_values`].
    pub fn peek_items(&mut self) -> Vec<(&K, &V)> {
        let now = self.clock.now_minutes();
        self.entries
            .iter_mut()
            .map(|(key, entry)| (key, entry.record_visit(now)))
            .collect()
    }

    /// Iterate over a snapshot of the keys
    ///
    /// The snapshot is owned, so the cache may be modified while iterating.
    pub fn keys(&self) -> std::vec::IntoIter<K> {
        self.peek_keys().into_iter()
    }

    /// Insert or replace a value
    ///
    /// Replacing keeps the entry's visit history; a write is not a read.
    /// Inserting a new key into a full cache evicts one entry first.
    /// Returns the replaced value, if any.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        if let Some(entry) = self.entries.get_mut(&key) {
            return Some(entry.replace(value));
        }

        let now = self.clock.now_minutes();
        self.insert_new(key, value, now);
        None
    }

    /// Apply `set` to each pair in order
    pub fn update<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.set(key, value);
        }
    }

    /// Remove a key, dropping its value
    ///
    /// # Errors
    /// * `Error::NotFound` - key is absent
    pub fn delete<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(key).map(drop)
    }

    /// Remove a key and return its value
    ///
    /// # Errors
    /// * `Error::NotFound` - key is absent
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .swap_remove(key)
            .map(Entry::into_value)
            .ok_or(Error::NotFound)
    }

    /// Remove a key and return its value, or `default` when absent
    pub fn pop<Q>(&mut self, key: &Q, default: Option<V>) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.swap_remove(key).map(Entry::into_value).or(default)
    }

    /// Return the value for `key`, inserting `default` if absent
    ///
    /// An existing entry gets a visit recorded. Hits and misses are not
    /// counted either way.
    pub fn get_or_insert_default(&mut self, key: K, default: V) -> &V {
        let now = self.clock.now_minutes();
        if !self.entries.contains_key(&key) {
            self.make_room(now);
        }
        match self.entries.entry(key) {
            map::Entry::Occupied(slot) => slot.into_mut().record_visit(now),
            map::Entry::Vacant(slot) => slot.insert(Entry::new(default, now)).value(),
        }
    }

    /// Return the value for `key`, computing it with `producer` if absent
    ///
    /// `producer` runs only on a miss. Its error is returned as
    /// `Error::CallbackFailed` and nothing is inserted.
    pub fn get_or_insert_with<F, E>(&mut self, key: K, producer: F) -> Result<&V>
    where
        F: FnOnce() -> std::result::Result<V, E>,
        E: Into<BoxError>,
    {
        let now = self.clock.now_minutes();
        match self.entries.get_index_of(&key) {
            Some(index) => Ok(self.entries[index].record_visit(now)),
            None => {
                let value = producer().map_err(|err| Error::CallbackFailed(err.into()))?;
                Ok(self.insert_new(key, value, now))
            }
        }
    }

    /// Change the capacity, evicting entries if the cache is now too large
    ///
    /// # Errors
    /// * `Error::InvalidArgument` - `capacity` is zero
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(Error::zero_capacity());
        }

        let len = self.entries.len();
        if capacity < len {
            let now = self.clock.now_minutes();
            for evicted in 0..len - capacity {
                if self.evict_at(now).is_none() {
                    warn!(evicted, wanted = len - capacity, "cache emptied before shrink target");
                    break;
                }
            }
        }

        debug!(old = self.capacity, new = capacity, len = self.entries.len(), "capacity changed");
        self.capacity = capacity;
        Ok(())
    }

    /// Evict one entry now, returning it; `None` when the cache is empty
    pub fn evict(&mut self) -> Option<(K, V)> {
        let now = self.clock.now_minutes();
        self.evict_at(now)
    }

    /// Key that eviction would pick right now
    ///
    /// Above the sampling threshold each call draws fresh samples, so
    /// repeated calls may disagree.
    pub fn victim(&mut self) -> Option<&K> {
        let now = self.clock.now_minutes();
        eviction::select(&self.entries, now, &mut self.rng).map(|victim| victim.key)
    }

    /// Remove all entries and reset the statistics
    pub fn clear(&mut self) {
        self.entries.clear();
        self.counters.reset();
    }

    /// Get `(capacity, hits, misses)` plus eviction count
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.capacity)
    }

    /// Get the maximum number of entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a visit without counting a hit; used by the insert-if-absent paths
    pub(crate) fn visit<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now_minutes();
        self.visit_at(key, now)
    }

    fn visit_at<Q>(&mut self, key: &Q, now: u32) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries
            .get_mut(key)
            .map(|entry| &*entry.record_visit(now))
    }

    fn make_room(&mut self, now: u32) {
        if self.entries.len() >= self.capacity {
            self.evict_at(now);
        }
    }

    fn insert_new(&mut self, key: K, value: V, now: u32) -> &V {
        self.make_room(now);
        self.entries
            .entry(key)
            .or_insert_with(|| Entry::new(value, now))
            .value()
    }

    fn evict_at(&mut self, now: u32) -> Option<(K, V)> {
        let victim = eviction::select(&self.entries, now, &mut self.rng)?;
        let (index, weight, strategy) = (victim.index, victim.weight, victim.strategy);

        let (key, entry) = self.entries.swap_remove_index(index)?;
        self.counters.record_eviction();
        debug!(weight, ?strategy, len = self.entries.len(), "evicted entry");
        Some((key, entry.into_value()))
    }
}

impl<'a, K, V, C> IntoIterator for &'a LfuCache<K, V, C> {
    type Item = &'a K;
    type IntoIter = map::Keys<'a, K, Entry<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.keys()
    }
}

impl<K, V, C> fmt::Debug for LfuCache<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, entry)| (key, entry.value())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::entry::INITIAL_WEIGHT;
    use crate::eviction::SAMPLE_THRESHOLD;
    use std::cell::Cell;

    fn manual(capacity: usize) -> (LfuCache<String, u32, ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_000);
        let cache = LfuCache::with_seed(capacity, clock.clone(), 42).unwrap();
        (cache, clock)
    }

    fn key(i: usize) -> String {
        format!("k{}", i)
    }

    #[test]
    fn test_cache_basic() {
        let mut cache = LfuCache::new(10).unwrap();

        cache.set("a", 1);
        cache.set("b", 2);

        assert_eq!(cache.get("a").unwrap(), &1);
        assert_eq!(cache.get("b").unwrap(), &2);
        assert_eq!(cache.len(), 2);
        assert_eq!(<(usize, u64, u64)>::from(cache.stats()), (10, 2, 0));
    }

    #[test]
    fn test_cache_zero_capacity() {
        let result: Result<LfuCache<u32, u32>> = LfuCache::new(0);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let seeded: Result<LfuCache<u32, u32, ManualClock>> = LfuCache::with_seed(0, ManualClock::new(0), 1);
        assert!(matches!(seeded, Err(Error::InvalidArgument(_))));
        let clocked: Result<LfuCache<u32, u32, ManualClock>> = LfuCache::with_clock(0, ManualClock::new(0));
        assert!(matches!(clocked, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_cache_miss() {
        let (mut cache, _) = manual(4);

        assert!(matches!(cache.get("nope"), Err(Error::NotFound)));
        assert_eq!(cache.stats().misses(), 1);
        assert_eq!(cache.stats().hits(), 0);
    }

    #[test]
    fn test_get_records_visit() {
        let (mut cache, _) = manual(4);

        cache.set("a".to_string(), 1);
        cache.get("a").unwrap();
        cache.get("a").unwrap();

        assert_eq!(cache.weight_of("a"), Some(INITIAL_WEIGHT + 2));
    }

    #[test]
    fn test_overwrite_keeps_weight() {
        let (mut cache, clock) = manual(4);

        cache.set("a".to_string(), 1);
        clock.advance(10);
        assert_eq!(cache.set("a".to_string(), 2), Some(1));

        // A write neither refreshes last_visit nor bumps the count
        assert_eq!(cache.weight_of("a"), Some(INITIAL_WEIGHT - 10));
        assert_eq!(cache.peek("a"), Some(&2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let (mut cache, clock) = manual(50);

        for i in 0..1_000 {
            cache.set(key(i), i as u32);
            assert!(cache.len() <= cache.capacity());
            if i % 7 == 0 {
                clock.advance(1);
            }
        }
        assert_eq!(cache.len(), 50);
        assert_eq!(cache.stats().evictions(), 950);
    }

    #[test]
    fn test_capacity_never_exceeded_sampled() {
        let (mut cache, clock) = manual(SAMPLE_THRESHOLD + 44);

        for i in 0..2_000 {
            cache.set(key(i), i as u32);
            assert!(cache.len() <= cache.capacity());
            if i % 3 == 0 {
                clock.advance(1);
            }
        }
        assert_eq!(cache.len(), SAMPLE_THRESHOLD + 44);
    }

    #[test]
    fn test_evicts_decayed_entry() {
        let (mut cache, clock) = manual(2);

        cache.set("a".to_string(), 1);
        clock.advance(INITIAL_WEIGHT + 45);
        cache.set("b".to_string(), 2);
        cache.set("c".to_string(), 3);

        assert!(!cache.contains("a"));
        assert!(cache.contains("b"));
        assert!(cache.contains("c"));
    }

    #[test]
    fn test_evicts_least_visited() {
        let (mut cache, _) = manual(3);

        cache.update(vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)]);
        cache.get("a").unwrap();
        cache.get("c").unwrap();
        cache.set("d".to_string(), 4);

        assert!(!cache.contains("b"));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_peek_values_leaves_stats() {
        let (mut cache, _) = manual(4);
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);
        cache.get("a").unwrap();
        let before = cache.stats();

        for _ in 0..100 {
            assert_eq!(cache.peek_values().len(), 2);
        }

        assert_eq!(cache.stats(), before);
        // Listing values still counts as a visit
        assert_eq!(cache.weight_of("b"), Some(INITIAL_WEIGHT + 100));
    }

    #[test]
    fn test_peek_items_and_keys() {
        let (mut cache, _) = manual(4);
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);

        let mut keys = cache.peek_keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(cache.weight_of("a"), Some(INITIAL_WEIGHT));

        let mut items: Vec<(String, u32)> = cache
            .peek_items()
            .into_iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        items.sort();
        assert_eq!(items, vec![("a".to_string(), 1), ("b".to_string(), 2)]);
        assert_eq!(cache.weight_of("a"), Some(INITIAL_WEIGHT + 1));
        assert_eq!(cache.stats().hits(), 0);
    }

    #[test]
    fn test_contains_records_nothing() {
        let (mut cache, _) = manual(4);
        cache.set("a".to_string(), 1);

        assert!(cache.contains("a"));
        assert!(!cache.contains("z"));
        assert_eq!(cache.weight_of("a"), Some(INITIAL_WEIGHT));
        assert_eq!(<(usize, u64, u64)>::from(cache.stats()), (4, 0, 0));
    }

    #[test]
    fn test_delete_round_trip() {
        let (mut cache, _) = manual(4);

        cache.set("a".to_string(), 1);
        cache.delete("a").unwrap();

        assert!(!cache.contains("a"));
        assert!(matches!(cache.get("a"), Err(Error::NotFound)));
        assert!(matches!(cache.delete("a"), Err(Error::NotFound)));
    }

    #[test]
    fn test_remove_returns_value() {
        let (mut cache, _) = manual(4);

        cache.set("a".to_string(), 7);
        assert_eq!(cache.remove("a").unwrap(), 7);
        assert!(matches!(cache.remove("a"), Err(Error::NotFound)));
    }

    #[test]
    fn test_pop() {
        let (mut cache, _) = manual(4);
        cache.set("a".to_string(), 1);

        assert_eq!(cache.pop("a", None), Some(1));
        assert_eq!(cache.pop("a", None), None);
        assert_eq!(cache.pop("a", Some(9)), Some(9));
        assert!(cache.is_empty());
        assert_eq!(<(usize, u64, u64)>::from(cache.stats()), (4, 0, 0));
    }

    #[test]
    fn test_get_or_does_not_visit() {
        let (mut cache, _) = manual(4);
        cache.set("a".to_string(), 1);

        assert_eq!(cache.get_or("a", &0), &1);
        assert_eq!(cache.get_or("b", &0), &0);
        assert_eq!(cache.weight_of("a"), Some(INITIAL_WEIGHT));
        assert_eq!(cache.stats().misses(), 0);
    }

    #[test]
    fn test_get_or_insert_default() {
        let (mut cache, _) = manual(2);

        assert_eq!(*cache.get_or_insert_default("a".to_string(), 1), 1);
        assert_eq!(cache.weight_of("a"), Some(INITIAL_WEIGHT));

        assert_eq!(*cache.get_or_insert_default("a".to_string(), 5), 1);
        assert_eq!(cache.weight_of("a"), Some(INITIAL_WEIGHT + 1));

        cache.set("b".to_string(), 2);
        cache.get_or_insert_default("c".to_string(), 3);
        assert_eq!(cache.len(), 2);
        assert!(cache.contains("c"));
        assert_eq!(cache.stats().hits() + cache.stats().misses(), 0);
    }

    #[test]
    fn test_get_or_insert_with() {
        let (mut cache, _) = manual(4);
        let calls = Cell::new(0);
        let produce = || {
            calls.set(calls.get() + 1);
            Ok::<_, BoxError>(10)
        };

        assert_eq!(*cache.get_or_insert_with("a".to_string(), produce).unwrap(), 10);
        assert_eq!(*cache.get_or_insert_with("a".to_string(), produce).unwrap(), 10);
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.weight_of("a"), Some(INITIAL_WEIGHT + 1));
    }

    #[test]
    fn test_get_or_insert_with_failure() {
        let (mut cache, _) = manual(1);
        cache.set("keep".to_string(), 1);

        let result = cache.get_or_insert_with("a".to_string(), || Err::<u32, _>("no value"));

        assert!(matches!(result, Err(Error::CallbackFailed(_))));
        assert!(!cache.contains("a"));
        // Failed producer must not cost an eviction
        assert!(cache.contains("keep"));
    }

    #[test]
    fn test_update_order() {
        let (mut cache, _) = manual(4);

        cache.update(vec![
            ("a".to_string(), 1),
            ("b".to_string(), 2),
            ("a".to_string(), 3),
        ]);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.peek("a"), Some(&3));
    }

    #[test]
    fn test_set_capacity_shrink() {
        let (mut cache, clock) = manual(10);
        for i in 0..10 {
            cache.set(key(i), i as u32);
            clock.advance(1);
        }

        cache.set_capacity(4).unwrap();

        assert_eq!(cache.len(), 4);
        assert_eq!(cache.capacity(), 4);
        assert_eq!(cache.stats().evictions(), 6);
        // Oldest entries have decayed the most
        for i in 6..10 {
            assert!(cache.contains(&key(i)));
        }
    }

    #[test]
    fn test_set_capacity_grow_and_invalid() {
        let (mut cache, _) = manual(2);
        cache.set("a".to_string(), 1);
        cache.set("b".to_string(), 2);

        assert!(matches!(cache.set_capacity(0), Err(Error::InvalidArgument(_))));
        assert_eq!(cache.capacity(), 2);

        cache.set_capacity(3).unwrap();
        cache.set("c".to_string(), 3);
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.stats().evictions(), 0);
    }

    #[test]
    fn test_set_capacity_shrink_sampled() {
        let (mut cache, _) = manual(1_000);
        for i in 0..1_000 {
            cache.set(key(i), i as u32);
        }

        cache.set_capacity(100).unwrap();
        assert_eq!(cache.len(), 100);
    }

    #[test]
    fn test_sampled_eviction_keeps_index() {
        let (mut cache, clock) = manual(10_000);
        for i in 0..20_000 {
            cache.set(key(i), i as u32);
            if i % 1_000 == 0 {
                clock.advance(1);
            }
        }

        assert_eq!(cache.len(), 10_000);
        assert_eq!(cache.stats().evictions(), 10_000);
        for k in cache.keys() {
            let expected: u32 = k[1..].parse().unwrap();
            assert_eq!(cache.peek(&k), Some(&expected));
        }
    }

    #[test]
    fn test_get_or_insert_with_after_removal() {
        let (mut cache, _) = manual(8);
        cache.update((0..5).map(|i| (key(i), i as u32)));

        // Removing the first entry moves the last one into its slot
        cache.delete(&key(0)).unwrap();
        let value = cache
            .get_or_insert_with(key(4), || Err::<u32, _>("present, must not run"))
            .unwrap();

        assert_eq!(*value, 4);
        assert_eq!(cache.weight_of(&key(4)), Some(INITIAL_WEIGHT + 1));
        assert_eq!(cache.weight_of(&key(1)), Some(INITIAL_WEIGHT));
    }

    #[test]
    fn test_clear() {
        let (mut cache, _) = manual(4);
        cache.set("a".to_string(), 1);
        cache.get("a").unwrap();
        let _ = cache.get("b");

        cache.clear();

        assert_eq!(cache.len(), 0);
        assert_eq!(<(usize, u64, u64)>::from(cache.stats()), (4, 0, 0));
    }

    #[test]
    fn test_evict_and_victim() {
        let (mut cache, clock) = manual(4);
        assert!(cache.evict().is_none());
        assert!(cache.victim().is_none());

        cache.set("old".to_string(), 1);
        clock.advance(30);
        cache.set("new".to_string(), 2);

        assert_eq!(cache.victim(), Some(&"old".to_string()));
        assert_eq!(cache.evict(), Some(("old".to_string(), 1)));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().evictions(), 1);
    }

    #[test]
    fn test_keys_snapshot() {
        let (mut cache, _) = manual(8);
        cache.update((0..5).map(|i| (key(i), i as u32)));

        for k in cache.keys() {
            cache.delete(&k).unwrap();
        }
        assert!(cache.is_empty());

        cache.set("x".to_string(), 1);
        assert_eq!((&cache).into_iter().count(), 1);
    }

    #[test]
    fn test_debug_format() {
        let (mut cache, _) = manual(2);
        cache.set("a".to_string(), 1);

        assert_eq!(format!("{:?}", cache), r#"{"a": 1}"#);
    }
}
