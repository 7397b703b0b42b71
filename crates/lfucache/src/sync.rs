//! SyncLfuCache: a single lock around an LfuCache for shared use

use std::borrow::Borrow;
use std::hash::Hash;

use parking_lot::Mutex;

use crate::cache::LfuCache;
use crate::clock::{Clock, SystemClock};
use crate::error::{BoxError, Error, Result};
use crate::stats::CacheStats;

/// Thread-safe handle over an [`LfuCache`]
///
/// Every operation takes one exclusive lock, reads included, because reads
/// record visits. Values are cloned out since borrows cannot outlive the
/// lock. Share it with `Arc<SyncLfuCache<..>>`.
pub struct SyncLfuCache<K, V, C = SystemClock> {
    inner: Mutex<LfuCache<K, V, C>>,
}

impl<K, V> SyncLfuCache<K, V, SystemClock>
where
    K: Hash + Eq + Clone,
{
    /// Create a new shared cache with the given capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of items in cache
    ///
    /// # Returns
    /// * `Result<SyncLfuCache>` - `Error::InvalidArgument` if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        LfuCache::new(capacity).map(Self::from)
    }
}

impl<K, V, C> SyncLfuCache<K, V, C>
where
    K: Hash + Eq + Clone,
    V: Clone,
    C: Clock,
{
    /// Get a value, counting a visit and a hit
    pub fn get<Q>(&self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().get(key).cloned()
    }

    /// Insert or replace a value, returning the replaced one
    pub fn set(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().set(key, value)
    }

    /// Remove a key, dropping its value
    pub fn delete<Q>(&self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().delete(key)
    }

    /// Remove a key and return its value, or `default` when absent
    pub fn pop<Q>(&self, key: &Q, default: Option<V>) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().pop(key, default)
    }

    /// Check whether a key is present
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    /// Return the value for `key`, inserting `default` if absent
    pub fn get_or_insert_default(&self, key: K, default: V) -> V {
        self.inner.lock().get_or_insert_default(key, default).clone()
    }

    /// Return the value for `key`, computing it with `producer` if absent
    ///
    /// The lock is NOT held while `producer` runs, so the producer may use
    /// this cache without deadlocking. Two callers missing on the same key
    /// may therefore both run their producer; whichever inserts first wins
    /// and the other's value is dropped in favour of the stored one.
    pub fn get_or_insert_with<F, E>(&self, key: K, producer: F) -> Result<V>
    where
        F: FnOnce() -> std::result::Result<V, E>,
        E: Into<BoxError>,
    {
        let cached = self.inner.lock().visit(&key).cloned();
        if let Some(value) = cached {
            return Ok(value);
        }

        let value = producer().map_err(|err| Error::CallbackFailed(err.into()))?;
        Ok(self.inner.lock().get_or_insert_default(key, value).clone())
    }

    /// Apply `set` to each pair in order, under a single lock hold
    pub fn update<I>(&self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.inner.lock().update(pairs)
    }

    /// Change the capacity, evicting entries if needed
    pub fn set_capacity(&self, capacity: usize) -> Result<()> {
        self.inner.lock().set_capacity(capacity)
    }

    /// Snapshot of all keys
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().peek_keys()
    }

    /// Remove all entries and reset the statistics
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` with the cache locked, for compound operations
    ///
    /// `f` must not call back into this handle; the lock is not reentrant.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut LfuCache<K, V, C>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Unwrap the underlying cache
    pub fn into_inner(self) -> LfuCache<K, V, C> {
        self.inner.into_inner()
    }
}

impl<K, V, C> From<LfuCache<K, V, C>> for SyncLfuCache<K, V, C> {
    fn from(cache: LfuCache<K, V, C>) -> Self {
        Self {
            inner: Mutex::new(cache),
        }
    }
}
