//! Victim selection
//!
//! Entries live in an `IndexMap`, so every entry has a position in
//! `0..len`. Small caches are scanned exactly. Once the cache holds
//! [`SAMPLE_THRESHOLD`] entries or more, the position range is split into
//! [`BUCKET_COUNT`] contiguous buckets and one random position per bucket is
//! looked up by index and weighed instead. That is a fixed number of lookups
//! whatever the cache size.

use std::hash::BuildHasher;

use indexmap::IndexMap;
use rand::Rng;

use crate::entry::Entry;

/// Entry count at which selection switches from exact scan to sampling
pub const SAMPLE_THRESHOLD: usize = 256;

/// Number of buckets the key set is split into when sampling
pub const BUCKET_COUNT: usize = 8;

/// How a victim was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Every entry was weighed
    Exact,
    /// Only bucket samples were weighed
    Sampled,
}

/// Entry chosen for eviction
#[derive(Debug, Clone, Copy)]
pub struct Victim<'a, K> {
    /// Key of the chosen entry
    pub key: &'a K,
    /// Position of the entry in the map
    pub index: usize,
    /// Weight at the time of selection
    pub weight: u32,
    /// Selection strategy that produced it
    pub strategy: Strategy,
}

/// Pick the entry to evict at minute `now`
///
/// Returns `None` only when `entries` is empty.
pub fn select<'a, K, V, S, R>(
    entries: &'a IndexMap<K, Entry<V>, S>,
    now: u32,
    rng: &mut R,
) -> Option<Victim<'a, K>>
where
    S: BuildHasher,
    R: Rng + ?Sized,
{
    if entries.len() < SAMPLE_THRESHOLD {
        lightest(entries.iter().enumerate(), now, Strategy::Exact)
    } else {
        let samples = sample_positions(entries.len(), rng)
            .into_iter()
            .filter_map(|index| entries.get_index(index).map(|pair| (index, pair)));
        lightest(samples, now, Strategy::Sampled)
    }
}

/// First candidate with the strictly smallest weight
fn lightest<'a, K: 'a, V: 'a>(
    candidates: impl Iterator<Item = (usize, (&'a K, &'a Entry<V>))>,
    now: u32,
    strategy: Strategy,
) -> Option<Victim<'a, K>> {
    let mut best: Option<Victim<'a, K>> = None;
    for (index, (key, entry)) in candidates {
        let weight = entry.weight(now);
        if best.as_ref().map_or(true, |victim| weight < victim.weight) {
            best = Some(Victim {
                key,
                index,
                weight,
                strategy,
            });
        }
    }
    best
}

/// Positions to weigh in a map of `len >= SAMPLE_THRESHOLD` entries
///
/// One uniform pick inside each of the first `BUCKET_COUNT - 1` buckets, plus
/// the midpoint of the leftover tail when `len` is not a multiple of
/// `BUCKET_COUNT`.
fn sample_positions<R>(len: usize, rng: &mut R) -> Vec<usize>
where
    R: Rng + ?Sized,
{
    debug_assert!(len >= SAMPLE_THRESHOLD);
    let bucket_size = len / BUCKET_COUNT;

    let mut picks = Vec::with_capacity(BUCKET_COUNT);
    picks.extend((0..BUCKET_COUNT - 1).map(|bucket| bucket * bucket_size + rng.gen_range(0..bucket_size)));

    let covered = BUCKET_COUNT * bucket_size;
    if len > covered {
        picks.push(covered + (len - covered) / 2);
    }
    picks
}
