//! # lfucache
//!
//! Approximate LFU (Least Frequently Used) cache.
//!
//! ## Architecture
//! - **IndexMap**: AHash lookups by key, O(1) access by position for sampling
//! - **Weight**: visit count minus idle minutes, floored at zero
//! - **Eviction**: exact scan below 256 entries, bucket sampling above
//! - **Sharing**: `SyncLfuCache` puts one lock around the whole cache
//!
//! There is no background sweeper and no global ordering structure;
//! every decision is made lazily when an insert needs room.
//!
//! ```
//! use lfucache::LfuCache;
//!
//! let mut cache = LfuCache::new(2).unwrap();
//! cache.set("a", 1);
//! cache.set("b", 2);
//! assert_eq!(cache.get("a").unwrap(), &1);
//!
//! cache.set("c", 3); // evicts "b": same age, fewer visits
//! assert!(!cache.contains("b"));
//! assert_eq!(cache.stats().hits(), 1);
//! ```

#![warn(missing_docs)]

mod cache;
mod clock;
mod entry;
mod error;
pub mod eviction;
mod stats;
mod sync;

pub use cache::LfuCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{Entry, INITIAL_WEIGHT};
pub use error::{BoxError, Error, Result};
pub use stats::CacheStats;
pub use sync::SyncLfuCache;
