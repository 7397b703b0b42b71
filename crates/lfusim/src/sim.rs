//! Drives a shared cache with generated traffic

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::{ensure, Context, Result};
use lfucache::{CacheStats, Clock, Error, LfuCache, ManualClock, SyncLfuCache};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::workload::{Op, Workload, WorkloadConfig};

/// Parameters of one simulation run
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub capacity: usize,
    pub ops: u64,
    pub tick_every: u64,
    pub seed: u64,
    pub threads: usize,
    pub shrink_to: Option<usize>,
    pub workload: WorkloadConfig,
}

/// Outcome of a run
#[derive(Debug, Clone)]
pub struct Summary {
    pub reads: u64,
    pub writes: u64,
    pub fills: u64,
    pub len: usize,
    pub minutes: u32,
    pub stats: CacheStats,
}

#[derive(Default)]
struct Tally {
    reads: AtomicU64,
    writes: AtomicU64,
    fills: AtomicU64,
}

/// Replay the workload and collect cache statistics
///
/// Reads go through `get`; a miss is filled with a `set`, the way a
/// read-through cache in front of a slower store behaves. The simulated
/// clock advances one minute every `tick_every` operations per thread.
pub fn run(config: &SimConfig) -> Result<Summary> {
    config.workload.validate()?;
    ensure!(config.threads > 0, "need at least one thread");
    ensure!(config.tick_every > 0, "tick interval must be positive");

    let clock = ManualClock::new(0);
    let cache: SyncLfuCache<u64, u64, ManualClock> =
        LfuCache::with_seed(config.capacity, clock.clone(), config.seed)
            .map(SyncLfuCache::from)
            .context("failed to create cache")?;
    let cache = Arc::new(cache);
    let tally = Tally::default();

    let per_thread = config.ops / config.threads as u64;
    let shrink_at = per_thread / 2;
    info!(
        capacity = config.capacity,
        threads = config.threads,
        ops = per_thread * config.threads as u64,
        "starting simulation"
    );

    thread::scope(|s| -> Result<()> {
        let handles: Vec<_> = (0..config.threads)
            .map(|t| {
                let cache = Arc::clone(&cache);
                let clock = clock.clone();
                let tally = &tally;
                let rng = SmallRng::seed_from_u64(config.seed.wrapping_add(t as u64 + 1));
                s.spawn(move || -> Result<()> {
                    let workload = Workload::new(config.workload, rng);
                    for (i, op) in workload.take(per_thread as usize).enumerate() {
                        let i = i as u64;
                        if t == 0 && i == shrink_at {
                            if let Some(capacity) = config.shrink_to {
                                cache.set_capacity(capacity)?;
                                info!(capacity, len = cache.len(), "capacity shrunk mid-run");
                            }
                        }
                        apply(&cache, op, tally)?;
                        if (i + 1) % config.tick_every == 0 {
                            clock.advance(1);
                        }
                    }
                    debug!(thread = t, "worker finished");
                    Ok(())
                })
            })
            .collect();

        for handle in handles {
            handle
                .join()
                .map_err(|_| anyhow::anyhow!("worker thread panicked"))??;
        }
        Ok(())
    })?;

    Ok(Summary {
        reads: tally.reads.load(Ordering::Relaxed),
        writes: tally.writes.load(Ordering::Relaxed),
        fills: tally.fills.load(Ordering::Relaxed),
        len: cache.len(),
        minutes: clock.now_minutes(),
        stats: cache.stats(),
    })
}

fn apply(cache: &SyncLfuCache<u64, u64, ManualClock>, op: Op, tally: &Tally) -> Result<()> {
    match op {
        Op::Read(key) => {
            tally.reads.fetch_add(1, Ordering::Relaxed);
            match cache.get(&key) {
                Ok(_) => {}
                Err(Error::NotFound) => {
                    cache.set(key, key);
                    tally.fills.fetch_add(1, Ordering::Relaxed);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Op::Write(key) => {
            tally.writes.fetch_add(1, Ordering::Relaxed);
            cache.set(key, key);
        }
    }
    Ok(())
}
