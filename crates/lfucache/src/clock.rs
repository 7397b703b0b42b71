//! Minute-granularity clocks used for weight decay

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in whole minutes
pub trait Clock {
    /// Minutes since the Unix epoch, truncated to 32 bits
    fn now_minutes(&self) -> u32;
}

/// Wall clock backed by `SystemTime`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_minutes(&self) -> u32 {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        (secs / 60) as u32
    }
}

/// Manually advanced clock
///
/// Clones share the same underlying time, so a test can keep one handle
/// while the cache owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    minutes: Arc<AtomicU32>,
}

impl ManualClock {
    /// Create a clock starting at the given minute
    pub fn new(start: u32) -> Self {
        Self {
            minutes: Arc::new(AtomicU32::new(start)),
        }
    }

    /// Move the clock forward by `minutes`
    pub fn advance(&self, minutes: u32) {
        self.minutes.fetch_add(minutes, Ordering::Relaxed);
    }

    /// Jump to an absolute minute
    pub fn set(&self, minute: u32) {
        self.minutes.store(minute, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now_minutes(&self) -> u32 {
        self.minutes.load(Ordering::Relaxed)
    }
}
