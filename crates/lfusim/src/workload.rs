//! Synthetic access pattern with a hot set

use anyhow::{ensure, Result};
use rand::Rng;

/// Shape of the generated traffic
#[derive(Debug, Clone, Copy)]
pub struct WorkloadConfig {
    /// Size of the key space
    pub keys: u64,
    /// Fraction of the key space that is hot
    pub skew: f64,
    /// Probability that an operation targets the hot set
    pub hot_ratio: f64,
    /// Probability that an operation is a write
    pub write_ratio: f64,
}

impl WorkloadConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(self.keys > 0, "key space must not be empty");
        ensure!(
            self.skew > 0.0 && self.skew <= 1.0,
            "skew must be in (0, 1], got {}",
            self.skew
        );
        ensure!(
            (0.0..=1.0).contains(&self.hot_ratio),
            "hot ratio must be in [0, 1], got {}",
            self.hot_ratio
        );
        ensure!(
            (0.0..=1.0).contains(&self.write_ratio),
            "write ratio must be in [0, 1], got {}",
            self.write_ratio
        );
        Ok(())
    }

    /// Number of keys in the hot set, at least one
    pub fn hot_keys(&self) -> u64 {
        ((self.keys as f64 * self.skew) as u64).clamp(1, self.keys)
    }
}

/// One cache operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Read(u64),
    Write(u64),
}

/// Endless stream of operations
pub struct Workload<R> {
    config: WorkloadConfig,
    hot_keys: u64,
    rng: R,
}

impl<R: Rng> Workload<R> {
    pub fn new(config: WorkloadConfig, rng: R) -> Self {
        Self {
            hot_keys: config.hot_keys(),
            config,
            rng,
        }
    }

    fn next_key(&mut self) -> u64 {
        let cold = self.config.keys - self.hot_keys;
        if cold == 0 || self.rng.gen_bool(self.config.hot_ratio) {
            self.rng.gen_range(0..self.hot_keys)
        } else {
            self.hot_keys + self.rng.gen_range(0..cold)
        }
    }
}

impl<R: Rng> Iterator for Workload<R> {
    type Item = Op;

    fn next(&mut self) -> Option<Op> {
        let key = self.next_key();
        if self.rng.gen_bool(self.config.write_ratio) {
            Some(Op::Write(key))
        } else {
            Some(Op::Read(key))
        }
    }
}
