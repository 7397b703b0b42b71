//! lfusim - replay a synthetic workload against the approximate LFU cache

mod sim;
mod workload;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::sim::SimConfig;
use crate::workload::WorkloadConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of items)
    #[arg(short, long, default_value_t = 10000)]
    capacity: usize,

    /// Size of the key space
    #[arg(short, long, default_value_t = 100_000)]
    keys: u64,

    /// Total number of operations
    #[arg(short, long, default_value_t = 1_000_000)]
    ops: u64,

    /// Fraction of the key space that is hot
    #[arg(long, default_value_t = 0.05)]
    skew: f64,

    /// Probability that an operation targets the hot set
    #[arg(long, default_value_t = 0.8)]
    hot_ratio: f64,

    /// Probability that an operation is a write
    #[arg(long, default_value_t = 0.1)]
    write_ratio: f64,

    /// Operations per simulated minute (per thread)
    #[arg(long, default_value_t = 10_000)]
    tick_every: u64,

    /// Seed for the workload and the eviction sampler
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Shrink the cache to this capacity halfway through the run
    #[arg(long)]
    shrink_to: Option<usize>,

    /// Number of worker threads sharing the cache
    #[arg(short, long, default_value_t = 1)]
    threads: usize,
}

impl From<Args> for SimConfig {
    fn from(args: Args) -> Self {
        SimConfig {
            capacity: args.capacity,
            ops: args.ops,
            tick_every: args.tick_every,
            seed: args.seed,
            threads: args.threads,
            shrink_to: args.shrink_to,
            workload: WorkloadConfig {
                keys: args.keys,
                skew: args.skew,
                hot_ratio: args.hot_ratio,
                write_ratio: args.write_ratio,
            },
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("Starting lfusim v{}", env!("CARGO_PKG_VERSION"));

    let config = SimConfig::from(args);
    let summary = sim::run(&config)?;

    println!("reads         {}", summary.reads);
    println!("writes        {}", summary.writes);
    println!("fills         {}", summary.fills);
    println!("hits          {}", summary.stats.hits());
    println!("misses        {}", summary.stats.misses());
    println!("evictions     {}", summary.stats.evictions());
    println!("hit ratio     {:.4}", summary.stats.hit_ratio());
    println!("entries       {}/{}", summary.len, summary.stats.capacity());
    println!("sim minutes   {}", summary.minutes);

    Ok(())
}
