//! Fill command implementation
//!
//! Fills a buffer of `f64` values, sequentially on the calling thread or in
//! parallel across the rayon pool.

use std::io::Write;

use clap::Args;
use rand::rngs::{SmallRng, StdRng};
use sampler_core::{bounds_valid, Engine, EngineKind, Sampler, SamplingError};
use tracing::{info, warn};

use super::{check_count, seed_engine};
use crate::config::SamplerConfig;
use crate::output::{render_values, SampleReport};
use crate::Result;

/// Arguments for `sampler fill`
#[derive(Debug, Clone, Args)]
pub struct FillArgs {
    /// Number of elements to fill
    #[arg(short, long)]
    pub len: usize,

    /// Inclusive lower bound
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub low: f64,

    /// Inclusive upper bound
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub high: f64,

    /// Fill in parallel; each rayon worker draws from its own engine
    #[arg(short, long)]
    pub parallel: bool,
}

/// Run the fill command
pub fn run<W: Write>(config: &SamplerConfig, args: &FillArgs, out: &mut W) -> Result<()> {
    match config.engine {
        EngineKind::Std => run_with::<StdRng, W>(config, args, out),
        EngineKind::Small => run_with::<SmallRng, W>(config, args, out),
    }
}

fn run_with<E: Engine, W: Write>(config: &SamplerConfig, args: &FillArgs, out: &mut W) -> Result<()> {
    check_count("len", args.len)?;
    if !bounds_valid(args.low, args.high) {
        return Err(SamplingError::InvalidBounds {
            low: args.low.to_string(),
            high: args.high.to_string(),
        }
        .into());
    }

    seed_engine::<E>(config.seed);

    info!(
        engine = %config.engine,
        len = args.len,
        parallel = args.parallel,
        "filling buffer"
    );

    let mut values = vec![0.0_f64; args.len];
    if args.parallel {
        if config.seed.is_some() {
            warn!("worker engines are not seeded; parallel output is not reproducible");
        }
        Sampler::<E>::par_fill_in(&mut values, args.low, args.high);
    } else {
        Sampler::<E>::fill_in(&mut values, args.low, args.high);
    }

    let mode = if args.parallel { "parallel" } else { "sequential" };
    let report = SampleReport {
        command: "fill",
        engine: config.engine,
        seed: config.seed,
        source: format!("{} fill f64 [{}, {}]", mode, args.low, args.high),
        values,
    };
    render_values(&report, config.format, out)
}
