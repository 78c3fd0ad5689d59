//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands are generic
//! over the engine type; `run` picks the type from the configured
//! [`EngineKind`](sampler_core::EngineKind).

pub mod clock;
pub mod dist;
pub mod fill;
pub mod sample;

use std::time::{SystemTime, UNIX_EPOCH};

use sampler_core::{Engine, Sampler};
use tracing::{debug, warn};

use crate::{CliError, Result};

/// Seeds the calling thread's engine `E`.
///
/// A configured seed is applied deterministically. Otherwise the engine is
/// reseeded from OS entropy, falling back to a clock-derived seed if the
/// entropy source fails.
pub(crate) fn seed_engine<E: Engine>(seed: Option<u64>) {
    match seed {
        Some(value) => {
            debug!(seed = value, "seeding engine deterministically");
            Sampler::<E>::seed_with(value);
        }
        None => {
            if let Err(err) = Sampler::<E>::try_seed() {
                let fallback = fallback_seed();
                warn!(error = %err, fallback, "entropy seeding failed, using clock-derived seed");
                Sampler::<E>::seed_with(fallback);
            }
        }
    }
}

fn fallback_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    nanos ^ u64::from(std::process::id()).rotate_left(32)
}

/// Sizes the global rayon pool; `0` keeps rayon's default.
pub fn configure_thread_pool(threads: usize) -> Result<()> {
    if threads == 0 {
        return Ok(());
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| CliError::ThreadPool(e.to_string()))?;
    debug!(threads, "configured rayon thread pool");
    Ok(())
}

/// Largest number of values a single command may produce.
pub const MAX_COUNT: usize = 100_000_000;

/// Rejects element counts above [`MAX_COUNT`] before anything is allocated.
pub(crate) fn check_count(what: &str, count: usize) -> Result<()> {
    if count > MAX_COUNT {
        return Err(CliError::InvalidArgument(format!(
            "{} {} exceeds the maximum of {}",
            what, count, MAX_COUNT
        )));
    }
    Ok(())
}

/// Parses an optional bound, falling back to `default`.
pub(crate) fn parse_bound<T>(raw: Option<&str>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(s) => s
            .trim()
            .parse()
            .map_err(|e| CliError::InvalidArgument(format!("cannot parse bound '{}': {}", s, e))),
    }
}
