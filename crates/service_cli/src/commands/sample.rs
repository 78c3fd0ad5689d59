//! Sample command implementation
//!
//! Draws uniform integers or floating-point values from the configured engine.

use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use clap::{Args, ValueEnum};
use rand::rngs::{SmallRng, StdRng};
use sampler_core::{Engine, EngineKind, Sampler, SamplingError, UniformSample};
use serde::Serialize;
use tracing::info;

use super::{check_count, parse_bound, seed_engine};
use crate::config::SamplerConfig;
use crate::output::{render_values, SampleReport};
use crate::Result;

/// Value kinds the `sample` command can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ValueKind {
    /// 64-bit signed integers; default interval [0, i64::MAX]
    #[default]
    Int,
    /// 64-bit floats; default interval [0, 1]
    Float,
}

/// Arguments for `sampler sample`
#[derive(Debug, Clone, Args)]
pub struct SampleArgs {
    /// Kind of value to draw
    #[arg(short, long, value_enum, default_value_t = ValueKind::Int)]
    pub kind: ValueKind,

    /// Inclusive lower bound
    #[arg(long, allow_hyphen_values = true)]
    pub low: Option<String>,

    /// Inclusive upper bound
    #[arg(long, allow_hyphen_values = true)]
    pub high: Option<String>,

    /// Number of values to draw
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

/// Run the sample command
pub fn run<W: Write>(config: &SamplerConfig, args: &SampleArgs, out: &mut W) -> Result<()> {
    match config.engine {
        EngineKind::Std => run_with::<StdRng, W>(config, args, out),
        EngineKind::Small => run_with::<SmallRng, W>(config, args, out),
    }
}

fn run_with<E: Engine, W: Write>(config: &SamplerConfig, args: &SampleArgs, out: &mut W) -> Result<()> {
    check_count("count", args.count)?;
    seed_engine::<E>(config.seed);
    match args.kind {
        ValueKind::Int => draw::<E, i64, W>(config, args, out),
        ValueKind::Float => draw::<E, f64, W>(config, args, out),
    }
}

fn draw<E, T, W>(config: &SamplerConfig, args: &SampleArgs, out: &mut W) -> Result<()>
where
    E: Engine,
    T: UniformSample + FromStr + Display + Serialize,
    T::Err: Display,
    W: Write,
{
    let low = parse_bound(args.low.as_deref(), T::default_low())?;
    let high = parse_bound(args.high.as_deref(), T::default_high())?;
    if !T::bounds_valid(low, high) {
        return Err(SamplingError::InvalidBounds {
            low: low.to_string(),
            high: high.to_string(),
        }
        .into());
    }

    info!(
        engine = %config.engine,
        low = %low,
        high = %high,
        count = args.count,
        "sampling uniform values"
    );

    let mut values = Vec::with_capacity(args.count);
    Sampler::<E>::extend_n_in(&mut values, args.count, low, high);

    let report = SampleReport {
        command: "sample",
        engine: config.engine,
        seed: config.seed,
        source: format!("uniform {} [{}, {}]", std::any::type_name::<T>(), low, high),
        values,
    };
    render_values(&report, config.format, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::CliError;

    fn config(engine: EngineKind) -> SamplerConfig {
        SamplerConfig {
            engine,
            seed: Some(2024),
            format: OutputFormat::Csv,
            ..Default::default()
        }
    }

    fn args(kind: ValueKind, low: &str, high: &str, count: usize) -> SampleArgs {
        SampleArgs {
            kind,
            low: Some(low.to_string()),
            high: Some(high.to_string()),
            count,
        }
    }

    fn csv_values(text: &str) -> Vec<String> {
        text.lines()
            .skip(1)
            .map(|l| l.split(',').nth(1).unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_sample_ints_in_range() {
        let mut out = Vec::new();
        run(&config(EngineKind::Std), &args(ValueKind::Int, "-5", "5", 500), &mut out).unwrap();

        let values: Vec<i64> = csv_values(&String::from_utf8(out).unwrap())
            .iter()
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(values.len(), 500);
        assert!(values.iter().all(|v| (-5..=5).contains(v)));
    }

    #[test]
    fn test_sample_floats_in_range() {
        let mut out = Vec::new();
        run(&config(EngineKind::Small), &args(ValueKind::Float, "-1", "1", 200), &mut out).unwrap();

        let values: Vec<f64> = csv_values(&String::from_utf8(out).unwrap())
            .iter()
            .map(|v| v.parse().unwrap())
            .collect();
        assert_eq!(values.len(), 200);
        assert!(values.iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut first = Vec::new();
        let mut second = Vec::new();
        let a = args(ValueKind::Int, "0", "1000000", 20);
        run(&config(EngineKind::Small), &a, &mut first).unwrap();
        run(&config(EngineKind::Small), &a, &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut out = Vec::new();
        let result = run(&config(EngineKind::Std), &args(ValueKind::Int, "5", "1", 1), &mut out);
        assert!(matches!(
            result,
            Err(CliError::Sampling(SamplingError::InvalidBounds { .. }))
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_unparseable_bound_rejected() {
        let mut out = Vec::new();
        let result = run(&config(EngineKind::Std), &args(ValueKind::Int, "1.5", "3", 1), &mut out);
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_oversized_count_rejected() {
        let mut out = Vec::new();
        let result = run(
            &config(EngineKind::Std),
            &args(ValueKind::Int, "0", "1", usize::MAX),
            &mut out,
        );
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_default_float_interval() {
        let mut out = Vec::new();
        let a = SampleArgs {
            kind: ValueKind::Float,
            low: None,
            high: None,
            count: 50,
        };
        run(&config(EngineKind::Std), &a, &mut out).unwrap();
        let values: Vec<f64> = csv_values(&String::from_utf8(out).unwrap())
            .iter()
            .map(|v| v.parse().unwrap())
            .collect();
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}
