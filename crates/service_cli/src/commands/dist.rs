//! Dist command implementation
//!
//! Samples from a named non-uniform distribution.

use std::io::Write;

use clap::Args;
use rand::rngs::{SmallRng, StdRng};
use sampler_core::{Engine, EngineKind, NamedDistribution};
use tracing::info;

use super::{check_count, seed_engine};
use crate::config::SamplerConfig;
use crate::output::{render_values, SampleReport};
use crate::Result;

/// Arguments for `sampler dist`
#[derive(Debug, Clone, Args)]
pub struct DistArgs {
    /// Distribution name (normal, lognormal, poisson, exp, gamma, bernoulli, uniform)
    #[arg(long)]
    pub name: String,

    /// Comma-separated distribution parameters, e.g. `0,1` for normal
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub params: Vec<f64>,

    /// Number of values to draw
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: usize,
}

/// Run the dist command
pub fn run<W: Write>(config: &SamplerConfig, args: &DistArgs, out: &mut W) -> Result<()> {
    match config.engine {
        EngineKind::Std => run_with::<StdRng, W>(config, args, out),
        EngineKind::Small => run_with::<SmallRng, W>(config, args, out),
    }
}

fn run_with<E: Engine, W: Write>(config: &SamplerConfig, args: &DistArgs, out: &mut W) -> Result<()> {
    check_count("count", args.count)?;
    let dist = NamedDistribution::from_name(&args.name, &args.params)?;
    seed_engine::<E>(config.seed);

    info!(
        engine = %config.engine,
        distribution = dist.name(),
        params = ?args.params,
        count = args.count,
        "sampling distribution"
    );

    let values: Vec<f64> = (0..args.count).map(|_| dist.sample_on::<E>()).collect();

    let params: Vec<String> = args.params.iter().map(f64::to_string).collect();
    let report = SampleReport {
        command: "dist",
        engine: config.engine,
        seed: config.seed,
        source: format!("{}({})", dist.name(), params.join(", ")),
        values,
    };
    render_values(&report, config.format, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::CliError;
    use sampler_core::SamplingError;

    fn config() -> SamplerConfig {
        SamplerConfig {
            seed: Some(17),
            format: OutputFormat::Csv,
            ..Default::default()
        }
    }

    fn values(out: Vec<u8>) -> Vec<f64> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .skip(1)
            .map(|l| l.split(',').nth(1).unwrap().parse().unwrap())
            .collect()
    }

    #[test]
    fn test_bernoulli_draws_are_zero_or_one() {
        let args = DistArgs {
            name: "bernoulli".to_string(),
            params: vec![0.5],
            count: 200,
        };
        let mut out = Vec::new();
        run(&config(), &args, &mut out).unwrap();

        let drawn = values(out);
        assert_eq!(drawn.len(), 200);
        assert!(drawn.iter().all(|&v| v == 0.0 || v == 1.0));
    }

    #[test]
    fn test_poisson_draws_are_non_negative_integers() {
        let args = DistArgs {
            name: "poisson".to_string(),
            params: vec![3.0],
            count: 100,
        };
        let mut out = Vec::new();
        run(&config(), &args, &mut out).unwrap();
        assert!(values(out).iter().all(|&v| v >= 0.0 && v.fract() == 0.0));
    }

    #[test]
    fn test_normal_sample_mean() {
        let args = DistArgs {
            name: "normal".to_string(),
            params: vec![10.0, 1.0],
            count: 5_000,
        };
        let mut out = Vec::new();
        run(&config(), &args, &mut out).unwrap();

        let drawn = values(out);
        let mean = drawn.iter().sum::<f64>() / drawn.len() as f64;
        assert!((mean - 10.0).abs() < 0.1, "mean {}", mean);
    }

    #[test]
    fn test_unknown_distribution_rejected() {
        let args = DistArgs {
            name: "cauchy".to_string(),
            params: vec![0.0, 1.0],
            count: 1,
        };
        let mut out = Vec::new();
        assert!(matches!(
            run(&config(), &args, &mut out),
            Err(CliError::Sampling(SamplingError::InvalidParameters { .. }))
        ));
    }

    #[test]
    fn test_overflowing_uniform_rejected() {
        let args = DistArgs {
            name: "uniform".to_string(),
            params: vec![-1e308, 1e308],
            count: 1,
        };
        let mut out = Vec::new();
        assert!(matches!(
            run(&config(), &args, &mut out),
            Err(CliError::Sampling(SamplingError::InvalidParameters { .. }))
        ));
    }

    #[test]
    fn test_oversized_count_rejected() {
        let args = DistArgs {
            name: "normal".to_string(),
            params: vec![0.0, 1.0],
            count: usize::MAX,
        };
        let mut out = Vec::new();
        assert!(matches!(
            run(&config(), &args, &mut out),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_wrong_parameter_count_rejected() {
        let args = DistArgs {
            name: "gamma".to_string(),
            params: vec![2.0],
            count: 1,
        };
        let mut out = Vec::new();
        assert!(run(&config(), &args, &mut out).is_err());
    }
}
