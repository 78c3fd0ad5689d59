//! Clock command implementation
//!
//! Reports whether the per-thread CPU clock is available and uses it to time
//! a burst of uniform draws on the configured engine.

use std::io::Write;

use clap::Args;
use rand::rngs::{SmallRng, StdRng};
use sampler_clock::ThreadClock;
use sampler_core::{Engine, EngineKind, Sampler};
use serde::Serialize;
use tracing::info;

use super::{check_count, seed_engine};
use crate::config::SamplerConfig;
use crate::output::render_summary;
use crate::Result;

/// Arguments for `sampler clock`
#[derive(Debug, Clone, Args)]
pub struct ClockArgs {
    /// Number of draws in the timed burst
    #[arg(short, long, default_value_t = 1_000_000)]
    pub draws: usize,
}

/// Result of a timed sampling burst
#[derive(Debug, Clone, Serialize)]
pub struct ClockReport {
    pub available: bool,
    pub supported: bool,
    pub steady: bool,
    pub engine: EngineKind,
    pub draws: usize,
    /// Thread CPU time for the burst; absent when the clock is unsupported
    pub cpu_time_ns: Option<u128>,
    pub ns_per_draw: Option<f64>,
}

impl ClockReport {
    fn rows(&self) -> Vec<(&'static str, String)> {
        let or_unsupported =
            |v: Option<String>| v.unwrap_or_else(|| "unsupported".to_string());
        vec![
            ("available", self.available.to_string()),
            ("supported", self.supported.to_string()),
            ("steady", self.steady.to_string()),
            ("engine", self.engine.to_string()),
            ("draws", self.draws.to_string()),
            ("cpu_time_ns", or_unsupported(self.cpu_time_ns.map(|n| n.to_string()))),
            ("ns_per_draw", or_unsupported(self.ns_per_draw.map(|n| format!("{:.3}", n)))),
        ]
    }
}

/// Run the clock command
pub fn run<W: Write>(config: &SamplerConfig, args: &ClockArgs, out: &mut W) -> Result<()> {
    check_count("draws", args.draws)?;
    let report = match config.engine {
        EngineKind::Std => measure::<StdRng>(config, args.draws),
        EngineKind::Small => measure::<SmallRng>(config, args.draws),
    };

    info!(
        supported = report.supported,
        cpu_time_ns = ?report.cpu_time_ns,
        "timed sampling burst"
    );

    render_summary(&report.rows(), &report, config.format, out)
}

fn measure<E: Engine>(config: &SamplerConfig, draws: usize) -> ClockReport {
    seed_engine::<E>(config.seed);
    let mut buffer = vec![0.0_f64; draws];

    let start = ThreadClock::now();
    Sampler::<E>::fill(&mut buffer);
    std::hint::black_box(&buffer);
    let cpu_time = start.elapsed();

    ClockReport {
        available: ThreadClock::is_available(),
        supported: start.is_supported(),
        steady: ThreadClock::IS_STEADY,
        engine: config.engine,
        draws,
        cpu_time_ns: cpu_time.map(|d| d.as_nanos()),
        ns_per_draw: cpu_time
            .filter(|_| draws > 0)
            .map(|d| d.as_nanos() as f64 / draws as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_clock_report_json() {
        let config = SamplerConfig {
            format: OutputFormat::Json,
            ..Default::default()
        };
        let mut out = Vec::new();
        run(&config, &ClockArgs { draws: 10_000 }, &mut out).unwrap();

        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["draws"], 10_000);
        assert_eq!(parsed["engine"], "std");
        assert_eq!(parsed["available"], ThreadClock::is_available());
        assert_eq!(parsed["supported"], ThreadClock::is_available());
        if ThreadClock::is_available() {
            assert!(parsed["cpu_time_ns"].is_u64());
        } else {
            assert!(parsed["cpu_time_ns"].is_null());
        }
    }

    #[test]
    fn test_clock_report_rows() {
        let report = ClockReport {
            available: false,
            supported: false,
            steady: true,
            engine: EngineKind::Small,
            draws: 0,
            cpu_time_ns: None,
            ns_per_draw: None,
        };
        let rows = report.rows();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[3], ("engine", "small".to_string()));
        assert_eq!(rows[5], ("cpu_time_ns", "unsupported".to_string()));
    }

    #[test]
    fn test_oversized_draws_rejected() {
        let mut out = Vec::new();
        let result = run(&SamplerConfig::default(), &ClockArgs { draws: usize::MAX }, &mut out);
        assert!(matches!(result, Err(crate::CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_zero_draws_has_no_rate() {
        let config = SamplerConfig {
            engine: EngineKind::Small,
            seed: Some(1),
            ..Default::default()
        };
        let report = measure::<SmallRng>(&config, 0);
        assert_eq!(report.ns_per_draw, None);
    }
}
