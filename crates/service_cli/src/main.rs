//! Sampler CLI - command-line front end for thread-local random sampling
//!
//! # Commands
//!
//! - `sampler sample --kind int --low 1 --high 6 -n 10` - uniform draws
//! - `sampler fill --len 1000 --parallel` - fill a buffer of floats
//! - `sampler dist --name normal --params 0,1 -n 5` - non-uniform draws
//! - `sampler clock` - time a sampling burst with the thread CPU clock
//!
//! # Configuration
//!
//! Settings are layered: defaults, then an optional TOML file (`--config`),
//! then `SAMPLER_*` environment variables, then command-line flags.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use commands::clock::ClockArgs;
use commands::dist::DistArgs;
use commands::fill::FillArgs;
use commands::sample::SampleArgs;
use config::{build_config, CliArgs, LogLevel};

/// Thread-local pseudorandom sampling CLI
#[derive(Parser)]
#[command(name = "sampler")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (same as --log-level debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Engine family (std, small)
    #[arg(short, long, global = true)]
    engine: Option<String>,

    /// Deterministic seed for the engine
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<String>,

    /// Worker threads for parallel fills (0 = rayon default)
    #[arg(short, long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn config_args(&self) -> CliArgs {
        CliArgs {
            config_file: self.config.clone(),
            engine: self.engine.clone(),
            seed: self.seed,
            log_level: self.log_level.clone(),
            format: self.format.clone(),
            threads: self.threads,
            verbose: self.verbose,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Draw uniform values from a closed interval
    Sample(SampleArgs),

    /// Fill a buffer with uniform floats
    Fill(FillArgs),

    /// Draw values from a named distribution
    Dist(DistArgs),

    /// Time a sampling burst with the per-thread CPU clock
    Clock(ClockArgs),
}

/// Initialise tracing; `RUST_LOG` wins over the configured level.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = build_config(&cli.config_args()).context("failed to load configuration")?;
    init_tracing(config.log_level);
    debug!(?config, "configuration loaded");

    commands::configure_thread_pool(config.threads)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Sample(args) => commands::sample::run(&config, args, &mut out)?,
        Commands::Fill(args) => commands::fill::run(&config, args, &mut out)?,
        Commands::Dist(args) => commands::dist::run(&config, args, &mut out)?,
        Commands::Clock(args) => commands::clock::run(&config, args, &mut out)?,
    }
    out.flush()?;

    let stats = sampler_core::stats();
    info!(
        engines_created = stats.engines_created,
        reseeds = stats.reseeds,
        "done"
    );
    Ok(())
}
