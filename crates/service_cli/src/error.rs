//! CLI error types

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Sampling error: {0}")]
    Sampling(#[from] sampler_core::SamplingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
