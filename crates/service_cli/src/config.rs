//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables, and
//! command-line flags.

use sampler_core::EngineKind;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Upper bound on `threads`; larger pools are almost certainly a typo.
pub const MAX_THREADS: usize = 1024;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid engine: {0}. Must be one of: std, small")]
    InvalidEngine(String),

    #[error("Invalid seed: {0}. Must be an unsigned 64-bit integer")]
    InvalidSeed(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidFormat(String),

    #[error("Invalid thread count: {0}. Must be an integer no greater than 1024")]
    InvalidThreads(String),

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output formats for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Sampler CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Engine family used for every draw
    #[serde(deserialize_with = "deserialize_engine")]
    pub engine: EngineKind,
    /// Deterministic seed; entropy seeding when absent
    pub seed: Option<u64>,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_format")]
    pub format: OutputFormat,
    /// Worker threads for parallel fills (0 = rayon default)
    pub threads: usize,
}

fn deserialize_engine<'de, D>(deserializer: D) -> Result<EngineKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    EngineKind::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::Std,
            seed: None,
            log_level: LogLevel::Warn,
            format: OutputFormat::Table,
            threads: 0,
        }
    }
}

/// Environment variables read by [`build_config`]
pub const ENV_ENGINE: &str = "SAMPLER_ENGINE";
pub const ENV_SEED: &str = "SAMPLER_SEED";
pub const ENV_LOG_LEVEL: &str = "SAMPLER_LOG_LEVEL";
pub const ENV_FORMAT: &str = "SAMPLER_FORMAT";
pub const ENV_THREADS: &str = "SAMPLER_THREADS";

impl SamplerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: SamplerConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Override fields from `lookup`, which maps variable names to values
    ///
    /// Only variables that are present replace the current value.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(engine) = lookup(ENV_ENGINE) {
            self.engine = parse_engine(&engine)?;
        }

        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = Some(parse_seed(&seed)?);
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }

        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = OutputFormat::from_str(&format)?;
        }

        if let Some(threads) = lookup(ENV_THREADS) {
            self.threads = threads
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidThreads(threads.clone()))?;
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads > MAX_THREADS {
            return Err(ConfigError::InvalidThreads(self.threads.to_string()));
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(engine) = &cli.engine {
            self.engine = parse_engine(engine)?;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(format) = &cli.format {
            self.format = OutputFormat::from_str(format)?;
        }
        if let Some(threads) = cli.threads {
            self.threads = threads;
        }
        Ok(())
    }
}

fn parse_engine(s: &str) -> Result<EngineKind, ConfigError> {
    EngineKind::from_str(s).map_err(|_| ConfigError::InvalidEngine(s.to_string()))
}

fn parse_seed(s: &str) -> Result<u64, ConfigError> {
    s.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSeed(s.to_string()))
}

/// Configuration-relevant CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Engine override
    pub engine: Option<String>,
    /// Seed override
    pub seed: Option<u64>,
    /// Log level override
    pub log_level: Option<String>,
    /// Output format override
    pub format: Option<String>,
    /// Thread count override
    pub threads: Option<usize>,
    /// Shorthand for `--log-level debug`
    pub verbose: bool,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<SamplerConfig, ConfigError> {
    build_config_with_env(cli, |key| std::env::var(key).ok())
}

/// [`build_config`] with an explicit environment lookup.
pub fn build_config_with_env<F>(cli: &CliArgs, lookup: F) -> Result<SamplerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => SamplerConfig::from_file(path)?,
        None => SamplerConfig::default(),
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli)?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config() {
        let config = SamplerConfig::default();
        assert_eq!(config.engine, EngineKind::Std);
        assert_eq!(config.seed, None);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.threads, 0);
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::from_str("WARN").unwrap(), LogLevel::Warn);
        assert_eq!(LogLevel::from_str("error").unwrap(), LogLevel::Error);

        assert!(LogLevel::from_str("invalid").is_err());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str("table").unwrap(), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("Csv").unwrap(), OutputFormat::Csv);

        assert!(OutputFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert_eq!(LogLevel::from_str(level).unwrap().to_string(), level);
        }
        for format in ["table", "json", "csv"] {
            assert_eq!(OutputFormat::from_str(format).unwrap().to_string(), format);
        }
    }

    #[test]
    fn test_validate_threads() {
        let mut config = SamplerConfig::default();
        config.threads = MAX_THREADS;
        assert!(config.validate().is_ok());

        config.threads = MAX_THREADS + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreads(_))
        ));
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
            engine = "small"
            seed = 42
            log_level = "debug"
            format = "json"
            threads = 4
        "#;

        let config: SamplerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.engine, EngineKind::Small);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.threads, 4);
    }

    #[test]
    fn test_partial_toml_deserialization() {
        let config: SamplerConfig = toml::from_str("format = \"csv\"").unwrap();
        // Unspecified fields keep their defaults
        assert_eq!(config.engine, EngineKind::Std);
        assert_eq!(config.seed, None);
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_toml_rejects_unknown_engine() {
        let result: Result<SamplerConfig, _> = toml::from_str("engine = \"mersenne\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let path = std::env::temp_dir().join("sampler-config-does-not-exist.toml");
        assert!(matches!(
            SamplerConfig::from_file(&path),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_from_file_reads_toml() {
        let path = std::env::temp_dir().join(format!(
            "sampler-config-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "seed = 7\nthreads = 2\n").unwrap();

        let config = SamplerConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.threads, 2);
    }

    #[test]
    fn test_apply_env_overrides_present_variables_only() {
        let mut config = SamplerConfig {
            format: OutputFormat::Csv,
            ..Default::default()
        };
        config
            .apply_env(env_of(&[(ENV_ENGINE, "small"), (ENV_SEED, "99")]))
            .unwrap();

        assert_eq!(config.engine, EngineKind::Small);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_apply_env_rejects_bad_values() {
        let mut config = SamplerConfig::default();
        assert!(matches!(
            config.apply_env(env_of(&[(ENV_SEED, "-1")])),
            Err(ConfigError::InvalidSeed(_))
        ));
        assert!(matches!(
            config.apply_env(env_of(&[(ENV_ENGINE, "mt19937")])),
            Err(ConfigError::InvalidEngine(_))
        ));
        assert!(matches!(
            config.apply_env(env_of(&[(ENV_THREADS, "many")])),
            Err(ConfigError::InvalidThreads(_))
        ));
    }

    #[test]
    fn test_cli_args_merge() {
        let mut config = SamplerConfig::default();
        let cli = CliArgs {
            engine: Some("small".to_string()),
            seed: Some(5),
            log_level: Some("info".to_string()),
            format: Some("json".to_string()),
            threads: Some(8),
            ..Default::default()
        };

        config.merge_with_cli(&cli).unwrap();

        assert_eq!(config.engine, EngineKind::Small);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.threads, 8);
    }

    #[test]
    fn test_verbose_forces_debug() {
        let mut config = SamplerConfig::default();
        let cli = CliArgs {
            log_level: Some("error".to_string()),
            verbose: true,
            ..Default::default()
        };
        config.merge_with_cli(&cli).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_build_config_with_defaults() {
        let config = build_config_with_env(&CliArgs::default(), no_env).unwrap();
        assert_eq!(config, SamplerConfig::default());
    }

    #[test]
    fn test_build_config_precedence() {
        let path = std::env::temp_dir().join(format!(
            "sampler-precedence-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "engine = \"small\"\nseed = 1\nformat = \"csv\"\n").unwrap();

        let cli = CliArgs {
            config_file: Some(path.clone()),
            seed: Some(3),
            ..Default::default()
        };
        let env = env_of(&[(ENV_SEED, "2"), (ENV_FORMAT, "json")]);
        let config = build_config_with_env(&cli, env);
        std::fs::remove_file(&path).unwrap();
        let config = config.unwrap();

        // File sets engine; env beats file on format; CLI beats env on seed.
        assert_eq!(config.engine, EngineKind::Small);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.seed, Some(3));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property test: any u64 seed survives the environment layer.
        #[test]
        fn prop_env_seed_round_trips(seed in any::<u64>()) {
            let mut config = SamplerConfig::default();
            let raw = seed.to_string();
            config.apply_env(env_of(&[(ENV_SEED, raw.as_str())])).unwrap();
            prop_assert_eq!(config.seed, Some(seed));
        }

        /// Property test: thread counts validate exactly up to the cap.
        #[test]
        fn prop_threads_validation(threads in 0..4096usize) {
            let config = SamplerConfig { threads, ..Default::default() };
            prop_assert_eq!(config.validate().is_ok(), threads <= MAX_THREADS);
        }
    }
}
