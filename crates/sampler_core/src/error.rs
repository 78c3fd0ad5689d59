//! Error types for the sampling facility.
//!
//! This module provides:
//! - `SamplingError`: Failures raised by seeding, checked sampling and
//!   distribution construction
//!
//! Precondition violations in the unchecked sampling API (inverted or
//! overflowing bounds) are programming errors and are only checked with
//! `debug_assert!`; they never surface as a `SamplingError`.

use thiserror::Error;

/// Sampling facility errors.
///
/// # Variants
/// - `Entropy`: The OS entropy source could not produce a seed
/// - `InvalidBounds`: Checked sampling received an unusable interval
/// - `InvalidParameters`: A named distribution rejected its parameter set
/// - `UnknownEngine`: An engine family name could not be parsed
///
/// # Examples
/// ```
/// use sampler_core::SamplingError;
///
/// let err = SamplingError::InvalidBounds {
///     low: "5".to_string(),
///     high: "1".to_string(),
/// };
/// assert!(format!("{}", err).contains("[5, 1]"));
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SamplingError {
    /// Entropy acquisition failed while seeding an engine.
    #[error("Entropy source failed while seeding {engine}: {reason}")]
    Entropy {
        /// Type name of the engine being seeded
        engine: &'static str,
        /// Message reported by the entropy source
        reason: String,
    },

    /// Interval rejected by checked sampling.
    #[error("Invalid sampling interval [{low}, {high}]")]
    InvalidBounds {
        /// Lower bound, formatted
        low: String,
        /// Upper bound, formatted
        high: String,
    },

    /// Distribution parameters rejected at construction.
    #[error("Invalid parameters for {distribution} distribution: {reason}")]
    InvalidParameters {
        /// Distribution name
        distribution: &'static str,
        /// Description of the rejected parameters
        reason: String,
    },

    /// Unrecognised engine family name.
    #[error("Unknown engine: {0}. Must be one of: std, small")]
    UnknownEngine(String),
}

/// Result type for sampling operations.
pub type SamplingResult<T> = Result<T, SamplingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entropy_display() {
        let err = SamplingError::Entropy {
            engine: "StdRng",
            reason: "device unavailable".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("StdRng"));
        assert!(msg.contains("device unavailable"));
    }

    #[test]
    fn test_invalid_parameters_display() {
        let err = SamplingError::InvalidParameters {
            distribution: "normal",
            reason: "standard deviation < 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameters for normal distribution: standard deviation < 0"
        );
    }

    #[test]
    fn test_unknown_engine_display() {
        let err = SamplingError::UnknownEngine("mt19937".to_string());
        assert!(err.to_string().contains("mt19937"));
        assert!(err.to_string().contains("std, small"));
    }
}
