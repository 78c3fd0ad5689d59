//! Engine abstraction and entropy seeding.
//!
//! Any `rand` generator that can be seeded qualifies as an [`Engine`]. The
//! facility keeps one instance per (thread, engine type) and identifies the
//! engine type by its `TypeId`, so new families need no registration.
//!
//! [`EngineKind`] names the closed set of families selectable from
//! configuration files and the command line.

use std::any::type_name;
use std::fmt;
use std::str::FromStr;

use rand::rngs::{OsRng, SmallRng, StdRng};
use rand::{RngCore, SeedableRng};

use crate::error::{SamplingError, SamplingResult};

/// Pseudorandom bit generator usable by the sampling facility.
///
/// Blanket-implemented for every seedable `rand` generator.
pub trait Engine: RngCore + SeedableRng + 'static {}

impl<T: RngCore + SeedableRng + 'static> Engine for T {}

/// Engine used by the free functions of this crate.
pub type DefaultEngine = StdRng;

/// Creates an engine seeded from the OS entropy source.
///
/// # Errors
///
/// Returns `SamplingError::Entropy` if the entropy source fails.
pub fn engine_from_entropy<E: Engine>() -> SamplingResult<E> {
    E::from_rng(OsRng).map_err(|err| SamplingError::Entropy {
        engine: type_name::<E>(),
        reason: err.to_string(),
    })
}

/// Creates an engine seeded from the OS entropy source, aborting the
/// calling thread if entropy is unavailable.
///
/// # Panics
///
/// Panics when the entropy source fails. This is an environment failure
/// that the facility does not try to recover from.
pub(crate) fn engine_from_entropy_or_abort<E: Engine>() -> E {
    match engine_from_entropy::<E>() {
        Ok(engine) => engine,
        Err(err) => panic!("{err}"),
    }
}

/// Engine families selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EngineKind {
    /// `rand::rngs::StdRng` (ChaCha12).
    #[default]
    Std,
    /// `rand::rngs::SmallRng` (Xoshiro family), faster with a smaller state.
    Small,
}

impl EngineKind {
    /// All selectable engine families.
    pub const ALL: [EngineKind; 2] = [EngineKind::Std, EngineKind::Small];

    /// Short name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Std => "std",
            EngineKind::Small => "small",
        }
    }

    /// Rust type name of the underlying generator.
    pub fn type_name(&self) -> &'static str {
        match self {
            EngineKind::Std => type_name::<StdRng>(),
            EngineKind::Small => type_name::<SmallRng>(),
        }
    }
}

impl FromStr for EngineKind {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "std" | "stdrng" | "default" => Ok(EngineKind::Std),
            "small" | "smallrng" => Ok(EngineKind::Small),
            _ => Err(SamplingError::UnknownEngine(s.to_string())),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
