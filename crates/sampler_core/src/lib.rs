//! # Thread-Local Sampling Facility
//!
//! `sampler_core` keeps one pseudorandom engine per (thread, engine type),
//! seeded from OS entropy on first use, and layers uniform sampling,
//! distribution sampling and range-fill algorithms on top.
//!
//! ## Design Rationale
//!
//! - **Per-thread engines**: every thread owns its engines through a
//!   [`ThreadContext`]; there is no shared mutable state and no locking.
//! - **Persistent state**: repeated calls on one thread advance the same
//!   engine; it is only reseeded on request.
//! - **Closed numeric set**: [`UniformSample`] covers the primitive integer
//!   and float types, each kind with its own default interval.
//! - **Inclusive bounds**: `[low, high]` is closed for every kind.
//!
//! ## Module Structure
//!
//! - [`engine`]: engine trait, entropy seeding, [`EngineKind`]
//! - [`context`]: caller-ownable per-thread engine registry
//! - [`registry`]: process-wide registry of thread contexts
//! - [`uniform`]: closed-interval uniform draws
//! - [`distributions`]: parameterised distributions
//! - [`sampler`]: the [`Sampler`] facade
//!
//! ## Usage Example
//!
//! ```rust
//! use sampler_core as sampler;
//!
//! // Reproducible stream on this thread
//! sampler::seed_with(12345);
//! let die: u8 = sampler::sample_in(1, 6);
//! assert!((1..=6).contains(&die));
//!
//! // Defaults: [0, MAX] for integers, [0.0, 1.0] for floats
//! let unit: f64 = sampler::sample();
//! assert!((0.0..=1.0).contains(&unit));
//!
//! // Fill a pre-sized buffer
//! let mut buffer = vec![0.0_f64; 10];
//! sampler::fill_n_in(&mut buffer, 10, -1.0, 1.0);
//! assert!(buffer.iter().all(|x| (-1.0..=1.0).contains(x)));
//! ```
//!
//! ## Non-goals
//!
//! None of the engines are suitable for cryptographic use.

pub mod context;
pub mod distributions;
pub mod engine;
pub mod error;
pub mod registry;
pub mod sampler;
pub mod uniform;


use rand::distributions::Distribution;

pub use context::ThreadContext;
pub use distributions::{
    sample_distribution_with, sample_from_rng, FromParams, NamedDistribution, DISTRIBUTION_NAMES,
};
pub use engine::{engine_from_entropy, DefaultEngine, Engine, EngineKind};
pub use error::{SamplingError, SamplingResult};
pub use registry::{stats, with_engine, RegistryStats};
pub use sampler::Sampler;
pub use uniform::{bounds_valid, NumericKind, UniformSample};

/// Reseeds the calling thread's default engine from fresh entropy.
///
/// # Panics
///
/// Panics if the entropy source fails.
pub fn seed() {
    Sampler::<DefaultEngine>::seed();
}

/// Reseeds the calling thread's default engine from fresh entropy.
///
/// # Errors
///
/// Returns `SamplingError::Entropy` if the entropy source fails.
pub fn try_seed() -> SamplingResult<()> {
    Sampler::<DefaultEngine>::try_seed()
}

/// Reseeds the calling thread's default engine with `value`.
pub fn seed_with(value: u64) {
    Sampler::<DefaultEngine>::seed_with(value);
}

/// Draws one value of `T` from its default interval.
#[inline]
pub fn sample<T: UniformSample>() -> T {
    Sampler::<DefaultEngine>::sample()
}

/// Draws one value of `T` uniformly from `[low, high]`.
#[inline]
pub fn sample_in<T: UniformSample>(low: T, high: T) -> T {
    Sampler::<DefaultEngine>::sample_in(low, high)
}

/// Checked form of [`sample_in`].
///
/// # Errors
///
/// Returns `SamplingError::InvalidBounds` for an unusable interval.
pub fn try_sample_in<T: UniformSample>(low: T, high: T) -> SamplingResult<T> {
    Sampler::<DefaultEngine>::try_sample_in(low, high)
}

/// Draws one value from `dist` on the default engine.
#[inline]
pub fn sample_from<T, D: Distribution<T> + ?Sized>(dist: &D) -> T {
    Sampler::<DefaultEngine>::sample_from(dist)
}

/// Builds `D` from `params` and draws one value on the default engine.
///
/// # Errors
///
/// Returns `SamplingError::InvalidParameters` if `params` are rejected.
///
/// # Examples
///
/// ```rust
/// use rand_distr::Poisson;
///
/// let count = sampler_core::sample_distribution::<Poisson<f64>>(3.0).unwrap();
/// assert!(count >= 0.0);
/// ```
pub fn sample_distribution<D>(params: D::Params) -> SamplingResult<D::Output>
where
    D: FromParams + Distribution<<D as FromParams>::Output>,
{
    Sampler::<DefaultEngine>::sample_distribution::<D>(params)
}

/// Assigns every element an independent draw from its default interval.
#[inline]
pub fn fill<'a, T, I>(items: I)
where
    T: UniformSample,
    I: IntoIterator<Item = &'a mut T>,
{
    Sampler::<DefaultEngine>::fill(items);
}

/// Assigns every element an independent draw from `[low, high]`.
#[inline]
pub fn fill_in<'a, T, I>(items: I, low: T, high: T)
where
    T: UniformSample,
    I: IntoIterator<Item = &'a mut T>,
{
    Sampler::<DefaultEngine>::fill_in(items, low, high);
}

/// Assigns the first `count` elements a draw from the default interval.
#[inline]
pub fn fill_n<'a, T, I>(items: I, count: usize) -> usize
where
    T: UniformSample,
    I: IntoIterator<Item = &'a mut T>,
{
    Sampler::<DefaultEngine>::fill_n(items, count)
}

/// Assigns the first `count` elements a draw from `[low, high]`.
#[inline]
pub fn fill_n_in<'a, T, I>(items: I, count: usize, low: T, high: T) -> usize
where
    T: UniformSample,
    I: IntoIterator<Item = &'a mut T>,
{
    Sampler::<DefaultEngine>::fill_n_in(items, count, low, high)
}

/// Appends `count` draws from the default interval to `target`.
#[inline]
pub fn extend_n<T, C>(target: &mut C, count: usize)
where
    T: UniformSample,
    C: Extend<T> + ?Sized,
{
    Sampler::<DefaultEngine>::extend_n(target, count);
}

/// Appends `count` draws from `[low, high]` to `target`.
#[inline]
pub fn extend_n_in<T, C>(target: &mut C, count: usize, low: T, high: T)
where
    T: UniformSample,
    C: Extend<T> + ?Sized,
{
    Sampler::<DefaultEngine>::extend_n_in(target, count, low, high);
}

/// Fills `slice` with draws from `[low, high]` on the rayon pool.
#[inline]
pub fn par_fill_in<T: UniformSample>(slice: &mut [T], low: T, high: T) {
    Sampler::<DefaultEngine>::par_fill_in(slice, low, high);
}
