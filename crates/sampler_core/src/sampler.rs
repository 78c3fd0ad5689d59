//! Sampling facade over the thread-local engine registry.
//!
//! [`Sampler<E>`] groups every operation of the facility for one engine
//! type: seeding, uniform sampling, distribution sampling and the
//! range-fill algorithms. All operations act on the calling thread's
//! instance of `E`; other threads are never affected.
//!
//! The crate-level free functions ([`crate::sample`], [`crate::fill`], ...)
//! are shorthands for `Sampler<DefaultEngine>`.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use rand::distributions::Distribution;
use rayon::prelude::*;
use tracing::trace;

use crate::distributions::FromParams;
use crate::engine::{DefaultEngine, Engine};
use crate::error::{SamplingError, SamplingResult};
use crate::registry::{self, with_engine};
use crate::uniform::UniformSample;

/// Elements per task in [`Sampler::par_fill_in`].
pub const PAR_FILL_CHUNK: usize = 4096;

/// Operations of the sampling facility for engine type `E`.
///
/// `Sampler` carries no state; it only names the engine. All methods are
/// associated functions.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::SmallRng;
/// use sampler_core::Sampler;
///
/// Sampler::<SmallRng>::seed_with(7);
/// let a: u16 = Sampler::<SmallRng>::sample_in(10, 20);
///
/// Sampler::<SmallRng>::seed_with(7);
/// let b: u16 = Sampler::<SmallRng>::sample_in(10, 20);
///
/// assert_eq!(a, b);
/// assert!((10..=20).contains(&a));
/// ```
pub struct Sampler<E: Engine = DefaultEngine> {
    _engine: PhantomData<fn() -> E>,
}

impl<E: Engine> Sampler<E> {
    /// Reseeds the calling thread's engine from fresh entropy.
    ///
    /// # Panics
    ///
    /// Panics if the entropy source fails. Use [`Sampler::try_seed`] to
    /// fall back to deterministic seeding instead.
    pub fn seed() {
        registry::seed::<E>();
    }

    /// Reseeds the calling thread's engine from fresh entropy.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::Entropy` if the entropy source fails.
    pub fn try_seed() -> SamplingResult<()> {
        registry::try_seed::<E>()
    }

    /// Reseeds the calling thread's engine with `value`. Subsequent draws on
    /// this thread are reproducible.
    pub fn seed_with(value: u64) {
        registry::seed_with::<E>(value);
    }

    /// Draws one value from the default interval of `T`: `[0, MAX]` for
    /// integers, `[0.0, 1.0]` for floats.
    #[inline]
    pub fn sample<T: UniformSample>() -> T {
        Self::sample_in(T::default_low(), T::default_high())
    }

    /// Draws one value uniformly from the closed interval `[low, high]`.
    ///
    /// Invalid intervals are only caught by `debug_assert!`; see
    /// [`Sampler::try_sample_in`] for the checked form.
    #[inline]
    pub fn sample_in<T: UniformSample>(low: T, high: T) -> T {
        with_engine::<E, _>(|rng| T::draw(rng, low, high))
    }

    /// Checked form of [`Sampler::sample_in`].
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::InvalidBounds` if `[low, high]` violates the
    /// sampling preconditions.
    pub fn try_sample_in<T: UniformSample>(low: T, high: T) -> SamplingResult<T> {
        if !T::bounds_valid(low, high) {
            return Err(SamplingError::InvalidBounds {
                low: format!("{:?}", low),
                high: format!("{:?}", high),
            });
        }
        Ok(Self::sample_in(low, high))
    }

    /// Draws one value from an arbitrary distribution.
    ///
    /// # Panics
    ///
    /// Panics if `dist` samples from this facility on the calling thread
    /// while drawing; the engine is mutably borrowed for the whole call.
    #[inline]
    pub fn sample_from<T, D>(dist: &D) -> T
    where
        D: Distribution<T> + ?Sized,
    {
        with_engine::<E, _>(|rng| dist.sample(rng))
    }

    /// Builds the distribution `D` from `params` and draws one value.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::InvalidParameters` if `params` are rejected.
    pub fn sample_distribution<D>(params: D::Params) -> SamplingResult<D::Output>
    where
        D: FromParams + Distribution<<D as FromParams>::Output>,
    {
        let dist = D::from_params(params)?;
        Ok(Self::sample_from(&dist))
    }

    /// Assigns every element an independent draw from the default interval.
    ///
    /// Works on anything yielding `&mut T`: slices, vectors, arrays, deques
    /// or iterator adaptors. The container is never resized.
    #[inline]
    pub fn fill<'a, T, I>(items: I)
    where
        T: UniformSample,
        I: IntoIterator<Item = &'a mut T>,
    {
        Self::fill_in(items, T::default_low(), T::default_high());
    }

    /// Assigns every element an independent draw from `[low, high]`.
    ///
    /// The engine is borrowed once per element, so `items` may itself
    /// sample from the facility while it is advanced.
    pub fn fill_in<'a, T, I>(items: I, low: T, high: T)
    where
        T: UniformSample,
        I: IntoIterator<Item = &'a mut T>,
    {
        let mut written = 0usize;
        for slot in items {
            *slot = Self::sample_in(low, high);
            written += 1;
        }
        trace!(engine = type_name::<E>(), written, "fill");
    }

    /// Assigns the first `count` elements an independent draw from the
    /// default interval and returns the number of elements written.
    ///
    /// The range must hold at least `count` elements (debug-asserted).
    #[inline]
    pub fn fill_n<'a, T, I>(items: I, count: usize) -> usize
    where
        T: UniformSample,
        I: IntoIterator<Item = &'a mut T>,
    {
        Self::fill_n_in(items, count, T::default_low(), T::default_high())
    }

    /// Assigns the first `count` elements an independent draw from
    /// `[low, high]` and returns the number of elements written.
    ///
    /// Like [`Sampler::fill_in`], `items` may sample while it is advanced.
    pub fn fill_n_in<'a, T, I>(items: I, count: usize, low: T, high: T) -> usize
    where
        T: UniformSample,
        I: IntoIterator<Item = &'a mut T>,
    {
        let mut written = 0usize;
        for slot in items.into_iter().take(count) {
            *slot = Self::sample_in(low, high);
            written += 1;
        }
        debug_assert_eq!(written, count, "range shorter than requested count");
        trace!(engine = type_name::<E>(), written, count, "fill_n");
        written
    }

    /// Appends exactly `count` draws from the default interval to `target`.
    #[inline]
    pub fn extend_n<T, C>(target: &mut C, count: usize)
    where
        T: UniformSample,
        C: Extend<T> + ?Sized,
    {
        Self::extend_n_in(target, count, T::default_low(), T::default_high());
    }

    /// Appends exactly `count` draws from `[low, high]` to `target`.
    pub fn extend_n_in<T, C>(target: &mut C, count: usize, low: T, high: T)
    where
        T: UniformSample,
        C: Extend<T> + ?Sized,
    {
        target.extend((0..count).map(|_| Self::sample_in(low, high)));
        trace!(engine = type_name::<E>(), count, "extend_n");
    }

    /// Fills `slice` with draws from `[low, high]` on the rayon pool.
    ///
    /// Each chunk is filled by whichever worker picks it up, using that
    /// worker's own engine, so the result is not reproducible even after
    /// [`Sampler::seed_with`].
    pub fn par_fill_in<T: UniformSample>(slice: &mut [T], low: T, high: T) {
        slice
            .par_chunks_mut(PAR_FILL_CHUNK)
            .for_each(|chunk| Self::fill_in(chunk.iter_mut(), low, high));
    }
}

impl<E: Engine> Clone for Sampler<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Engine> Copy for Sampler<E> {}

impl<E: Engine> Default for Sampler<E> {
    fn default() -> Self {
        Self {
            _engine: PhantomData,
        }
    }
}

impl<E: Engine> fmt::Debug for Sampler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sampler<{}>", type_name::<E>())
    }
}
