//! Per-thread engine registry.
//!
//! A [`ThreadContext`] maps engine types to engine instances. The
//! process-wide registry (see [`crate::registry`]) owns exactly one context
//! per thread, so every thread sees its own independently seeded engines
//! without locking. A context can also be owned directly by the caller,
//! which is handy for deterministic tests or single-threaded embedding.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::engine::{engine_from_entropy, engine_from_entropy_or_abort, Engine};
use crate::error::SamplingResult;

/// Engines owned by one thread, keyed by engine type.
///
/// Engines are created lazily on first access and seeded from the OS
/// entropy source. Repeated access to the same engine type returns the same
/// evolving instance until it is explicitly reseeded.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::Rng;
/// use sampler_core::ThreadContext;
///
/// let mut ctx = ThreadContext::new();
/// ctx.seed_with::<StdRng>(42);
/// let first: u32 = ctx.engine_mut::<StdRng>().gen();
///
/// ctx.seed_with::<StdRng>(42);
/// assert_eq!(ctx.engine_mut::<StdRng>().gen::<u32>(), first);
/// ```
#[derive(Default)]
pub struct ThreadContext {
    engines: HashMap<TypeId, Box<dyn Any>>,
}

impl ThreadContext {
    /// Creates an empty context. No engine is created until first use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of engine instances held by this context.
    #[inline]
    pub fn engine_count(&self) -> usize {
        self.engines.len()
    }

    /// Returns whether an instance of `E` has been created.
    #[inline]
    pub fn contains<E: Engine>(&self) -> bool {
        self.engines.contains_key(&TypeId::of::<E>())
    }

    /// Returns the instance of `E`, creating it from entropy on first use.
    ///
    /// # Panics
    ///
    /// Panics if the entropy source fails while creating the engine.
    pub fn engine_mut<E: Engine>(&mut self) -> &mut E {
        let slot = self.engines.entry(TypeId::of::<E>()).or_insert_with(|| {
            debug!(engine = type_name::<E>(), "creating engine from entropy");
            Box::new(engine_from_entropy_or_abort::<E>()) as Box<dyn Any>
        });
        match slot.downcast_mut::<E>() {
            Some(engine) => engine,
            None => unreachable!("engine slot keyed by TypeId holds a foreign type"),
        }
    }

    /// Reseeds the instance of `E` from fresh entropy.
    ///
    /// # Panics
    ///
    /// Panics if the entropy source fails; see [`ThreadContext::try_seed`]
    /// for the fallible form.
    pub fn seed<E: Engine>(&mut self) {
        self.install(engine_from_entropy_or_abort::<E>());
    }

    /// Reseeds the instance of `E` from fresh entropy.
    ///
    /// On failure the existing instance, if any, is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::Entropy` if the entropy source fails.
    pub fn try_seed<E: Engine>(&mut self) -> SamplingResult<()> {
        let engine = engine_from_entropy::<E>()?;
        self.install(engine);
        Ok(())
    }

    /// Reseeds the instance of `E` deterministically with `value`.
    pub fn seed_with<E: Engine>(&mut self, value: u64) {
        debug!(engine = type_name::<E>(), seed = value, "reseeding engine");
        self.install(E::seed_from_u64(value));
    }

    /// Drops every engine held by this context.
    pub fn clear(&mut self) {
        self.engines.clear();
    }

    fn install<E: Engine>(&mut self, engine: E) {
        self.engines.insert(TypeId::of::<E>(), Box::new(engine));
    }
}

impl fmt::Debug for ThreadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadContext")
            .field("engine_count", &self.engines.len())
            .finish()
    }
}
