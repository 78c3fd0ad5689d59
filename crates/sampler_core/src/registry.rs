//! Process-wide registry of per-thread contexts.
//!
//! Each thread lazily receives its own [`ThreadContext`] on first access.
//! Contexts are never shared, so the registry needs no locks; the only
//! process-wide state is a pair of relaxed counters used for monitoring.
//! A thread's engines are dropped when the thread exits.

use std::any::type_name;
use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::context::ThreadContext;
use crate::engine::Engine;
use crate::error::SamplingResult;

thread_local! {
    static CONTEXT: RefCell<ThreadContext> = RefCell::new(ThreadContext::new());
}

static ENGINES_CREATED: AtomicUsize = AtomicUsize::new(0);
static RESEEDS: AtomicUsize = AtomicUsize::new(0);

/// Snapshot of the registry counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegistryStats {
    /// Engine instances created across all threads since start-up.
    pub engines_created: usize,
    /// Explicit reseeds performed across all threads since start-up.
    pub reseeds: usize,
}

/// Returns the current registry counters.
pub fn stats() -> RegistryStats {
    RegistryStats {
        engines_created: ENGINES_CREATED.load(Ordering::Relaxed),
        reseeds: RESEEDS.load(Ordering::Relaxed),
    }
}

/// Runs `f` with the calling thread's instance of engine `E`.
///
/// The engine is created from entropy on first use by this thread.
///
/// # Panics
///
/// Panics if `f` re-enters the registry on the same thread (the context is
/// already mutably borrowed), or if entropy is unavailable when the engine
/// has to be created.
///
/// # Example
///
/// ```rust
/// use rand::rngs::SmallRng;
/// use rand::Rng;
/// use sampler_core::registry::with_engine;
///
/// let roll: u8 = with_engine::<SmallRng, _>(|rng| rng.gen_range(1..=6));
/// assert!((1..=6).contains(&roll));
/// ```
pub fn with_engine<E, R>(f: impl FnOnce(&mut E) -> R) -> R
where
    E: Engine,
{
    with_context(|ctx| {
        if !ctx.contains::<E>() {
            ENGINES_CREATED.fetch_add(1, Ordering::Relaxed);
        }
        f(ctx.engine_mut::<E>())
    })
}

/// Reseeds the calling thread's instance of `E` from fresh entropy.
///
/// # Panics
///
/// Panics if the entropy source fails.
pub fn seed<E: Engine>() {
    with_context(|ctx| {
        let existed = ctx.contains::<E>();
        ctx.seed::<E>();
        note_reseed::<E>(existed);
    });
}

/// Fallible form of [`seed`].
///
/// # Errors
///
/// Returns `SamplingError::Entropy` if the entropy source fails; the
/// existing engine is left untouched.
pub fn try_seed<E: Engine>() -> SamplingResult<()> {
    with_context(|ctx| {
        let existed = ctx.contains::<E>();
        ctx.try_seed::<E>()?;
        note_reseed::<E>(existed);
        Ok(())
    })
}

/// Reseeds the calling thread's instance of `E` with `value`.
pub fn seed_with<E: Engine>(value: u64) {
    with_context(|ctx| {
        let existed = ctx.contains::<E>();
        ctx.seed_with::<E>(value);
        note_reseed::<E>(existed);
    });
}

/// Number of engines held by the calling thread.
pub fn thread_engine_count() -> usize {
    with_context(|ctx| ctx.engine_count())
}

fn with_context<R>(f: impl FnOnce(&mut ThreadContext) -> R) -> R {
    CONTEXT.with(|cell| f(&mut cell.borrow_mut()))
}

fn note_reseed<E: Engine>(existed: bool) {
    if !existed {
        ENGINES_CREATED.fetch_add(1, Ordering::Relaxed);
    }
    RESEEDS.fetch_add(1, Ordering::Relaxed);
    tracing::debug!(engine = type_name::<E>(), existed, "thread engine reseeded");
}
