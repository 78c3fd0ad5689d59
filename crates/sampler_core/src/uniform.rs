//! Uniform sampling over a closed interval.
//!
//! The numeric types that can be sampled form a closed set split into two
//! kinds, each with its own default interval and draw strategy:
//!
//! | Kind | Types | Default interval | Strategy |
//! |------|-------|------------------|----------|
//! | [`NumericKind::Integral`] | `i8`..`i128`, `u8`..`u128`, `isize`, `usize` | `[0, MAX]` | inclusive integer range |
//! | [`NumericKind::FloatingPoint`] | `f32`, `f64` | `[0.0, 1.0]` | half-open range up to the successor of `high` |
//!
//! ## Inclusive upper bound for floats
//!
//! The underlying float primitive samples `[low, upper)`. To make `high`
//! itself reachable, `upper` is set to the next representable value above
//! `high`. Some generator implementations have been known to return
//! `upper` itself on very rare rounding, i.e. one representable step above
//! `high`; that widening is accepted as a tolerance and not corrected here.
//!
//! ## Preconditions
//!
//! - `low <= high`
//! - floats only: `high < MAX` and `high - low < MAX`
//!
//! These are checked with `debug_assert!` only. Use [`bounds_valid`] (or the
//! checked sampling functions) when the interval comes from untrusted input.

use std::fmt::Debug;

use num_traits::{Bounded, One, Zero};
use rand::Rng;

/// Numeric kind of a sampled type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumericKind {
    /// Signed or unsigned integer.
    Integral,
    /// IEEE 754 binary floating point.
    FloatingPoint,
}

mod private {
    pub trait Sealed {}
}

/// A numeric type that can be drawn uniformly from a closed interval.
///
/// This trait is sealed; it is implemented for the primitive integer and
/// floating-point types only.
pub trait UniformSample:
    Copy + PartialOrd + Debug + Bounded + Zero + Send + Sync + private::Sealed + 'static
{
    /// Kind of this type.
    const KIND: NumericKind;

    /// Default lower bound: `0` for every kind.
    fn default_low() -> Self {
        Self::zero()
    }

    /// Default upper bound: `MAX` for integers, `1.0` for floats.
    fn default_high() -> Self;

    /// Returns whether `[low, high]` satisfies the sampling preconditions.
    fn bounds_valid(low: Self, high: Self) -> bool;

    /// Draws one value uniformly from `[low, high]`.
    ///
    /// The caller is responsible for the preconditions; see the module
    /// documentation.
    fn draw<R: Rng + ?Sized>(rng: &mut R, low: Self, high: Self) -> Self;
}

/// Returns whether `[low, high]` is a valid sampling interval for `T`.
///
/// # Examples
///
/// ```rust
/// use sampler_core::bounds_valid;
///
/// assert!(bounds_valid(1_u8, 1_u8));
/// assert!(!bounds_valid(2_i32, 1_i32));
/// assert!(!bounds_valid(0.0_f64, f64::MAX));
/// ```
#[inline]
pub fn bounds_valid<T: UniformSample>(low: T, high: T) -> bool {
    T::bounds_valid(low, high)
}

macro_rules! impl_integral {
    ($($t:ty),* $(,)?) => {$(
        impl private::Sealed for $t {}

        impl UniformSample for $t {
            const KIND: NumericKind = NumericKind::Integral;

            #[inline]
            fn default_high() -> Self {
                <$t as Bounded>::max_value()
            }

            #[inline]
            fn bounds_valid(low: Self, high: Self) -> bool {
                low <= high
            }

            #[inline]
            fn draw<R: Rng + ?Sized>(rng: &mut R, low: Self, high: Self) -> Self {
                debug_assert!(low <= high, "inverted interval [{}, {}]", low, high);
                rng.gen_range(low..=high)
            }
        }
    )*};
}

impl_integral!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! impl_floating_point {
    ($($t:ident),* $(,)?) => {$(
        impl private::Sealed for $t {}

        impl UniformSample for $t {
            const KIND: NumericKind = NumericKind::FloatingPoint;

            #[inline]
            fn default_high() -> Self {
                <$t as One>::one()
            }

            #[inline]
            fn bounds_valid(low: Self, high: Self) -> bool {
                low.is_finite()
                    && high.is_finite()
                    && low <= high
                    && high < $t::MAX
                    && (high - low) < $t::MAX
            }

            #[inline]
            fn draw<R: Rng + ?Sized>(rng: &mut R, low: Self, high: Self) -> Self {
                debug_assert!(
                    Self::bounds_valid(low, high),
                    "invalid interval [{}, {}]",
                    low,
                    high
                );
                rng.gen_range(low..high.next_toward_max())
            }
        }
    )*};
}

impl_floating_point!(f32, f64);

/// Successor towards `MAX`, the nudge that turns `[low, upper)` into
/// `[low, high]`.
trait NextTowardMax: Sized {
    /// Next representable value above `self`. `NaN`, `MAX` and `+inf` are
    /// returned unchanged.
    fn next_toward_max(self) -> Self;
}

macro_rules! impl_next_toward_max {
    ($($t:ident),* $(,)?) => {$(
        impl NextTowardMax for $t {
            #[inline]
            fn next_toward_max(self) -> Self {
                if self.is_nan() || self >= $t::MAX {
                    return self;
                }
                if self == 0.0 {
                    // Covers -0.0 too: the successor is the smallest subnormal.
                    return $t::from_bits(1);
                }
                let bits = self.to_bits();
                if self > 0.0 {
                    $t::from_bits(bits + 1)
                } else {
                    $t::from_bits(bits - 1)
                }
            }
        }
    )*};
}

impl_next_toward_max!(f32, f64);
