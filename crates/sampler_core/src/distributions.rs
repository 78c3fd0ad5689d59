//! Named distributions built from parameter sets.
//!
//! [`FromParams`] gives the common `rand_distr` distributions a uniform
//! constructor so that one generic entry point can build a distribution from
//! its parameters and draw from it on a thread engine. Construction failures
//! become [`SamplingError::InvalidParameters`].
//!
//! [`NamedDistribution`] is the runtime-selected counterpart used by the
//! command line, where the distribution is only known by name.

use std::fmt;
use std::str::FromStr;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::{Bernoulli, Exp, Gamma, LogNormal, Normal, Poisson};

use crate::engine::Engine;
use crate::error::{SamplingError, SamplingResult};
use crate::registry::with_engine;
use crate::uniform::bounds_valid;

/// A distribution constructible from a parameter set.
///
/// # Examples
///
/// ```rust
/// use rand_distr::Normal;
/// use sampler_core::FromParams;
///
/// assert!(Normal::<f64>::from_params((0.0, 1.0)).is_ok());
/// assert!(Normal::<f64>::from_params((0.0, f64::NAN)).is_err());
/// ```
pub trait FromParams: Sized {
    /// Parameter set accepted by the constructor.
    type Params;
    /// Type of one draw.
    type Output;
    /// Distribution name used in error messages.
    const NAME: &'static str;

    /// Builds the distribution.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::InvalidParameters` if the parameter set is
    /// rejected.
    fn from_params(params: Self::Params) -> SamplingResult<Self>;
}

fn invalid<D: FromParams, E: fmt::Display>(reason: E) -> SamplingError {
    SamplingError::InvalidParameters {
        distribution: D::NAME,
        reason: reason.to_string(),
    }
}

impl FromParams for Normal<f64> {
    /// `(mean, std_dev)`
    type Params = (f64, f64);
    type Output = f64;
    const NAME: &'static str = "normal";

    fn from_params((mean, std_dev): Self::Params) -> SamplingResult<Self> {
        Normal::new(mean, std_dev).map_err(invalid::<Self, _>)
    }
}

impl FromParams for LogNormal<f64> {
    /// `(mu, sigma)` of the underlying normal
    type Params = (f64, f64);
    type Output = f64;
    const NAME: &'static str = "lognormal";

    fn from_params((mu, sigma): Self::Params) -> SamplingResult<Self> {
        LogNormal::new(mu, sigma).map_err(invalid::<Self, _>)
    }
}

impl FromParams for Poisson<f64> {
    /// `lambda`
    type Params = f64;
    type Output = f64;
    const NAME: &'static str = "poisson";

    fn from_params(lambda: Self::Params) -> SamplingResult<Self> {
        Poisson::new(lambda).map_err(invalid::<Self, _>)
    }
}

impl FromParams for Exp<f64> {
    /// `lambda`
    type Params = f64;
    type Output = f64;
    const NAME: &'static str = "exp";

    fn from_params(lambda: Self::Params) -> SamplingResult<Self> {
        Exp::new(lambda).map_err(invalid::<Self, _>)
    }
}

impl FromParams for Gamma<f64> {
    /// `(shape, scale)`
    type Params = (f64, f64);
    type Output = f64;
    const NAME: &'static str = "gamma";

    fn from_params((shape, scale): Self::Params) -> SamplingResult<Self> {
        Gamma::new(shape, scale).map_err(invalid::<Self, _>)
    }
}

impl FromParams for Bernoulli {
    /// `p`
    type Params = f64;
    type Output = bool;
    const NAME: &'static str = "bernoulli";

    fn from_params(p: Self::Params) -> SamplingResult<Self> {
        Bernoulli::new(p).map_err(invalid::<Self, _>)
    }
}

impl FromParams for Uniform<f64> {
    /// Closed interval `(low, high)`
    type Params = (f64, f64);
    type Output = f64;
    const NAME: &'static str = "uniform";

    fn from_params((low, high): Self::Params) -> SamplingResult<Self> {
        // `new_inclusive` panics on these instead of reporting them,
        // including when its scale `(high - low) / (1 - EPSILON)` overflows.
        let scale_finite = ((high - low) / (1.0 - f64::EPSILON)).is_finite();
        if !(bounds_valid(low, high) && scale_finite) {
            return Err(invalid::<Self, _>(format!("bounds [{low}, {high}]")));
        }
        Ok(Uniform::new_inclusive(low, high))
    }
}

/// Draws one value from `dist` using an explicitly supplied generator.
#[inline]
pub fn sample_from_rng<T, D, R>(dist: &D, rng: &mut R) -> T
where
    D: Distribution<T> + ?Sized,
    R: Rng + ?Sized,
{
    dist.sample(rng)
}

/// Builds `D` from `params` and draws once using an explicitly supplied
/// generator.
///
/// # Errors
///
/// Returns `SamplingError::InvalidParameters` if `params` are rejected.
pub fn sample_distribution_with<D, R>(params: D::Params, rng: &mut R) -> SamplingResult<D::Output>
where
    D: FromParams + Distribution<<D as FromParams>::Output>,
    R: Rng + ?Sized,
{
    let dist = D::from_params(params)?;
    Ok(dist.sample(rng))
}

/// Distribution selected by name at runtime.
///
/// Every variant samples as `f64`; Bernoulli draws map to `0.0`/`1.0`.
#[derive(Debug, Clone)]
pub enum NamedDistribution {
    /// Normal(mean, std_dev)
    Normal(Normal<f64>),
    /// LogNormal(mu, sigma)
    LogNormal(LogNormal<f64>),
    /// Poisson(lambda)
    Poisson(Poisson<f64>),
    /// Exp(lambda)
    Exp(Exp<f64>),
    /// Gamma(shape, scale)
    Gamma(Gamma<f64>),
    /// Bernoulli(p)
    Bernoulli(Bernoulli),
    /// Uniform on the closed interval [low, high]
    Uniform(Uniform<f64>),
}

/// Names accepted by [`NamedDistribution::from_name`].
pub const DISTRIBUTION_NAMES: [&str; 7] = [
    "normal",
    "lognormal",
    "poisson",
    "exp",
    "gamma",
    "bernoulli",
    "uniform",
];

impl NamedDistribution {
    /// Builds a distribution from its name and positional parameters.
    ///
    /// # Errors
    ///
    /// Returns `SamplingError::InvalidParameters` for an unknown name, a
    /// wrong parameter count, or a parameter set the distribution rejects.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sampler_core::NamedDistribution;
    ///
    /// let dist = NamedDistribution::from_name("normal", &[0.0, 2.0]).unwrap();
    /// assert_eq!(dist.name(), "normal");
    /// assert!(NamedDistribution::from_name("normal", &[0.0]).is_err());
    /// ```
    pub fn from_name(name: &str, params: &[f64]) -> SamplingResult<Self> {
        let dist = match name.to_lowercase().as_str() {
            "normal" | "gaussian" => {
                let [a, b] = exact::<Normal<f64>, 2>(params)?;
                Self::Normal(Normal::from_params((a, b))?)
            }
            "lognormal" => {
                let [a, b] = exact::<LogNormal<f64>, 2>(params)?;
                Self::LogNormal(LogNormal::from_params((a, b))?)
            }
            "poisson" => {
                let [lambda] = exact::<Poisson<f64>, 1>(params)?;
                Self::Poisson(Poisson::from_params(lambda)?)
            }
            "exp" | "exponential" => {
                let [lambda] = exact::<Exp<f64>, 1>(params)?;
                Self::Exp(Exp::from_params(lambda)?)
            }
            "gamma" => {
                let [a, b] = exact::<Gamma<f64>, 2>(params)?;
                Self::Gamma(Gamma::from_params((a, b))?)
            }
            "bernoulli" => {
                let [p] = exact::<Bernoulli, 1>(params)?;
                Self::Bernoulli(Bernoulli::from_params(p)?)
            }
            "uniform" => {
                let [a, b] = exact::<Uniform<f64>, 2>(params)?;
                Self::Uniform(Uniform::from_params((a, b))?)
            }
            other => {
                return Err(SamplingError::InvalidParameters {
                    distribution: "named",
                    reason: format!(
                        "unknown distribution '{}'. Supported: {}",
                        other,
                        DISTRIBUTION_NAMES.join(", ")
                    ),
                })
            }
        };
        Ok(dist)
    }

    /// Canonical name of the distribution.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal(_) => Normal::<f64>::NAME,
            Self::LogNormal(_) => LogNormal::<f64>::NAME,
            Self::Poisson(_) => Poisson::<f64>::NAME,
            Self::Exp(_) => Exp::<f64>::NAME,
            Self::Gamma(_) => Gamma::<f64>::NAME,
            Self::Bernoulli(_) => Bernoulli::NAME,
            Self::Uniform(_) => Uniform::<f64>::NAME,
        }
    }

    /// Draws one value on the calling thread's instance of engine `E`.
    pub fn sample_on<E: Engine>(&self) -> f64 {
        with_engine::<E, _>(|rng| self.sample(rng))
    }
}

impl Distribution<f64> for NamedDistribution {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Normal(d) => d.sample(rng),
            Self::LogNormal(d) => d.sample(rng),
            Self::Poisson(d) => d.sample(rng),
            Self::Exp(d) => d.sample(rng),
            Self::Gamma(d) => d.sample(rng),
            Self::Bernoulli(d) => {
                if d.sample(rng) {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Uniform(d) => d.sample(rng),
        }
    }
}

impl fmt::Display for NamedDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parses `"name:a,b"` (parameters optional for none) into a distribution.
impl FromStr for NamedDistribution {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, rest) = s.split_once(':').unwrap_or((s, ""));
        let params = rest
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| {
                p.parse::<f64>().map_err(|err| SamplingError::InvalidParameters {
                    distribution: "named",
                    reason: format!("parameter '{}': {}", p, err),
                })
            })
            .collect::<SamplingResult<Vec<f64>>>()?;
        Self::from_name(name.trim(), &params)
    }
}

fn exact<D: FromParams, const N: usize>(params: &[f64]) -> SamplingResult<[f64; N]> {
    <[f64; N]>::try_from(params).map_err(|_| {
        invalid::<D, _>(format!("expected {} parameter(s), got {}", N, params.len()))
    })
}
