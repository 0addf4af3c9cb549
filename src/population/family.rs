use std::f64::consts::SQRT_2;
use std::fmt;

use statrs::distribution::{
    Bernoulli, Beta, Binomial, ChiSquared, ContinuousCDF, DiscreteCDF, Exp, Gamma, LogNormal,
    Normal, Poisson, Uniform,
};
use statrs::function::erf::erf_inv;

use crate::error::{Error, Result};
use crate::random::{LARGEST_UNIFORM, RandomSource};

/// Parametric family descriptor.
///
/// Draws are produced by inversion or accept/reject from the uniforms of a
/// [`RandomSource`], never from another generator. Fields are public for
/// pattern matching; the checked constructors and [`Family::parse`] are the
/// usual way to build one, and every sampling path calls [`Family::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Family {
    /// Normal with mean and standard deviation.
    Normal {
        /// Location.
        mean: f64,
        /// Standard deviation, > 0.
        sd: f64,
    },
    /// Continuous uniform on `[low, high)`.
    Uniform {
        /// Lower bound.
        low: f64,
        /// Upper bound, > `low`.
        high: f64,
    },
    /// Exponential with rate λ.
    Exponential {
        /// Rate, > 0.
        rate: f64,
    },
    /// Gamma with shape and rate.
    Gamma {
        /// Shape, > 0.
        shape: f64,
        /// Rate, > 0.
        rate: f64,
    },
    /// Chi-squared with `dof` degrees of freedom.
    ChiSquared {
        /// Degrees of freedom, > 0.
        dof: f64,
    },
    /// Beta on `[0, 1]`.
    Beta {
        /// First shape, > 0.
        alpha: f64,
        /// Second shape, > 0.
        beta: f64,
    },
    /// Log-normal: `exp` of a normal with `mu`, `sigma`.
    LogNormal {
        /// Log-scale location.
        mu: f64,
        /// Log-scale standard deviation, > 0.
        sigma: f64,
    },
    /// Single 0/1 trial.
    Bernoulli {
        /// Success probability in `[0, 1]`.
        p: f64,
    },
    /// Number of successes in `trials` Bernoulli trials.
    Binomial {
        /// Number of trials.
        trials: u64,
        /// Success probability in `[0, 1]`.
        p: f64,
    },
    /// Poisson counts with mean `rate`.
    Poisson {
        /// Mean, > 0.
        rate: f64,
    },
}

fn positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!("{name} must be positive and finite, got {value}")))
    }
}

fn finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(format!("{name} must be finite, got {value}")))
    }
}

fn probability(name: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid(format!("{name} must lie in [0, 1], got {value}")))
    }
}

fn law_error(e: impl fmt::Display) -> Error {
    Error::invalid(format!("theoretical law rejected parameters: {e}"))
}

impl Family {
    /// Normal(mean, sd).
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for a non-finite mean or non-positive sd.
    pub fn normal(mean: f64, sd: f64) -> Result<Self> {
        let f = Family::Normal { mean, sd };
        f.validate()?;
        Ok(f)
    }

    /// Uniform(low, high).
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] unless `low < high`, both finite.
    pub fn uniform(low: f64, high: f64) -> Result<Self> {
        let f = Family::Uniform { low, high };
        f.validate()?;
        Ok(f)
    }

    /// Exponential(rate).
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for a non-positive rate.
    pub fn exponential(rate: f64) -> Result<Self> {
        let f = Family::Exponential { rate };
        f.validate()?;
        Ok(f)
    }

    /// Gamma(shape, rate).
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for non-positive parameters.
    pub fn gamma(shape: f64, rate: f64) -> Result<Self> {
        let f = Family::Gamma { shape, rate };
        f.validate()?;
        Ok(f)
    }

    /// Binomial(trials, p).
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for `p` outside `[0, 1]`.
    pub fn binomial(trials: u64, p: f64) -> Result<Self> {
        let f = Family::Binomial { trials, p };
        f.validate()?;
        Ok(f)
    }

    /// Poisson(rate).
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for a non-positive rate.
    pub fn poisson(rate: f64) -> Result<Self> {
        let f = Family::Poisson { rate };
        f.validate()?;
        Ok(f)
    }

    /// Looks a family up by name with positional parameters.
    ///
    /// Names are case-insensitive: `normal`/`gaussian`, `uniform`,
    /// `exponential`/`exp`, `gamma`, `chisq`/`chi_squared`, `beta`,
    /// `lognormal`, `bernoulli`, `binomial`, `poisson`.
    ///
    /// ```
    /// use urna::Family;
    /// let heights = Family::parse("normal", &[69.0, 3.0]).unwrap();
    /// assert_eq!(heights, Family::Normal { mean: 69.0, sd: 3.0 });
    /// assert!(Family::parse("cauchy", &[0.0, 1.0]).is_err());
    /// ```
    ///
    /// # Errors
    /// [`Error::UnsupportedDistribution`] for an unknown name,
    /// [`Error::InvalidArgument`] for wrong arity or invalid values.
    pub fn parse(name: &str, params: &[f64]) -> Result<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let arity = |n: usize| -> Result<()> {
            if params.len() == n {
                Ok(())
            } else {
                Err(Error::invalid(format!(
                    "{lower} takes {n} parameter(s), got {}",
                    params.len()
                )))
            }
        };

        let family = match lower.as_str() {
            "normal" | "gaussian" => {
                arity(2)?;
                Family::Normal { mean: params[0], sd: params[1] }
            }
            "uniform" => {
                arity(2)?;
                Family::Uniform { low: params[0], high: params[1] }
            }
            "exponential" | "exp" => {
                arity(1)?;
                Family::Exponential { rate: params[0] }
            }
            "gamma" => {
                arity(2)?;
                Family::Gamma { shape: params[0], rate: params[1] }
            }
            "chisq" | "chi_squared" | "chisquared" => {
                arity(1)?;
                Family::ChiSquared { dof: params[0] }
            }
            "beta" => {
                arity(2)?;
                Family::Beta { alpha: params[0], beta: params[1] }
            }
            "lognormal" | "lnorm" => {
                arity(2)?;
                Family::LogNormal { mu: params[0], sigma: params[1] }
            }
            "bernoulli" => {
                arity(1)?;
                Family::Bernoulli { p: params[0] }
            }
            "binomial" => {
                arity(2)?;
                let n = params[0];
                if !(n.is_finite() && n >= 0.0 && n.fract() == 0.0) {
                    return Err(Error::invalid(format!(
                        "binomial trials must be a non-negative integer, got {n}"
                    )));
                }
                Family::Binomial { trials: n as u64, p: params[1] }
            }
            "poisson" => {
                arity(1)?;
                Family::Poisson { rate: params[0] }
            }
            _ => return Err(Error::UnsupportedDistribution(format!("unknown family '{name}'"))),
        };
        family.validate()?;
        Ok(family)
    }

    /// Checks the parameters against the family's domain.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] naming the offending parameter.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Family::Normal { mean, sd } => {
                finite("normal mean", mean)?;
                positive("normal sd", sd)
            }
            Family::Uniform { low, high } => {
                finite("uniform low", low)?;
                finite("uniform high", high)?;
                if low < high {
                    Ok(())
                } else {
                    Err(Error::invalid(format!("uniform needs low < high, got [{low}, {high})")))
                }
            }
            Family::Exponential { rate } => positive("exponential rate", rate),
            Family::Gamma { shape, rate } => {
                positive("gamma shape", shape)?;
                positive("gamma rate", rate)
            }
            Family::ChiSquared { dof } => positive("chi-squared dof", dof),
            Family::Beta { alpha, beta } => {
                positive("beta alpha", alpha)?;
                positive("beta beta", beta)
            }
            Family::LogNormal { mu, sigma } => {
                finite("lognormal mu", mu)?;
                positive("lognormal sigma", sigma)
            }
            Family::Bernoulli { p } => probability("bernoulli p", p),
            Family::Binomial { p, .. } => probability("binomial p", p),
            Family::Poisson { rate } => positive("poisson rate", rate),
        }
    }

    /// True for families with integer support.
    pub fn is_discrete(&self) -> bool {
        matches!(
            self,
            Family::Bernoulli { .. } | Family::Binomial { .. } | Family::Poisson { .. }
        )
    }

    /// Largest value a draw can take, `+∞` for unbounded continuous laws.
    ///
    /// For Poisson this is the quantile at the largest uniform the source
    /// produces, so no draw ever exceeds it.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] when the parameters are invalid.
    pub fn support_max(&self) -> Result<f64> {
        self.validate()?;
        let max = match *self {
            Family::Uniform { high, .. } => high,
            Family::Beta { .. } | Family::Bernoulli { .. } => 1.0,
            Family::Binomial { trials, .. } => trials as f64,
            Family::Poisson { rate } => {
                Poisson::new(rate).map_err(law_error)?.inverse_cdf(LARGEST_UNIFORM) as f64
            }
            Family::Normal { .. }
            | Family::Exponential { .. }
            | Family::Gamma { .. }
            | Family::ChiSquared { .. }
            | Family::LogNormal { .. } => f64::INFINITY,
        };
        Ok(max)
    }

    /// Theoretical mean.
    pub fn mean(&self) -> f64 {
        match *self {
            Family::Normal { mean, .. } => mean,
            Family::Uniform { low, high } => 0.5 * (low + high),
            Family::Exponential { rate } => rate.recip(),
            Family::Gamma { shape, rate } => shape / rate,
            Family::ChiSquared { dof } => dof,
            Family::Beta { alpha, beta } => alpha / (alpha + beta),
            Family::LogNormal { mu, sigma } => (mu + 0.5 * sigma * sigma).exp(),
            Family::Bernoulli { p } => p,
            Family::Binomial { trials, p } => trials as f64 * p,
            Family::Poisson { rate } => rate,
        }
    }

    /// Theoretical variance.
    pub fn variance(&self) -> f64 {
        match *self {
            Family::Normal { sd, .. } => sd * sd,
            Family::Uniform { low, high } => (high - low).powi(2) / 12.0,
            Family::Exponential { rate } => (rate * rate).recip(),
            Family::Gamma { shape, rate } => shape / (rate * rate),
            Family::ChiSquared { dof } => 2.0 * dof,
            Family::Beta { alpha, beta } => {
                let s = alpha + beta;
                alpha * beta / (s * s * (s + 1.0))
            }
            Family::LogNormal { mu, sigma } => {
                let s2 = sigma * sigma;
                (s2.exp() - 1.0) * (2.0 * mu + s2).exp()
            }
            Family::Bernoulli { p } => p * (1.0 - p),
            Family::Binomial { trials, p } => trials as f64 * p * (1.0 - p),
            Family::Poisson { rate } => rate,
        }
    }

    /// Theoretical CDF `Pr(X ≤ x)`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] when the parameters are invalid.
    pub fn cdf(&self, x: f64) -> Result<f64> {
        self.validate()?;
        if x.is_nan() {
            return Err(Error::invalid("cdf evaluated at NaN"));
        }
        let discrete = |x: f64| if x < 0.0 { None } else { Some(x.floor() as u64) };
        let value = match *self {
            Family::Normal { mean, sd } => Normal::new(mean, sd).map_err(law_error)?.cdf(x),
            Family::Uniform { low, high } => Uniform::new(low, high).map_err(law_error)?.cdf(x),
            Family::Exponential { rate } => Exp::new(rate).map_err(law_error)?.cdf(x),
            Family::Gamma { shape, rate } => Gamma::new(shape, rate).map_err(law_error)?.cdf(x),
            Family::ChiSquared { dof } => ChiSquared::new(dof).map_err(law_error)?.cdf(x),
            Family::Beta { alpha, beta } => Beta::new(alpha, beta).map_err(law_error)?.cdf(x),
            Family::LogNormal { mu, sigma } => LogNormal::new(mu, sigma).map_err(law_error)?.cdf(x),
            Family::Bernoulli { p } => match discrete(x) {
                None => 0.0,
                Some(k) => Bernoulli::new(p).map_err(law_error)?.cdf(k),
            },
            Family::Binomial { trials, p } => match discrete(x) {
                None => 0.0,
                Some(k) => Binomial::new(p, trials).map_err(law_error)?.cdf(k),
            },
            Family::Poisson { rate } => match discrete(x) {
                None => 0.0,
                Some(k) => Poisson::new(rate).map_err(law_error)?.cdf(k),
            },
        };
        Ok(value)
    }

    /// One draw; parameters must already be validated.
    ///
    /// Binomial and Poisson invert their CDF at one open uniform, so a draw
    /// costs a bisection over the support rather than work linear in `n` or λ.
    pub(crate) fn draw(&self, rng: &mut RandomSource) -> Result<f64> {
        let x = match *self {
            Family::Normal { mean, sd } => mean + sd * standard_normal(rng),
            Family::Uniform { low, high } => low + (high - low) * rng.draw_uniform(),
            Family::Exponential { rate } => -(1.0 - rng.draw_uniform()).ln() / rate,
            Family::Gamma { shape, rate } => standard_gamma(shape, rng) / rate,
            Family::ChiSquared { dof } => 2.0 * standard_gamma(0.5 * dof, rng),
            Family::Beta { alpha, beta } => {
                let x = standard_gamma(alpha, rng);
                let y = standard_gamma(beta, rng);
                x / (x + y)
            }
            Family::LogNormal { mu, sigma } => (mu + sigma * standard_normal(rng)).exp(),
            Family::Bernoulli { p } => bernoulli(p, rng),
            Family::Binomial { trials, p } => {
                let law = Binomial::new(p, trials).map_err(law_error)?;
                law.inverse_cdf(rng.draw_open_uniform()) as f64
            }
            Family::Poisson { rate } => {
                let law = Poisson::new(rate).map_err(law_error)?;
                law.inverse_cdf(rng.draw_open_uniform()) as f64
            }
        };
        Ok(x)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Normal { mean, sd } => write!(f, "Normal(mean={mean}, sd={sd})"),
            Family::Uniform { low, high } => write!(f, "Uniform(low={low}, high={high})"),
            Family::Exponential { rate } => write!(f, "Exponential(rate={rate})"),
            Family::Gamma { shape, rate } => write!(f, "Gamma(shape={shape}, rate={rate})"),
            Family::ChiSquared { dof } => write!(f, "ChiSquared(dof={dof})"),
            Family::Beta { alpha, beta } => write!(f, "Beta(alpha={alpha}, beta={beta})"),
            Family::LogNormal { mu, sigma } => write!(f, "LogNormal(mu={mu}, sigma={sigma})"),
            Family::Bernoulli { p } => write!(f, "Bernoulli(p={p})"),
            Family::Binomial { trials, p } => write!(f, "Binomial(n={trials}, p={p})"),
            Family::Poisson { rate } => write!(f, "Poisson(rate={rate})"),
        }
    }
}

/// Inverse normal CDF of an open uniform: Φ⁻¹(u) = √2 · erf⁻¹(2u − 1).
fn standard_normal(rng: &mut RandomSource) -> f64 {
    let u = rng.draw_open_uniform();
    SQRT_2 * erf_inv(2.0 * u - 1.0)
}

/// Marsaglia–Tsang squeeze for shape ≥ 1, boosted by `u^(1/shape)` below 1.
fn standard_gamma(shape: f64, rng: &mut RandomSource) -> f64 {
    if shape < 1.0 {
        let boost = rng.draw_open_uniform().powf(shape.recip());
        return standard_gamma(shape + 1.0, rng) * boost;
    }

    let d = shape - 1.0 / 3.0;
    let c = (9.0 * d).sqrt().recip();
    loop {
        let x = standard_normal(rng);
        let v = 1.0 + c * x;
        if v <= 0.0 {
            continue;
        }
        let v = v * v * v;
        let u = rng.draw_open_uniform();
        if u.ln() < 0.5 * x * x + d - d * v + d * v.ln() {
            return d * v;
        }
    }
}

#[inline]
fn bernoulli(p: f64, rng: &mut RandomSource) -> f64 {
    if rng.draw_uniform() < p { 1.0 } else { 0.0 }
}
