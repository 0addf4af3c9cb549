use std::f64::consts::PI;
use std::fmt;

use crate::error::{Error, Result};
use crate::population::Family;
use crate::statistics::{EmpiricalCDF, Statistic};

/// Kolmogorov–Smirnov distance and its asymptotic p-value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KsResult {
    /// `D = supₓ |Fₙ(x) − F(x)|`.
    pub statistic: f64,
    /// Asymptotic two-sided p-value under `H₀: X ~ F`.
    pub p_value: f64,
}

impl fmt::Display for KsResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D = {:.4}, p = {:.4}", self.statistic, self.p_value)
    }
}

/// Kolmogorov–Smirnov distance between an ECDF and a theoretical CDF.
///
/// The supremum is attained at an order statistic, from the right or the
/// left of its jump:
/// ```text
/// D⁺ = maxᵢ [i/n − F(x₍ᵢ₎)]        D⁻ = maxᵢ [F(x₍ᵢ₎) − (i−1)/n]
/// ```
/// Assumes i.i.d. draws and a continuous `F` with fixed parameters.
#[derive(Debug, Clone, Copy)]
pub struct KolmogorovSmirnov<C> {
    cdf: C,
}

impl<C: Fn(f64) -> f64> KolmogorovSmirnov<C> {
    /// Test against `cdf`.
    pub fn new(cdf: C) -> Self {
        Self { cdf }
    }
}

/// Below this λ the alternating series needs too many terms.
const SMALL_LAMBDA: f64 = 1.18;

/// Kolmogorov's limiting law `Q(λ) = Pr(K > λ)` at `λ = D·√n`.
///
/// ```text
/// λ ≥ 1.18:  Q = 2·Σ_{k≥1} (−1)^{k−1} exp(−2k²λ²)
/// λ < 1.18:  Q = 1 − (√(2π)/λ)·Σ_{k≥1} exp(−(2k−1)²π²/(8λ²))
/// ```
/// Both forms are clamped to `[0, 1]`.
fn asymptotic_p_value(d: f64, n: usize) -> f64 {
    if d <= 0.0 {
        return 1.0;
    }
    if d >= 1.0 {
        return 0.0;
    }
    let lambda = d * (n as f64).sqrt();
    let p = if lambda < SMALL_LAMBDA {
        let scale = -PI * PI / (8.0 * lambda * lambda);
        let mut sum = 0.0;
        for k in 1..=20_u32 {
            let odd = f64::from(2 * k - 1);
            let term = (scale * odd * odd).exp();
            sum += term;
            if term < 1e-17 {
                break;
            }
        }
        1.0 - (2.0 * PI).sqrt() / lambda * sum
    } else {
        let scale = -2.0 * lambda * lambda;
        let mut sum = 0.0;
        let mut sign = 1.0;
        for k in 1..=100_u32 {
            let term = (scale * f64::from(k * k)).exp();
            sum += sign * term;
            if term < 1e-17 {
                break;
            }
            sign = -sign;
        }
        2.0 * sum
    };
    p.clamp(0.0, 1.0)
}

impl<C: Fn(f64) -> f64> Statistic<EmpiricalCDF<f64>, KsResult> for KolmogorovSmirnov<C> {
    fn compute(&self, ecdf: &EmpiricalCDF<f64>) -> Result<KsResult> {
        let n = ecdf.n() as f64;
        let mut d_plus: f64 = 0.0;
        let mut d_minus: f64 = 0.0;

        for (i, &x) in ecdf.points().iter().enumerate() {
            let f_x = (self.cdf)(x);
            if !(0.0..=1.0).contains(&f_x) {
                return Err(Error::invalid(format!("cdf({x}) = {f_x} is not a probability")));
            }
            d_plus = d_plus.max((i + 1) as f64 / n - f_x);
            d_minus = d_minus.max(f_x - i as f64 / n);
        }

        let statistic = d_plus.max(d_minus);
        Ok(KsResult { statistic, p_value: asymptotic_p_value(statistic, ecdf.n()) })
    }
}

/// KS distance of `ecdf` from an arbitrary theoretical CDF.
///
/// # Errors
/// [`Error::InvalidArgument`] when `cdf` returns something outside `[0, 1]`.
pub fn ks_distance(ecdf: &EmpiricalCDF<f64>, cdf: impl Fn(f64) -> f64) -> Result<KsResult> {
    KolmogorovSmirnov::new(cdf).compute(ecdf)
}

/// KS distance of `ecdf` from a parametric family.
///
/// # Errors
/// [`Error::InvalidArgument`] for invalid family parameters.
pub fn ks_against(ecdf: &EmpiricalCDF<f64>, family: &Family) -> Result<KsResult> {
    family.validate()?;
    ks_distance(ecdf, |x| family.cdf(x).unwrap_or(f64::NAN))
}
