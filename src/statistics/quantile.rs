use num_traits::{Float, FromPrimitive};

use super::Statistic;
use super::EmpiricalCDF;
use crate::error::{Error, Result};

/// Sample quantile by linear interpolation between order statistics.
///
/// Uses Hyndman & Fan type 7 (R's default):
/// ```text
/// h = (n − 1)·p
/// Q(p) = x₍⌊h⌋₎ + (h − ⌊h⌋)·(x₍⌊h⌋+1₎ − x₍⌊h⌋₎)
/// ```
/// with 0-based order statistics. `Q(0)` is the minimum and `Q(1)` the
/// maximum. For distinct observations `Fₙ(Q(p))` is within `1/n` of `p`.
#[derive(Debug, Clone, Copy)]
pub struct Quantile {
    p: f64,
}

fn check_probability(p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(Error::invalid(format!("quantile probability must lie in [0, 1], got {p}")))
    }
}

impl Quantile {
    /// Creates a quantile estimator for probability `p ∈ [0, 1]`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for `p` outside `[0, 1]` or NaN.
    pub fn new(p: f64) -> Result<Self> {
        check_probability(p)?;
        Ok(Self { p })
    }

    /// Convenience constructor for median (p = 0.5).
    #[inline]
    pub fn median() -> Self {
        Self { p: 0.5 }
    }

    /// Probability level.
    #[inline]
    pub fn p(&self) -> f64 {
        self.p
    }
}

/// Type 7 interpolation over sorted, non-empty data.
pub(crate) fn interpolate<T: Float + FromPrimitive>(sorted: &[T], p: f64) -> T {
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = (h.floor() as usize).min(n - 1);
    let hi = (lo + 1).min(n - 1);
    let frac = T::from_f64(h - lo as f64).unwrap_or_else(T::zero);
    if frac.is_zero() {
        return sorted[lo];
    }
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

impl<T: Float + FromPrimitive> Statistic<EmpiricalCDF<T>, T> for Quantile {
    #[inline]
    fn compute(&self, ecdf: &EmpiricalCDF<T>) -> Result<T> {
        // ECDFs are never empty by construction
        Ok(interpolate(ecdf.points(), self.p))
    }
}

/// Quantile interval estimator (e.g., IQR, central 95% of outcomes).
///
/// Returns tuple `(Q(lower), Q(upper))` with the type 7 rule.
#[derive(Debug, Clone, Copy)]
pub struct QuantileInterval {
    lower: f64,
    upper: f64,
}

impl QuantileInterval {
    /// Creates interval estimator for `[lower, upper]` probabilities.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] unless `0 ≤ lower ≤ upper ≤ 1`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        check_probability(lower)?;
        check_probability(upper)?;
        if lower > upper {
            return Err(Error::invalid(format!(
                "quantile interval needs lower ≤ upper, got [{lower}, {upper}]"
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Central interval holding `confidence` of the mass.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for `confidence` outside `[0, 1]`.
    pub fn percentile(confidence: f64) -> Result<Self> {
        check_probability(confidence)?;
        let alpha = 1.0 - confidence;
        Self::new(alpha / 2.0, 1.0 - alpha / 2.0)
    }
}

impl<T: Float + FromPrimitive> Statistic<EmpiricalCDF<T>, (T, T)> for QuantileInterval {
    #[inline]
    fn compute(&self, ecdf: &EmpiricalCDF<T>) -> Result<(T, T)> {
        let points = ecdf.points();
        Ok((interpolate(points, self.lower), interpolate(points, self.upper)))
    }
}
