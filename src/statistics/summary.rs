use super::quantile::interpolate;
use super::{CDF, EmpiricalCDF, Mean, Quantile, Statistic, StdDev};
use crate::error::{Error, Result};

/// Probability levels of the quantile table.
pub const SUMMARY_LEVELS: [f64; 9] = [0.0, 0.05, 0.10, 0.25, 0.50, 0.75, 0.90, 0.95, 1.0];

/// Read-only summary of a numeric sequence.
///
/// Built on demand by [`summarize`]; nothing is cached on the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Number of observations.
    pub n: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Standard deviation with the n − 1 divisor; NaN when `n == 1`.
    pub sd: f64,
    /// `(p, Q(p))` for each of [`SUMMARY_LEVELS`].
    pub quantiles: Vec<(f64, f64)>,
    ecdf: EmpiricalCDF<f64>,
}

impl Summary {
    /// Summarizes `x`.
    ///
    /// # Errors
    /// [`Error::EmptyInput`] for a zero-length sequence,
    /// [`Error::InvalidArgument`] when it contains NaN.
    pub fn of(x: &[f64]) -> Result<Self> {
        let (mean, ecdf): (f64, EmpiricalCDF<f64>) = (Mean, CDF).compute(&x)?;
        let sd = if x.len() < 2 {
            f64::NAN
        } else {
            StdDev::default().compute(&x)?
        };
        let quantiles = SUMMARY_LEVELS
            .iter()
            .map(|&p| (p, interpolate(ecdf.points(), p)))
            .collect();

        Ok(Self { n: x.len(), mean, sd, quantiles, ecdf })
    }

    /// Smallest observation.
    pub fn min(&self) -> f64 {
        self.ecdf.min()
    }

    /// Largest observation.
    pub fn max(&self) -> f64 {
        self.ecdf.max()
    }

    /// Median (type 7).
    pub fn median(&self) -> f64 {
        interpolate(self.ecdf.points(), 0.5)
    }

    /// Fₙ(a).
    pub fn ecdf(&self, a: f64) -> f64 {
        self.ecdf.eval(a)
    }

    /// Quantile at any `p ∈ [0, 1]`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for `p` outside `[0, 1]`.
    pub fn quantile(&self, p: f64) -> Result<f64> {
        Quantile::new(p)?.compute(&self.ecdf)
    }

    /// Standard units of a single value against this sequence.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] when the sd is zero or undefined.
    pub fn standardize(&self, value: f64) -> Result<f64> {
        if !(self.sd.is_finite() && self.sd > 0.0) {
            return Err(Error::invalid(format!(
                "standard units need a positive sd, got {}",
                self.sd
            )));
        }
        Ok((value - self.mean) / self.sd)
    }

    /// Standard error of the mean, `sd/√n`.
    pub fn standard_error(&self) -> f64 {
        self.sd / (self.n as f64).sqrt()
    }

    /// Underlying ECDF.
    pub fn distribution(&self) -> &EmpiricalCDF<f64> {
        &self.ecdf
    }
}

/// Summarizes a numeric sequence; never fails for non-empty, NaN-free input.
///
/// # Errors
/// See [`Summary::of`].
pub fn summarize(x: &[f64]) -> Result<Summary> {
    Summary::of(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn empty_sequence_fails() {
        assert!(matches!(summarize(&[]), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn single_value_has_nan_sd() {
        let s = summarize(&[4.0]).unwrap();
        assert_eq!(s.n, 1);
        assert!(s.sd.is_nan());
        assert_eq!(s.median(), 4.0);
        assert!(s.standardize(4.0).is_err());
    }

    #[test]
    fn table_and_lookups() {
        let data: Vec<f64> = (1..=10).map(f64::from).collect();
        let s = summarize(&data).unwrap();
        assert_abs_diff_eq!(s.mean, 5.5);
        assert_abs_diff_eq!(s.sd, 3.027_650_354_097_491_5, epsilon = 1e-12);
        assert_eq!((s.min(), s.max()), (1.0, 10.0));
        assert_eq!(s.quantiles.len(), SUMMARY_LEVELS.len());
        assert_abs_diff_eq!(s.quantile(0.25).unwrap(), 3.25, epsilon = 1e-12);
        assert_eq!(s.ecdf(3.0), 0.3);
        assert_abs_diff_eq!(s.standardize(5.5).unwrap(), 0.0);
    }
}
