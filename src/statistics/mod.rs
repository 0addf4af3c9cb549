//! Estimators over numeric sequences.
//!
//! Every estimator implements [`Statistic`] and reports failures through the
//! crate [`Error`](crate::Error) instead of panicking. Tuples of statistics
//! are statistics too, so several can be computed in one call.

use num_traits::FromPrimitive;

use crate::error::{Error, Result};

/// An estimator producing `T` from data `D`.
pub trait Statistic<D, T> {
    /// Computes the statistic.
    ///
    /// # Errors
    /// Estimator-specific; empty input is [`Error::EmptyInput`].
    fn compute(&self, data: &D) -> Result<T>;
}

mod cdf;
mod ci;
mod density;
mod histogram;
mod mean;
mod quantile;
mod se;
mod standard;
mod summary;
mod variance;

pub use cdf::{CDF, EmpiricalCDF};
pub use ci::Interval;
pub use density::{Bandwidth, Density, DensityEstimate, GRID_POINTS, MAX_GRID_POINTS};
pub use histogram::{Bins, Histogram, MAX_BINS};
pub use mean::Mean;
pub use quantile::{Quantile, QuantileInterval};
pub use se::SEMean;
pub use standard::StandardUnits;
pub use summary::{SUMMARY_LEVELS, Summary, summarize};
pub use variance::{StdDev, Variance};

/// Sample size as the float type of an estimator.
pub(crate) fn len_as<T: FromPrimitive>(n: usize) -> Result<T> {
    T::from_usize(n).ok_or_else(|| Error::invalid(format!("sample size {n} is not representable")))
}

impl<D, T1, T2, S1, S2> Statistic<D, (T1, T2)> for (S1, S2)
where
    S1: Statistic<D, T1>,
    S2: Statistic<D, T2>,
{
    #[inline]
    fn compute(&self, data: &D) -> Result<(T1, T2)> {
        Ok((self.0.compute(data)?, self.1.compute(data)?))
    }
}

impl<D, T1, T2, T3, S1, S2, S3> Statistic<D, (T1, T2, T3)> for (S1, S2, S3)
where
    S1: Statistic<D, T1>,
    S2: Statistic<D, T2>,
    S3: Statistic<D, T3>,
{
    #[inline]
    fn compute(&self, data: &D) -> Result<(T1, T2, T3)> {
        Ok((self.0.compute(data)?, self.1.compute(data)?, self.2.compute(data)?))
    }
}

impl<D, T1, T2, T3, T4, S1, S2, S3, S4> Statistic<D, (T1, T2, T3, T4)> for (S1, S2, S3, S4)
where
    S1: Statistic<D, T1>,
    S2: Statistic<D, T2>,
    S3: Statistic<D, T3>,
    S4: Statistic<D, T4>,
{
    #[inline]
    fn compute(&self, data: &D) -> Result<(T1, T2, T3, T4)> {
        Ok((
            self.0.compute(data)?,
            self.1.compute(data)?,
            self.2.compute(data)?,
            self.3.compute(data)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn tuple_computes_each_member() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let (mean, var, se): (f64, f64, f64) = (Mean, Variance::new(0), SEMean::default())
            .compute(&data)
            .unwrap();
        assert_abs_diff_eq!(mean, 5.0);
        assert_abs_diff_eq!(var, 4.0);
        assert!(se > 0.0);
    }

    #[test]
    fn tuple_propagates_first_failure() {
        let empty: Vec<f64> = Vec::new();
        let out: Result<(f64, f64)> = (Mean, Variance::default()).compute(&empty);
        assert_eq!(out, Err(Error::EmptyInput("mean")));
    }
}
