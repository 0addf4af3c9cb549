use num_traits::{Float, FromPrimitive};

use super::{Statistic, Variance, len_as};
use crate::error::Result;

/// Standard Error of the Mean (SEM).
///
/// Computes the standard error of the sample mean:
/// ```text
/// SE = sqrt( variance / n )
/// ```
/// where `variance` is computed using the configured `Variance` estimator
/// (sample variance with Bessel's correction by default). Applied to
/// replicated outcomes this is the Monte Carlo error of the estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SEMean {
    variance: Variance,
}

impl SEMean {
    /// Creates a new `SEMean` with a custom variance estimator.
    pub fn with_variance(variance: Variance) -> Self {
        Self { variance }
    }
}

impl<D, T> Statistic<D, T> for SEMean
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> Result<T> {
        let var_est: T = self.variance.compute(data)?;
        let n = len_as::<T>(data.as_ref().len())?;

        // Clamp round-off negatives so sqrt stays real
        Ok((var_est / n).max(T::zero()).sqrt())
    }
}
