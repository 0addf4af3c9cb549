use num_traits::{Float, FromPrimitive};

use super::{Mean, Statistic, len_as};
use crate::error::{Error, Result};

/// Variance with a degrees-of-freedom adjustment.
#[derive(Debug, Clone, Copy)]
pub struct Variance {
    /// Subtracted from n in the denominator.
    pub ddof: usize,
}

impl Variance {
    /// Creates a new `Variance` estimator with the given degrees of freedom adjustment.
    ///
    /// - `ddof = 0`: population variance (biased)
    /// - `ddof = 1`: sample variance (unbiased, Bessel's correction), the default
    pub fn new(ddof: usize) -> Self {
        Variance { ddof }
    }
}

impl Default for Variance {
    /// Returns a `Variance` estimator with `ddof = 1` (unbiased sample variance).
    fn default() -> Self {
        Variance { ddof: 1 }
    }
}

impl<D, T> Statistic<D, T> for Variance
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> Result<T> {
        let slice = data.as_ref();
        let mean: T = Mean.compute(data)?;

        if slice.len() <= self.ddof {
            return Err(Error::invalid(format!(
                "variance with ddof={} needs more than {} observations, got {}",
                self.ddof,
                self.ddof,
                slice.len()
            )));
        }

        // Kahan summation for squared deviations
        let sq_sum = Mean::kahan_sum(slice.iter().map(|&x| (x - mean) * (x - mean)));
        Ok(sq_sum / len_as::<T>(slice.len() - self.ddof)?)
    }
}

/// Standard deviation: square root of [`Variance`], n − 1 divisor by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDev {
    /// Underlying variance estimator.
    pub variance: Variance,
}

impl<D, T> Statistic<D, T> for StdDev
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> Result<T> {
        let variance: T = self.variance.compute(data)?;
        Ok(variance.sqrt())
    }
}
