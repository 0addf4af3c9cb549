use num_traits::{Float, FromPrimitive};

use super::{Statistic, len_as};
use crate::error::{Error, Result, ensure_no_nan};

/// Computes the arithmetic mean using **Kahan summation** to
/// minimize floating-point error accumulation. This is critical when:
/// - Summing >10⁴ values (replicated outcomes routinely do)
/// - Values have large dynamic range
/// - High precision required for downstream statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean;

impl Mean {
    /// Kahan-compensated sum, shared with the variance pass.
    pub(crate) fn kahan_sum<T: Float>(values: impl Iterator<Item = T>) -> T {
        let mut sum = T::zero();
        let mut c = T::zero();

        for x in values {
            let y = x - c;
            let t = sum + y;
            c = (t - sum) - y;
            sum = t;
        }
        sum
    }
}

impl<D, T> Statistic<D, T> for Mean
where
    D: AsRef<[T]>,
    T: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> Result<T> {
        let slice: &[T] = data.as_ref();

        if slice.is_empty() {
            return Err(Error::EmptyInput("mean"));
        }
        ensure_no_nan(slice, "mean")?;

        let sum = Self::kahan_sum(slice.iter().copied());
        Ok(sum / len_as::<T>(slice.len())?)
    }
}
