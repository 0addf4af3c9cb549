use num_traits::{Float, FromPrimitive};

use super::{Mean, Statistic, StdDev};
use crate::error::{Error, Result};

/// Element-wise standard units: `(x − mean) / sd`, sd with the n − 1 divisor.
///
/// The result has mean 0 and standard deviation 1 up to rounding.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardUnits;

impl<D, F> Statistic<D, Vec<F>> for StandardUnits
where
    D: AsRef<[F]>,
    F: Float + FromPrimitive,
{
    fn compute(&self, data: &D) -> Result<Vec<F>> {
        let mean: F = Mean.compute(data)?;
        let sd: F = StdDev::default().compute(data)?;
        if sd.is_zero() || !sd.is_finite() {
            return Err(Error::invalid(
                "standard units are undefined for a constant sequence (sd = 0)",
            ));
        }
        Ok(data.as_ref().iter().map(|&x| (x - mean) / sd).collect())
    }
}
