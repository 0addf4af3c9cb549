use std::cmp::Ordering;

use num_traits::Float;

use super::Statistic;
use crate::error::{Error, Result, ensure_no_nan};

/// Empirical Cumulative Distribution Function (ECDF).
///
/// Represents the step function: Fₙ(a) = (1/n) * Σᵢ I(Xᵢ ≤ a)
///
/// Right-continuous, flat at 0 below the smallest observation and flat at 1
/// from the largest one on. Defined for every real `a`, including ±∞.
///
/// # Float Handling Policy
/// - NaN observations are **rejected** at construction
/// - Infinite observations are kept and sorted by IEEE 754 order
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalCDF<T> {
    sorted: Vec<T>,
}

impl<T: Float> EmpiricalCDF<T> {
    /// Builds the ECDF from observations.
    ///
    /// # Errors
    /// [`Error::EmptyInput`] for no data, [`Error::InvalidArgument`] for NaN.
    pub fn new(data: &[T]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::EmptyInput("ecdf"));
        }
        ensure_no_nan(data, "ecdf")?;

        let mut sorted = data.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        Ok(Self { sorted })
    }

    /// Number of observations.
    #[inline]
    pub fn n(&self) -> usize {
        self.sorted.len()
    }

    /// Sorted observations (order statistics).
    #[inline]
    pub fn points(&self) -> &[T] {
        &self.sorted
    }

    /// Smallest observation.
    #[inline]
    pub fn min(&self) -> T {
        self.sorted[0]
    }

    /// Largest observation.
    #[inline]
    pub fn max(&self) -> T {
        self.sorted[self.sorted.len() - 1]
    }

    /// Number of observations ≤ `a`.
    #[inline]
    pub fn count_leq(&self, a: T) -> usize {
        self.sorted.partition_point(|&v| v <= a)
    }

    /// Evaluates Fₙ(a).
    ///
    /// # Returns
    /// - `NaN` if `a` is NaN
    /// - Otherwise: proportion of observations ≤ `a`
    #[inline]
    pub fn eval(&self, a: T) -> f64 {
        if a.is_nan() {
            return f64::NAN;
        }
        self.count_leq(a) as f64 / self.sorted.len() as f64
    }
}

/// ECDF statistic constructor.
#[derive(Debug, Clone, Copy, Default)]
pub struct CDF;

impl<D, T> Statistic<D, EmpiricalCDF<T>> for CDF
where
    D: AsRef<[T]>,
    T: Float,
{
    #[inline]
    fn compute(&self, data: &D) -> Result<EmpiricalCDF<T>> {
        EmpiricalCDF::new(data.as_ref())
    }
}
