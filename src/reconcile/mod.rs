//! Comparison of simulated estimates with exact values.

mod kolmogorov;

use std::fmt;

pub use kolmogorov::{KolmogorovSmirnov, KsResult, ks_against, ks_distance};

use crate::error::{Error, Result};

/// An empirical estimate next to the exact value it should approach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agreement {
    /// Monte Carlo estimate.
    pub empirical: f64,
    /// Closed-form value.
    pub exact: f64,
    /// Largest acceptable absolute difference.
    pub tolerance: f64,
}

impl Agreement {
    /// Pairs an estimate with its exact value.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for NaN values or a non-positive tolerance.
    pub fn new(empirical: f64, exact: f64, tolerance: f64) -> Result<Self> {
        if empirical.is_nan() || exact.is_nan() {
            return Err(Error::invalid("agreement needs numeric values, got NaN"));
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(Error::invalid(format!("tolerance must be positive, got {tolerance}")));
        }
        Ok(Self { empirical, exact, tolerance })
    }

    /// `|empirical − exact|`.
    pub fn difference(&self) -> f64 {
        (self.empirical - self.exact).abs()
    }

    /// Whether the difference is within tolerance.
    pub fn is_within(&self) -> bool {
        self.difference() <= self.tolerance
    }
}

impl fmt::Display for Agreement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "empirical {:.4} vs exact {:.4}: |Δ| = {:.4} {} {:.4}",
            self.empirical,
            self.exact,
            self.difference(),
            if self.is_within() { "≤" } else { ">" },
            self.tolerance
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_and_outside_tolerance() {
        let close = Agreement::new(0.51, 0.507, 0.02).unwrap();
        assert!(close.is_within());
        assert!((close.difference() - 0.003).abs() < 1e-12);

        let far = Agreement::new(0.6, 0.507, 0.02).unwrap();
        assert!(!far.is_within());
        assert!(far.to_string().contains('>'));
    }

    #[test]
    fn invalid_tolerance() {
        assert!(Agreement::new(0.5, 0.5, 0.0).is_err());
        assert!(Agreement::new(f64::NAN, 0.5, 0.1).is_err());
    }
}
