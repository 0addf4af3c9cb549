use std::fmt;
use std::ops::{Add, Sub};

/// Statistical interval with optional estimate and confidence level.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Interval<T> {
    /// Lower bound.
    pub lower: T,
    /// Upper bound.
    pub upper: T,
    /// Point estimate inside the bounds.
    pub estimate: Option<T>,
    /// Nominal coverage in `(0, 1)`.
    pub confidence: Option<f64>,
}

impl<T: PartialOrd + Copy> Interval<T> {
    /// Create asymmetric interval.
    #[inline]
    pub const fn new(lower: T, upper: T) -> Self {
        Self { lower, upper, estimate: None, confidence: None }
    }

    /// Create symmetric interval: `[estimate - error, estimate + error]`.
    #[inline]
    pub fn symmetric(estimate: T, error: T) -> Self
    where
        T: Sub<Output = T> + Add<Output = T>,
    {
        Self {
            lower: estimate - error,
            upper: estimate + error,
            estimate: Some(estimate),
            confidence: None,
        }
    }

    /// Fluent builder: attach confidence level (0.0 < level < 1.0).
    #[must_use]
    pub const fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    /// Check if value lies within `[lower, upper]` (inclusive).
    #[inline]
    pub fn contains(&self, value: &T) -> bool {
        self.lower <= *value && *value <= self.upper
    }

    /// Interval width: `upper - lower`.
    #[inline]
    pub fn width(&self) -> T
    where
        T: Sub<Output = T>,
    {
        self.upper - self.lower
    }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(est) = &self.estimate {
            write!(f, "{est:.4} ∈ [{:.4}, {:.4}]", self.lower, self.upper)?;
        } else {
            write!(f, "[{:.4}, {:.4}]", self.lower, self.upper)?;
        }
        if let Some(conf) = self.confidence {
            write!(f, " with {conf:.2}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_bounds_and_membership() {
        let ci = Interval::symmetric(0.5_f64, 0.1).confidence(0.95);
        assert!(ci.contains(&0.45));
        assert!(!ci.contains(&0.61));
        assert!((ci.width() - 0.2).abs() < 1e-12);
        assert_eq!(ci.to_string(), "0.5000 ∈ [0.4000, 0.6000] with 0.95");
    }
}
