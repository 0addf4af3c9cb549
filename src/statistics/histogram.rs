use super::Statistic;
use crate::error::{Error, Result, ensure_no_nan};

/// Refuse bin layouts that would allocate absurd amounts of memory.
pub const MAX_BINS: usize = 10_000_000;

/// Fixed-width histogram over `[min(x), max(x)]`.
///
/// Bins are half-open, `[min + i·w, min + (i+1)·w)` for
/// `i = 0..=⌊(max − min)/w⌋`, so the maximum always falls inside the last
/// bin and the counts sum to `n`.
#[derive(Debug, Clone, Copy)]
pub struct Histogram {
    width: f64,
}

/// Ordered `(bin_start, count)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    /// Common bin width.
    pub width: f64,
    /// Bins in increasing order of start.
    pub bins: Vec<(f64, usize)>,
}

impl Bins {
    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|&(_, c)| c).sum()
    }

    /// Relative frequencies divided by width, so the bars integrate to 1.
    pub fn densities(&self) -> Vec<(f64, f64)> {
        let total = self.total() as f64;
        self.bins
            .iter()
            .map(|&(start, c)| (start, c as f64 / (total * self.width)))
            .collect()
    }
}

impl Histogram {
    /// Histogram with bins of `width`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] unless `width` is positive and finite.
    pub fn new(width: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(Error::invalid(format!(
                "bin width must be positive and finite, got {width}"
            )));
        }
        Ok(Self { width })
    }
}

impl<D> Statistic<D, Bins> for Histogram
where
    D: AsRef<[f64]>,
{
    fn compute(&self, data: &D) -> Result<Bins> {
        let x = data.as_ref();
        if x.is_empty() {
            return Err(Error::EmptyInput("histogram"));
        }
        ensure_no_nan(x, "histogram")?;
        if let Some(v) = x.iter().find(|v| v.is_infinite()) {
            return Err(Error::invalid(format!("histogram needs finite observations, got {v}")));
        }

        let (min, max) = x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let span = ((max - min) / self.width).floor();
        if span >= MAX_BINS as f64 {
            return Err(Error::invalid(format!(
                "bin width {} over range {} gives more than {MAX_BINS} bins",
                self.width,
                max - min
            )));
        }
        let n_bins = span as usize + 1;

        let mut counts = vec![0usize; n_bins];
        for &v in x {
            let idx = (((v - min) / self.width).floor() as usize).min(n_bins - 1);
            counts[idx] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, c)| (min + i as f64 * self.width, c))
            .collect();
        Ok(Bins { width: self.width, bins })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn half_open_bins() {
        let bins = Histogram::new(1.0).unwrap().compute(&[0.0, 0.5, 1.0, 1.5, 2.0]).unwrap();
        assert_eq!(bins.bins, vec![(0.0, 2), (1.0, 2), (2.0, 1)]);
        assert_eq!(bins.total(), 5);
    }

    #[test]
    fn constant_data_is_one_bin() {
        let bins = Histogram::new(0.25).unwrap().compute(&[3.0, 3.0, 3.0]).unwrap();
        assert_eq!(bins.bins, vec![(3.0, 3)]);
    }

    #[test]
    fn densities_integrate_to_one() {
        let data: Vec<f64> = (0..100).map(|i| f64::from(i) * 0.37).collect();
        let bins = Histogram::new(2.0).unwrap().compute(&data).unwrap();
        let area: f64 = bins.densities().iter().map(|&(_, d)| d * bins.width).sum();
        assert_abs_diff_eq!(area, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn invalid_inputs() {
        assert!(Histogram::new(0.0).is_err());
        assert!(Histogram::new(f64::NAN).is_err());
        let h = Histogram::new(1.0).unwrap();
        assert_eq!(h.compute(&Vec::<f64>::new()), Err(Error::EmptyInput("histogram")));
        assert!(h.compute(&[1.0, f64::INFINITY]).is_err());
        assert!(Histogram::new(1e-12).unwrap().compute(&[0.0, 1.0]).is_err());
    }
}
