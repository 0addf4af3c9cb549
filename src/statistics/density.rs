use std::f64::consts::PI;

use super::quantile::interpolate;
use super::{Statistic, StdDev};
use crate::error::{Error, Result, ensure_no_nan};

/// Minimum number of grid points of an estimate.
pub const GRID_POINTS: usize = 512;

/// Upper bound on grid points; finer layouts are rejected.
pub const MAX_GRID_POINTS: usize = 10_000_000;

/// Grid spacing never exceeds this fraction of the bandwidth.
const STEPS_PER_BANDWIDTH: f64 = 4.0;

/// The grid extends this many bandwidths beyond the data on each side.
const CUT: f64 = 3.0;

/// Kernel bandwidth selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bandwidth {
    /// Explicit bandwidth, > 0.
    Fixed(f64),
    /// Silverman's rule of thumb, `0.9 · min(sd, IQR/1.34) · n^(−1/5)`.
    Silverman,
    /// Silverman's rule scaled by a factor (smoother above 1).
    Adjusted(f64),
}

/// Gaussian kernel density estimate on a regular grid.
///
/// The grid is refined with the bandwidth so every kernel is resolved;
/// computing fails with [`Error::InvalidArgument`] when that would take more
/// than [`MAX_GRID_POINTS`] points.
#[derive(Debug, Clone, Copy)]
pub struct Density {
    bandwidth: Bandwidth,
}

/// Grid of `(x, density)` points.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityEstimate {
    /// Bandwidth actually used.
    pub bandwidth: f64,
    /// Evenly spaced points spanning `[min − 3h, max + 3h]`, at least
    /// [`GRID_POINTS`] of them and never more than `h/4` apart.
    pub grid: Vec<(f64, f64)>,
}

impl DensityEstimate {
    /// Trapezoid sum over the grid; close to 1.
    pub fn integral(&self) -> f64 {
        self.grid
            .windows(2)
            .map(|w| 0.5 * (w[1].0 - w[0].0) * (w[0].1 + w[1].1))
            .sum()
    }
}

impl Density {
    /// Estimator with the given bandwidth rule.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] for a non-positive fixed bandwidth or factor.
    pub fn new(bandwidth: Bandwidth) -> Result<Self> {
        match bandwidth {
            Bandwidth::Fixed(h) | Bandwidth::Adjusted(h) if !(h.is_finite() && h > 0.0) => Err(
                Error::invalid(format!("bandwidth must be positive and finite, got {h}")),
            ),
            _ => Ok(Self { bandwidth }),
        }
    }

    fn silverman(x: &[f64]) -> f64 {
        let mut sorted = x.to_vec();
        sorted.sort_by(f64::total_cmp);
        let iqr = interpolate(&sorted, 0.75) - interpolate(&sorted, 0.25);
        let sd: f64 = StdDev::default().compute(&sorted).unwrap_or(0.0);

        let mut spread = sd.min(iqr / 1.34);
        // Degenerate spreads fall back like R's bw.nrd0
        if spread <= 0.0 {
            spread = sd;
        }
        if spread <= 0.0 {
            spread = sorted[0].abs();
        }
        if spread <= 0.0 {
            spread = 1.0;
        }
        0.9 * spread * (x.len() as f64).powf(-0.2)
    }
}

impl<D> Statistic<D, DensityEstimate> for Density
where
    D: AsRef<[f64]>,
{
    fn compute(&self, data: &D) -> Result<DensityEstimate> {
        let x = data.as_ref();
        if x.is_empty() {
            return Err(Error::EmptyInput("density estimate"));
        }
        ensure_no_nan(x, "density estimate")?;
        if x.iter().any(|v| v.is_infinite()) {
            return Err(Error::invalid("density estimate needs finite observations"));
        }

        let h = match self.bandwidth {
            Bandwidth::Fixed(h) => h,
            Bandwidth::Silverman => Self::silverman(x),
            Bandwidth::Adjusted(factor) => factor * Self::silverman(x),
        };

        let (min, max) = x
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let lo = min - CUT * h;
        let span = max - min + 2.0 * CUT * h;
        let needed = (span * STEPS_PER_BANDWIDTH / h).ceil() + 1.0;
        if needed > MAX_GRID_POINTS as f64 {
            return Err(Error::invalid(format!(
                "bandwidth {h} over range {span} needs over {MAX_GRID_POINTS} grid points"
            )));
        }
        let points = (needed as usize).max(GRID_POINTS);
        let step = span / (points - 1) as f64;

        let norm = (x.len() as f64 * h * (2.0 * PI).sqrt()).recip();
        let grid = (0..points)
            .map(|i| {
                let g = lo + i as f64 * step;
                let sum: f64 = x
                    .iter()
                    .map(|&xi| {
                        let z = (g - xi) / h;
                        (-0.5 * z * z).exp()
                    })
                    .sum();
                (g, sum * norm)
            })
            .collect();

        Ok(DensityEstimate { bandwidth: h, grid })
    }
}
