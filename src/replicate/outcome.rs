use std::fmt;

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{Error, Result};
use crate::sample::Sample;
use crate::statistics::{Interval, Mean, SEMean, Statistic, Summary, summarize};

/// Scalar produced by one trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Numeric outcome, never NaN.
    Number(f64),
    /// Yes/no outcome, aggregated as 1/0.
    Flag(bool),
}

impl Outcome {
    /// Numeric value; flags map to 1.0 and 0.0.
    #[inline]
    pub fn value(&self) -> f64 {
        match *self {
            Outcome::Number(x) => x,
            Outcome::Flag(true) => 1.0,
            Outcome::Flag(false) => 0.0,
        }
    }

    /// Whether this is a [`Outcome::Flag`].
    #[inline]
    pub fn is_flag(&self) -> bool {
        matches!(self, Outcome::Flag(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Number(x) => write!(f, "{x}"),
            Outcome::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Conversion of trial return values into an [`Outcome`].
///
/// `Err` marks the cycle as failed with the given reason.
pub trait IntoOutcome {
    /// Converts, or explains why the value is not a usable outcome.
    ///
    /// # Errors
    /// A human-readable reason, recorded as a [`TrialFailure`].
    fn into_outcome(self) -> Result<Outcome, String>;
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> Result<Outcome, String> {
        match self {
            Outcome::Number(x) => x.into_outcome(),
            flag @ Outcome::Flag(_) => Ok(flag),
        }
    }
}

impl IntoOutcome for f64 {
    fn into_outcome(self) -> Result<Outcome, String> {
        if self.is_nan() {
            return Err("trial produced NaN".to_owned());
        }
        Ok(Outcome::Number(self))
    }
}

impl IntoOutcome for f32 {
    fn into_outcome(self) -> Result<Outcome, String> {
        f64::from(self).into_outcome()
    }
}

impl IntoOutcome for bool {
    fn into_outcome(self) -> Result<Outcome, String> {
        Ok(Outcome::Flag(self))
    }
}

macro_rules! count_outcome {
    ($($t:ty),*) => {
        $(
            impl IntoOutcome for $t {
                #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
                fn into_outcome(self) -> Result<Outcome, String> {
                    Ok(Outcome::Number(self as f64))
                }
            }
        )*
    };
}

count_outcome!(i32, i64, u32, u64, usize);

impl<O: IntoOutcome, E: fmt::Display> IntoOutcome for Result<O, E> {
    fn into_outcome(self) -> Result<Outcome, String> {
        self.map_err(|e| e.to_string())?.into_outcome()
    }
}

/// A cycle whose trial failed; excluded from every aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialFailure {
    /// Zero-based cycle index within the run.
    pub cycle: usize,
    /// Reason reported by the trial.
    pub reason: String,
}

/// Ordered outcomes of a replication run.
///
/// Successful outcomes are kept in cycle order; failed cycles are listed
/// separately with their index so the run stays auditable.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Replication {
    outcomes: Vec<Outcome>,
    failures: Vec<TrialFailure>,
    cycles: usize,
}

impl Replication {
    pub(crate) fn with_capacity(cycles: usize) -> Self {
        Self { outcomes: Vec::with_capacity(cycles), failures: Vec::new(), cycles: 0 }
    }

    pub(crate) fn record(&mut self, result: Result<Outcome, String>) {
        match result {
            Ok(outcome) => self.outcomes.push(outcome),
            Err(reason) => self.failures.push(TrialFailure { cycle: self.cycles, reason }),
        }
        self.cycles += 1;
    }

    /// Appends a later run, shifting its cycle indices past this one.
    pub(crate) fn extend(&mut self, later: Replication) {
        let offset = self.cycles;
        self.outcomes.extend(later.outcomes);
        self.failures.extend(
            later
                .failures
                .into_iter()
                .map(|f| TrialFailure { cycle: f.cycle + offset, reason: f.reason }),
        );
        self.cycles += later.cycles;
    }

    /// Successful outcomes in cycle order.
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Failed cycles.
    pub fn failures(&self) -> &[TrialFailure] {
        &self.failures
    }

    /// Number of failed cycles.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Number of cycles run, failed ones included.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// Number of successful outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// True when no cycle succeeded.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Outcome values, flags as 1/0, ready for any estimator.
    pub fn values(&self) -> Sample<f64> {
        self.outcomes.iter().map(Outcome::value).collect()
    }

    /// Monte Carlo estimate of the expected outcome.
    ///
    /// # Errors
    /// [`Error::EmptyInput`] when every cycle failed.
    pub fn mean(&self) -> Result<f64> {
        self.values().estimate(Mean)
    }

    /// Fraction of `true` flags.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] when some outcome is numeric,
    /// [`Error::EmptyInput`] when every cycle failed.
    pub fn proportion(&self) -> Result<f64> {
        if let Some(pos) = self.outcomes.iter().position(|o| !o.is_flag()) {
            return Err(Error::invalid(format!(
                "proportion needs yes/no outcomes, outcome {pos} is numeric"
            )));
        }
        self.mean()
    }

    /// Monte Carlo standard error of [`Replication::mean`].
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] with fewer than two outcomes.
    pub fn standard_error(&self) -> Result<f64> {
        self.values().estimate(SEMean::default())
    }

    /// Normal-approximation interval around the mean.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] unless `0 < level < 1`, or with fewer than
    /// two outcomes.
    pub fn confidence_interval(&self, level: f64) -> Result<Interval<f64>> {
        if !(level > 0.0 && level < 1.0) {
            return Err(Error::invalid(format!(
                "confidence level must lie in (0, 1), got {level}"
            )));
        }
        let values = self.values();
        let (mean, se): (f64, f64) = (Mean, SEMean::default()).compute(&values)?;
        let z = Normal::standard().inverse_cdf(0.5 + level / 2.0);
        Ok(Interval::symmetric(mean, z * se).confidence(level))
    }

    /// Summary statistics of the outcome values.
    ///
    /// # Errors
    /// [`Error::EmptyInput`] when every cycle failed.
    pub fn summary(&self) -> Result<Summary> {
        summarize(self.values().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn run(results: Vec<Result<Outcome, String>>) -> Replication {
        let mut rep = Replication::with_capacity(results.len());
        for r in results {
            rep.record(r);
        }
        rep
    }

    #[test]
    fn conversions() {
        assert_eq!(2.5_f64.into_outcome(), Ok(Outcome::Number(2.5)));
        assert_eq!(true.into_outcome(), Ok(Outcome::Flag(true)));
        assert_eq!(7_usize.into_outcome(), Ok(Outcome::Number(7.0)));
        assert!(f64::NAN.into_outcome().is_err());
        let failed: Result<f64, &str> = Err("no ace left");
        assert_eq!(failed.into_outcome(), Err("no ace left".to_owned()));
    }

    #[test]
    fn failures_are_excluded_and_counted() {
        let rep = run(vec![
            Ok(Outcome::Number(1.0)),
            Err("bad".into()),
            Ok(Outcome::Number(3.0)),
        ]);
        assert_eq!(rep.cycles(), 3);
        assert_eq!(rep.len(), 2);
        assert_eq!(rep.failure_count(), 1);
        assert_eq!(rep.failures()[0].cycle, 1);
        assert_abs_diff_eq!(rep.mean().unwrap(), 2.0);
    }

    #[test]
    fn proportion_of_flags() {
        let rep = run((0..8).map(|i| Ok(Outcome::Flag(i % 4 == 0))).collect());
        assert_abs_diff_eq!(rep.proportion().unwrap(), 0.25);

        let mixed = run(vec![Ok(Outcome::Flag(true)), Ok(Outcome::Number(2.0))]);
        assert!(mixed.proportion().is_err());
    }

    #[test]
    fn all_failed_is_empty_input() {
        let rep = run(vec![Err("x".into()), Err("y".into())]);
        assert_eq!(rep.mean(), Err(Error::EmptyInput("mean")));
        assert!(rep.summary().is_err());
    }

    #[test]
    fn extend_shifts_failure_cycles() {
        let mut first = run(vec![Ok(Outcome::Flag(true)), Ok(Outcome::Flag(false))]);
        first.extend(run(vec![Err("late".into()), Ok(Outcome::Flag(true))]));
        assert_eq!(first.cycles(), 4);
        assert_eq!(first.failures()[0].cycle, 2);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn normal_interval_covers_mean() {
        let rep = run((0..100).map(|i| Ok(Outcome::Number(f64::from(i)))).collect());
        let ci = rep.confidence_interval(0.95).unwrap();
        assert!(ci.contains(&49.5));
        let se = rep.standard_error().unwrap();
        assert_abs_diff_eq!(ci.width(), 2.0 * 1.959_963_984_540_054 * se, epsilon = 1e-6);
        assert!(rep.confidence_interval(1.0).is_err());
    }
}
