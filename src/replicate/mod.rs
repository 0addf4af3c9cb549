//! Repeated sample-then-trial cycles.
//!
//! A [`Trial`] maps one [`Sample`] to one [`Outcome`]. [`replicate`] runs it
//! `B` times against fresh samples drawn from a single [`RandomSource`], so a
//! run is fully determined by the seed and the operations before it.
//! [`replicate_chunked`] splits the work across independent streams.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::population::{SamplingSpec, Variate};
use crate::random::RandomSource;
use crate::sample::Sample;

mod chunked;
mod cycles;
mod outcome;

pub use chunked::{chunk_sizes, replicate_chunked};
pub use cycles::Cycles;
pub use outcome::{IntoOutcome, Outcome, Replication, TrialFailure};

/// A function from one sample to one outcome.
///
/// Closures returning `f64`, `bool`, integers or `Result<_, E: Display>`
/// are trials already.
pub trait Trial<T> {
    /// Computes the outcome of one cycle.
    ///
    /// # Errors
    /// A reason string; the cycle is recorded as a [`TrialFailure`].
    fn run(&self, sample: &Sample<T>) -> Result<Outcome, String>;
}

impl<T, F, O> Trial<T> for F
where
    F: Fn(&Sample<T>) -> O,
    O: IntoOutcome,
{
    #[inline]
    fn run(&self, sample: &Sample<T>) -> Result<Outcome, String> {
        self(sample).into_outcome()
    }
}

pub(crate) fn ensure_cycles(b: usize) -> Result<()> {
    if b == 0 {
        return Err(Error::invalid("replication count B must be positive, got B=0"));
    }
    Ok(())
}

/// Runs `b` independent cycles of `trial` on samples described by `spec`.
///
/// The spec is validated before the first draw. Failed trials do not stop
/// the run; they are listed in [`Replication::failures`].
///
/// # Errors
/// [`Error::InvalidArgument`] for `b == 0`, otherwise whatever
/// [`SamplingSpec::validate`] reports.
///
/// # Examples
/// ```
/// use urna::{Family, Population, RandomSource, SamplingSpec, replicate};
///
/// let heights = Population::from(Family::normal(170.0, 8.0)?);
/// let spec = SamplingSpec::with_replacement(&heights, 25);
/// let mut rng = RandomSource::from_seed(7);
///
/// let tallest = |s: &urna::Sample<f64>| s.iter().copied().fold(f64::MIN, f64::max);
/// let rep = replicate(&tallest, &spec, 500, &mut rng)?;
/// assert_eq!(rep.cycles(), 500);
/// # Ok::<(), urna::Error>(())
/// ```
pub fn replicate<T, R>(
    trial: &R,
    spec: &SamplingSpec<'_, T>,
    b: usize,
    rng: &mut RandomSource,
) -> Result<Replication>
where
    T: Clone + Variate,
    R: Trial<T> + ?Sized,
{
    ensure_cycles(b)?;
    spec.validate()?;
    debug!(
        cycles = b,
        size = spec.size,
        rule = ?spec.rule,
        seed = rng.seed(),
        "replication started"
    );

    let mut rep = Replication::with_capacity(b);
    for sample in Cycles::new(spec, rng).take(b) {
        rep.record(trial.run(&sample?));
    }

    if rep.failure_count() > 0 {
        warn!(failed = rep.failure_count(), cycles = b, "trials failed and were excluded");
    }
    debug!(outcomes = rep.len(), "replication finished");
    Ok(rep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::{Family, Population, Urn};

    fn die() -> Population<u8> {
        Population::from(Urn::new(vec![1, 2, 3, 4, 5, 6]).unwrap())
    }

    #[test]
    fn zero_cycles_is_invalid() {
        let pop = die();
        let spec = SamplingSpec::with_replacement(&pop, 2);
        let mut rng = RandomSource::from_seed(1);
        let sum = |s: &Sample<u8>| s.iter().map(|&x| u32::from(x)).sum::<u32>();
        assert!(matches!(replicate(&sum, &spec, 0, &mut rng), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn invalid_spec_fails_before_any_cycle() {
        let pop = die();
        let spec = SamplingSpec::without_replacement(&pop, 7);
        let mut rng = RandomSource::from_seed(1);
        let before = rng.clone();
        let err = replicate(&|_: &Sample<u8>| true, &spec, 10, &mut rng).unwrap_err();
        assert_eq!(err, Error::InsufficientPopulation { requested: 7, available: 6 });
        assert_eq!(rng, before);
    }

    #[test]
    fn narrow_item_type_fails_before_any_cycle() {
        let counts: Population<u8> = Population::from(Family::poisson(300.0).unwrap());
        let spec = SamplingSpec::with_replacement(&counts, 4);
        let mut rng = RandomSource::from_seed(1);
        let before = rng.clone();
        let err = replicate(&|s: &Sample<u8>| s.len(), &spec, 10, &mut rng).unwrap_err();
        assert!(matches!(err, Error::UnsupportedDistribution(_)));
        assert_eq!(rng, before);

        let wide: Population<u16> = Population::from(Family::poisson(300.0).unwrap());
        let spec = SamplingSpec::with_replacement(&wide, 4);
        assert!(replicate(&|s: &Sample<u16>| s.len(), &spec, 10, &mut rng).is_ok());
    }

    #[test]
    fn same_seed_same_outcomes() {
        let pop = die();
        let spec = SamplingSpec::with_replacement(&pop, 3);
        let sum = |s: &Sample<u8>| s.iter().map(|&x| u32::from(x)).sum::<u32>();

        let a = replicate(&sum, &spec, 200, &mut RandomSource::from_seed(42)).unwrap();
        let b = replicate(&sum, &spec, 200, &mut RandomSource::from_seed(42)).unwrap();
        assert_eq!(a, b);
        let c = replicate(&sum, &spec, 200, &mut RandomSource::from_seed(43)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn failing_trials_are_isolated() {
        let pop = die();
        let spec = SamplingSpec::with_replacement(&pop, 1);
        let only_small = |s: &Sample<u8>| -> Result<f64, String> {
            match s.data[0] {
                x if x <= 3 => Ok(f64::from(x)),
                x => Err(format!("rolled {x}")),
            }
        };
        let rep = replicate(&only_small, &spec, 600, &mut RandomSource::from_seed(5)).unwrap();
        assert_eq!(rep.cycles(), 600);
        assert_eq!(rep.len() + rep.failure_count(), 600);
        assert!(rep.failure_count() > 0);
        assert!(rep.outcomes().iter().all(|o| o.value() <= 3.0));
    }
}
