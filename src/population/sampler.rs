use tracing::trace;

use super::{Family, Population, Urn, Variate, ensure_represents};
use crate::error::{Error, Result};
use crate::random::RandomSource;
use crate::sample::Sample;

/// Sampling discipline. Deliberately has no default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Replacement {
    /// Independent draws over the full population; items may repeat.
    With,
    /// Dependent draws; each position used at most once, `k ≤ n`.
    Without,
}

fn ensure_positive(k: usize) -> Result<()> {
    if k == 0 {
        return Err(Error::invalid("sample size k must be positive, got k=0"));
    }
    Ok(())
}

/// Uniformly random k-subset of positions, in random order.
///
/// Runs a partial Fisher–Yates shuffle over a session-local index view, so
/// the urn itself is never touched. With `k == n` the result is a permutation.
///
/// # Errors
/// [`Error::InsufficientPopulation`] when `k > n`, [`Error::InvalidArgument`]
/// when `k == 0`.
pub fn sample_without_replacement<T: Clone>(
    urn: &Urn<T>,
    k: usize,
    rng: &mut RandomSource,
) -> Result<Sample<T>> {
    ensure_positive(k)?;
    let n = urn.len();
    if k > n {
        return Err(Error::InsufficientPopulation { requested: k, available: n });
    }
    trace!(k, n, "sampling without replacement");

    let mut positions: Vec<usize> = (0..n).collect();
    for i in 0..k {
        // Inclusive of i itself, critical for uniformity
        let j = i + rng.draw_index(n - i)?;
        positions.swap(i, j);
    }

    let items = urn.items();
    Ok(positions[..k].iter().map(|&p| items[p].clone()).collect())
}

/// `k` independent uniform choices over the full urn.
///
/// # Errors
/// [`Error::InvalidArgument`] when `k == 0`.
pub fn sample_with_replacement<T: Clone>(
    urn: &Urn<T>,
    k: usize,
    rng: &mut RandomSource,
) -> Result<Sample<T>> {
    ensure_positive(k)?;
    let n = urn.len();
    trace!(k, n, "sampling with replacement");

    let items = urn.items();
    let mut buffer = Vec::with_capacity(k);
    for _ in 0..k {
        buffer.push(items[rng.draw_index(n)?].clone());
    }
    Ok(Sample::new(buffer))
}

/// `k` independent draws from a parametric family.
///
/// # Errors
/// [`Error::InvalidArgument`] when `k == 0` or the parameters are invalid.
pub fn sample_parametric(family: &Family, k: usize, rng: &mut RandomSource) -> Result<Sample<f64>> {
    ensure_positive(k)?;
    family.validate()?;
    trace!(k, %family, "sampling parametric family");
    (0..k).map(|_| family.draw(rng)).collect()
}

/// Population, sample size and rule of one sampling step.
///
/// Validated once up front so a replication fails before its first cycle.
#[derive(Debug)]
pub struct SamplingSpec<'p, T> {
    /// Population sampled in every cycle.
    pub population: &'p Population<T>,
    /// Items per sample.
    pub size: usize,
    /// With or without replacement.
    pub rule: Replacement,
}

impl<T> Clone for SamplingSpec<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SamplingSpec<'_, T> {}

impl<'p, T> SamplingSpec<'p, T> {
    /// Bundles the three parts of a sampling step.
    pub fn new(population: &'p Population<T>, size: usize, rule: Replacement) -> Self {
        Self { population, size, rule }
    }

    /// Sampling with replacement from `population`.
    pub fn with_replacement(population: &'p Population<T>, size: usize) -> Self {
        Self::new(population, size, Replacement::With)
    }

    /// Sampling without replacement from `population`.
    pub fn without_replacement(population: &'p Population<T>, size: usize) -> Self {
        Self::new(population, size, Replacement::Without)
    }

    /// Checks size against the population, and the item type against a
    /// family's support, before any draw.
    ///
    /// # Errors
    /// Same conditions as the sampling functions.
    pub fn validate(&self) -> Result<()>
    where
        T: Variate,
    {
        ensure_positive(self.size)?;
        match self.population {
            Population::Finite(urn) => {
                if self.rule == Replacement::Without && self.size > urn.len() {
                    return Err(Error::InsufficientPopulation {
                        requested: self.size,
                        available: urn.len(),
                    });
                }
                Ok(())
            }
            Population::Parametric(family) => {
                family.validate()?;
                ensure_represents::<T>(family)
            }
        }
    }

    /// Draws one sample.
    ///
    /// # Errors
    /// See [`Population::sample`].
    pub fn draw(&self, rng: &mut RandomSource) -> Result<Sample<T>>
    where
        T: Clone + Variate,
    {
        self.population.sample(self.size, self.rule, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urn(n: u32) -> Urn<u32> {
        Urn::new((0..n).collect()).unwrap()
    }

    #[test]
    fn full_draw_is_permutation() {
        for seed in 0..20 {
            let mut rng = RandomSource::from_seed(seed);
            let mut s = sample_without_replacement(&urn(10), 10, &mut rng).unwrap().data;
            s.sort_unstable();
            assert_eq!(s, (0..10).collect::<Vec<_>>());
        }
    }

    #[test]
    fn without_replacement_never_repeats_positions() {
        let mut rng = RandomSource::from_seed(4);
        for _ in 0..200 {
            let s = sample_without_replacement(&urn(20), 7, &mut rng).unwrap();
            assert_eq!(s.len(), 7);
            assert!(!s.has_duplicates());
        }
    }

    #[test]
    fn six_from_five_is_insufficient() {
        let mut rng = RandomSource::from_seed(0);
        let err = sample_without_replacement(&urn(5), 6, &mut rng).unwrap_err();
        assert_eq!(err, Error::InsufficientPopulation { requested: 6, available: 5 });
        assert!(err.to_string().contains("requested k=6 exceeds population size 5"));
    }

    #[test]
    fn with_replacement_is_unconstrained() {
        let mut rng = RandomSource::from_seed(9);
        let s = sample_with_replacement(&urn(2), 50, &mut rng).unwrap();
        assert_eq!(s.len(), 50);
        assert!(s.has_duplicates());
    }

    #[test]
    fn zero_size_is_invalid() {
        let mut rng = RandomSource::from_seed(9);
        assert!(matches!(
            sample_with_replacement(&urn(2), 0, &mut rng),
            Err(Error::InvalidArgument(_))
        ));
        assert!(sample_parametric(&Family::Exponential { rate: 1.0 }, 0, &mut rng).is_err());
    }

    #[test]
    fn source_urn_is_untouched() {
        let u = urn(6);
        let before = u.clone();
        let mut rng = RandomSource::from_seed(10);
        let _ = sample_without_replacement(&u, 6, &mut rng).unwrap();
        assert_eq!(u, before);
    }

    #[test]
    fn first_position_is_uniform() {
        let mut rng = RandomSource::from_seed(21);
        let mut counts = [0usize; 4];
        for _ in 0..40_000 {
            let s = sample_without_replacement(&urn(4), 2, &mut rng).unwrap();
            counts[s.data[0] as usize] += 1;
        }
        for c in counts {
            assert!((c as f64 / 40_000.0 - 0.25).abs() < 0.015, "counts {counts:?}");
        }
    }

    #[test]
    fn spec_validates_before_drawing() {
        let pop: Population<u32> = urn(3).into();
        let spec = SamplingSpec::without_replacement(&pop, 4);
        assert!(matches!(spec.validate(), Err(Error::InsufficientPopulation { .. })));
        assert!(SamplingSpec::with_replacement(&pop, 4).validate().is_ok());
    }
}
