//! Seeded simulation session.
//!
//! An [`Engine`] owns the [`RandomSource`] every draw of the session comes
//! from. Two engines configured with the same seed and driven through the
//! same operations produce identical outcomes.

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::exact::{birthday_probability, ordered_draw_probability};
use crate::population::{Population, Replacement, SamplingSpec, Urn, Variate};
use crate::random::RandomSource;
use crate::replicate::{self, Replication, Trial};
use crate::sample::Sample;

/// Simulation session with its own random source.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    rng: RandomSource,
}

/// Starts a session seeded with `seed` and default settings.
///
/// # Examples
/// ```
/// use urna::{Population, Replacement, Urn, configure};
///
/// let mut engine = configure(1);
/// let wheel: Population<i32> = Urn::from_counts(&[(1, 18), (-1, 20)])?.into();
/// let bets = engine.sample(&wheel, 10, Replacement::With)?;
/// assert_eq!(bets.len(), 10);
/// # Ok::<(), urna::Error>(())
/// ```
pub fn configure(seed: u64) -> Engine {
    Engine::new(Config { seed, ..Config::default() })
}

impl Engine {
    fn new(config: Config) -> Self {
        let rng = RandomSource::from_seed(config.seed());
        debug!(seed = config.seed(), "engine configured");
        Self { config, rng }
    }

    /// Session from a validated configuration.
    ///
    /// # Errors
    /// See [`Config::validate`].
    pub fn from_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Settings of the session.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Seed the current stream was started from.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Restarts the stream from `seed`; subsequent draws repeat a fresh
    /// session configured with it.
    pub fn reseed(&mut self, seed: u64) {
        debug!(seed, "engine reseeded");
        self.rng.reseed(seed);
    }

    /// Random source of the session, for the free sampling functions.
    pub fn rng(&mut self) -> &mut RandomSource {
        &mut self.rng
    }

    /// Draws `k` items from `population`.
    ///
    /// # Errors
    /// See [`Population::sample`].
    pub fn sample<T: Clone + Variate>(
        &mut self,
        population: &Population<T>,
        k: usize,
        rule: Replacement,
    ) -> Result<Sample<T>> {
        population.sample(k, rule, &mut self.rng)
    }

    /// Runs `b` cycles of `trial` on the session stream.
    ///
    /// # Errors
    /// See [`replicate::replicate`].
    pub fn replicate<T, R>(
        &mut self,
        trial: &R,
        spec: &SamplingSpec<'_, T>,
        b: usize,
    ) -> Result<Replication>
    where
        T: Clone + Variate,
        R: Trial<T> + ?Sized,
    {
        replicate::replicate(trial, spec, b, &mut self.rng)
    }

    /// Runs the configured number of cycles.
    ///
    /// # Errors
    /// See [`replicate::replicate`].
    pub fn replicate_configured<T, R>(
        &mut self,
        trial: &R,
        spec: &SamplingSpec<'_, T>,
    ) -> Result<Replication>
    where
        T: Clone + Variate,
        R: Trial<T> + ?Sized,
    {
        self.replicate(trial, spec, self.config.replications())
    }

    /// Chunked run over [`Config::chunks`] streams derived from the
    /// session seed. Independent of the session stream position.
    ///
    /// # Errors
    /// See [`replicate::replicate_chunked`].
    pub fn replicate_chunked<T, R>(
        &self,
        trial: &R,
        spec: &SamplingSpec<'_, T>,
        b: usize,
    ) -> Result<Replication>
    where
        T: Clone + Variate + Sync,
        R: Trial<T> + Sync + ?Sized,
    {
        replicate::replicate_chunked(trial, spec, b, self.rng.seed(), self.config.chunks())
    }

    /// Exact collision probability with the configured category count.
    ///
    /// # Errors
    /// See [`birthday_probability`].
    pub fn exact_birthday_probability(&self, n: usize) -> Result<f64> {
        birthday_probability(n, self.config.categories())
    }
}

/// Probability that at least two of `n` items share one of `categories`.
///
/// # Errors
/// See [`birthday_probability`].
pub fn exact_birthday_probability(n: usize, categories: usize) -> Result<f64> {
    birthday_probability(n, categories)
}

/// Probability of a sequence of events over successive draws without
/// replacement.
///
/// # Errors
/// See [`ordered_draw_probability`].
pub fn exact_conditional_probability<T>(
    urn: &Urn<T>,
    events: &[&dyn Fn(&T) -> bool],
) -> Result<f64> {
    ordered_draw_probability(urn, events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(s: &Sample<i32>) -> i32 {
        s.iter().sum()
    }

    #[test]
    fn same_seed_same_session() {
        let wheel = Population::from(Urn::from_counts(&[(1, 18), (-1, 20)]).unwrap());
        let spec = SamplingSpec::with_replacement(&wheel, 10);

        let mut a = configure(5);
        let mut b = configure(5);
        assert_eq!(
            a.sample(&wheel, 4, Replacement::Without).unwrap(),
            b.sample(&wheel, 4, Replacement::Without).unwrap()
        );
        assert_eq!(a.replicate(&sum, &spec, 300).unwrap(), b.replicate(&sum, &spec, 300).unwrap());
    }

    #[test]
    fn reseed_restarts_the_stream() {
        let wheel = Population::from(Urn::from_counts(&[(1, 18), (-1, 20)]).unwrap());
        let mut engine = configure(8);
        let first = engine.sample(&wheel, 20, Replacement::With).unwrap();
        engine.sample(&wheel, 20, Replacement::With).unwrap();
        engine.reseed(8);
        assert_eq!(engine.sample(&wheel, 20, Replacement::With).unwrap(), first);
    }

    #[test]
    fn configured_run_uses_config() {
        let config = Config::builder().seed(3).replications(250).chunks(3).build().unwrap();
        let mut engine = Engine::from_config(config).unwrap();
        let wheel = Population::from(Urn::from_counts(&[(1, 18), (-1, 20)]).unwrap());
        let spec = SamplingSpec::with_replacement(&wheel, 1);

        assert_eq!(engine.replicate_configured(&sum, &spec).unwrap().cycles(), 250);
        let chunked = engine.replicate_chunked(&sum, &spec, 90).unwrap();
        assert_eq!(chunked, replicate::replicate_chunked(&sum, &spec, 90, 3, 3).unwrap());
    }

    #[test]
    fn free_functions() {
        assert_eq!(exact_birthday_probability(366, 365).unwrap(), 1.0);
        let engine = configure(0);
        assert!((engine.exact_birthday_probability(23).unwrap() - 0.507).abs() < 1e-3);

        let urn = Urn::new(vec![1, 2, 3, 4]).unwrap();
        let even = |x: &i32| x % 2 == 0;
        let p = exact_conditional_probability(&urn, &[&even, &even]).unwrap();
        assert!((p - 1.0 / 6.0).abs() < 1e-12);
    }
}
