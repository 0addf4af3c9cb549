use crate::error::Result;
use crate::population::{SamplingSpec, Variate};
use crate::random::RandomSource;
use crate::sample::Sample;

/// Endless stream of fresh samples, one per cycle.
///
/// Each call draws from the borrowed source, so cycles only share its
/// position. Take as many as the run needs.
pub struct Cycles<'s, 'p, T> {
    spec: SamplingSpec<'p, T>,
    rng: &'s mut RandomSource,
}

impl<'s, 'p, T> Cycles<'s, 'p, T> {
    /// Sampling cycles of `spec` driven by `rng`.
    pub fn new(spec: &SamplingSpec<'p, T>, rng: &'s mut RandomSource) -> Self {
        Self { spec: *spec, rng }
    }
}

impl<T: Clone + Variate> Iterator for Cycles<'_, '_, T> {
    type Item = Result<Sample<T>>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.spec.draw(self.rng))
    }
}
