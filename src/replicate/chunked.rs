#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::{debug, warn};

use super::{Cycles, Replication, Trial, ensure_cycles};
use crate::error::{Error, Result};
use crate::population::{SamplingSpec, Variate};
use crate::random::RandomSource;

/// Cycle counts of `chunks` contiguous chunks covering `b` cycles.
///
/// The first `b % chunks` chunks take one extra cycle. `chunks` larger
/// than `b` is clamped so no chunk is empty.
///
/// # Errors
/// [`Error::InvalidArgument`] when `b` or `chunks` is zero.
pub fn chunk_sizes(b: usize, chunks: usize) -> Result<Vec<usize>> {
    ensure_cycles(b)?;
    if chunks == 0 {
        return Err(Error::invalid("chunk count must be positive, got 0"));
    }
    let chunks = chunks.min(b);
    let (base, extra) = (b / chunks, b % chunks);
    Ok((0..chunks).map(|i| base + usize::from(i < extra)).collect())
}

fn run_chunk<T, R>(
    trial: &R,
    spec: &SamplingSpec<'_, T>,
    cycles: usize,
    master_seed: u64,
    index: usize,
) -> Result<Replication>
where
    T: Clone + Variate,
    R: Trial<T> + ?Sized,
{
    let mut rng = RandomSource::stream(master_seed, index);
    let mut rep = Replication::with_capacity(cycles);
    for sample in Cycles::new(spec, &mut rng).take(cycles) {
        rep.record(trial.run(&sample?));
    }
    Ok(rep)
}

/// [`replicate`](super::replicate) split into chunks with private streams.
///
/// Chunk `i` draws from [`RandomSource::stream`]`(master_seed, i)`. With the
/// `rayon` feature the chunks run on the rayon pool; either way they are
/// merged in chunk order, so the result depends only on `master_seed`,
/// `b` and `chunks`, never on scheduling.
///
/// # Errors
/// [`Error::InvalidArgument`] for `b == 0` or `chunks == 0`, otherwise
/// whatever [`SamplingSpec::validate`] reports.
pub fn replicate_chunked<T, R>(
    trial: &R,
    spec: &SamplingSpec<'_, T>,
    b: usize,
    master_seed: u64,
    chunks: usize,
) -> Result<Replication>
where
    T: Clone + Variate + Sync,
    R: Trial<T> + Sync + ?Sized,
{
    let sizes = chunk_sizes(b, chunks)?;
    spec.validate()?;
    debug!(cycles = b, chunks = sizes.len(), master_seed, "chunked replication started");

    #[cfg(feature = "rayon")]
    let parts: Vec<Replication> = sizes
        .par_iter()
        .enumerate()
        .map(|(i, &n)| run_chunk(trial, spec, n, master_seed, i))
        .collect::<Result<_>>()?;

    #[cfg(not(feature = "rayon"))]
    let parts: Vec<Replication> = sizes
        .iter()
        .enumerate()
        .map(|(i, &n)| run_chunk(trial, spec, n, master_seed, i))
        .collect::<Result<_>>()?;

    let mut rep = Replication::with_capacity(b);
    for part in parts {
        rep.extend(part);
    }

    if rep.failure_count() > 0 {
        warn!(failed = rep.failure_count(), cycles = b, "trials failed and were excluded");
    }
    debug!(outcomes = rep.len(), "chunked replication finished");
    Ok(rep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::population::{Population, Urn};
    use crate::sample::Sample;

    #[test]
    fn sizes_cover_every_cycle() {
        assert_eq!(chunk_sizes(10, 3).unwrap(), vec![4, 3, 3]);
        assert_eq!(chunk_sizes(2, 5).unwrap(), vec![1, 1]);
        assert_eq!(chunk_sizes(9, 1).unwrap(), vec![9]);
        assert!(chunk_sizes(10, 0).is_err());
        assert!(chunk_sizes(0, 2).is_err());
    }

    #[test]
    fn chunked_runs_are_reproducible() {
        let pop = Population::from(Urn::new((1..=6).collect::<Vec<u32>>()).unwrap());
        let spec = SamplingSpec::with_replacement(&pop, 2);
        let sum = |s: &Sample<u32>| s.iter().sum::<u32>();

        let a = replicate_chunked(&sum, &spec, 1_003, 99, 4).unwrap();
        let b = replicate_chunked(&sum, &spec, 1_003, 99, 4).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.cycles(), 1_003);
    }

    #[test]
    fn chunk_zero_follows_its_stream() {
        let pop = Population::from(Urn::new((0..100).collect::<Vec<u32>>()).unwrap());
        let spec = SamplingSpec::with_replacement(&pop, 1);
        let first = |s: &Sample<u32>| s.data[0];

        let chunked = replicate_chunked(&first, &spec, 10, 3, 2).unwrap();
        let mut stream = RandomSource::stream(3, 0);
        let direct = crate::replicate::replicate(&first, &spec, 5, &mut stream).unwrap();
        assert_eq!(&chunked.outcomes()[..5], direct.outcomes());
    }

    #[test]
    fn invalid_spec_is_reported_once() {
        let pop = Population::from(Urn::new(vec![1_u32, 2]).unwrap());
        let spec = SamplingSpec::without_replacement(&pop, 3);
        let err = replicate_chunked(&|_: &Sample<u32>| true, &spec, 10, 0, 2).unwrap_err();
        assert_eq!(err, Error::InsufficientPopulation { requested: 3, available: 2 });
    }
}
