use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use urna::*;

const CYCLES: usize = 10_000;

/// 1. MEAN / VARIANCE (scaling test with multiple sizes)
fn bench_moments(c: &mut Criterion) {
    let mut group = c.benchmark_group("moments/compute");

    for &size in &[100, 1_000, 10_000] {
        let data: Vec<f64> = (0..size).map(|i| f64::from(i % 100)).collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("mean_variance", size), &data, |b, data| {
            b.iter(|| {
                let out: Result<(f64, f64)> = (Mean, Variance::default()).compute(black_box(data));
                black_box(out)
            });
        });
    }
    group.finish();
}

/// 2. SAMPLING DISCIPLINES (52-card deck, 5-card hands)
fn bench_sampling(c: &mut Criterion) {
    let deck = Urn::new((0..52).collect::<Vec<u32>>()).expect("non-empty deck");
    let mut group = c.benchmark_group("sampling/deck");

    group.bench_function("without_replacement", |b| {
        let mut rng = RandomSource::from_seed(1);
        b.iter(|| black_box(sample_without_replacement(&deck, 5, &mut rng)));
    });
    group.bench_function("with_replacement", |b| {
        let mut rng = RandomSource::from_seed(1);
        b.iter(|| black_box(sample_with_replacement(&deck, 5, &mut rng)));
    });
    group.finish();
}

/// 3. BIRTHDAY REPLICATION (sequential vs chunked)
fn bench_birthday(c: &mut Criterion) {
    let days = Population::from(Urn::new((1..=365).collect::<Vec<u32>>()).expect("non-empty year"));
    let spec = SamplingSpec::with_replacement(&days, 23);
    let shared = |s: &Sample<u32>| s.has_duplicates();

    let mut group = c.benchmark_group("replicate/birthday");
    group.throughput(Throughput::Elements(CYCLES as u64));
    group.sample_size(20);

    group.bench_function("sequential", |b| {
        b.iter(|| {
            let mut rng = RandomSource::from_seed(23);
            black_box(replicate(&shared, &spec, CYCLES, &mut rng))
        });
    });
    for chunks in [4, 16] {
        group.bench_with_input(BenchmarkId::new("chunked", chunks), &chunks, |b, &chunks| {
            b.iter(|| black_box(replicate_chunked(&shared, &spec, CYCLES, 23, chunks)));
        });
    }
    group.finish();
}

/// 4. DENSITY ESTIMATE (512-point grid)
fn bench_density(c: &mut Criterion) {
    let mut rng = RandomSource::from_seed(7);
    let family = Family::normal(0.0, 1.0).expect("valid normal");
    let draws = sample_parametric(&family, 1_000, &mut rng).expect("valid draw");
    let kde = Density::new(Bandwidth::Silverman).expect("valid bandwidth");

    c.bench_function("density/silverman_1000", |b| {
        b.iter(|| black_box(kde.compute(black_box(&draws))));
    });
}

criterion_group!(benches, bench_moments, bench_sampling, bench_birthday, bench_density);
criterion_main!(benches);
