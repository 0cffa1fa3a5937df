//! Criterion micro-benchmarks for the estimators.

use criterion::{criterion_group, criterion_main, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use tessera_stats::{specific_heat, variance, Bootstrap};

/// A noisy energy-like series of `n` samples.
fn series(n: usize) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    (0..n).map(|_| -4000.0 + 200.0 * rng.random::<f64>()).collect()
}

/// Benchmark: 500-resample bootstrap of the specific heat over the 1000
/// samples of a standard temperature point.
fn bench_bootstrap_specific_heat(c: &mut Criterion) {
    let energies = series(1000);
    let bootstrap = Bootstrap::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);

    c.bench_function("bootstrap_specific_heat_1k", |b| {
        b.iter(|| {
            let err = bootstrap
                .error(&energies, |e| specific_heat(e, 50, 2.27), &mut rng)
                .unwrap();
            black_box(err)
        });
    });
}

/// Benchmark: plain variance over an epidemic-length series.
fn bench_variance_10k(c: &mut Criterion) {
    let infected = series(10_000);
    c.bench_function("variance_10k", |b| {
        b.iter(|| black_box(variance(black_box(&infected)).unwrap()));
    });
}

criterion_group!(benches, bench_bootstrap_specific_heat, bench_variance_10k);
criterion_main!(benches);
