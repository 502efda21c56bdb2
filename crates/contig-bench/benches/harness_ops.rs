//! Criterion benchmark for the randomized comparison harness.

use contig_bench::mixed_workload;
use contig_test_utils::run_random;
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: 10K mixed operations, each verified against Vec.
fn bench_mixed_session(c: &mut Criterion) {
    let config = mixed_workload(10_000, 42);

    c.bench_function("harness_mixed_10k", |b| {
        b.iter(|| {
            let report = run_random(&config).unwrap();
            std::hint::black_box(&report);
        });
    });
}

criterion_group!(benches, bench_mixed_session);
criterion_main!(benches);
