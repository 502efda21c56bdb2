//! Criterion micro-benchmarks for DynamicArray against std::vec::Vec.

use contig_array::DynamicArray;
use contig_bench::{filled, insert_positions, random_values};
use criterion::{criterion_group, criterion_main, Criterion};

const N: usize = 10_000;

/// Benchmark: 10K appends from empty, amortized growth included.
fn bench_push_back(c: &mut Criterion) {
    let values = random_values(N, 1);

    c.bench_function("array_push_back_10k", |b| {
        b.iter(|| {
            let mut array = DynamicArray::new();
            for &v in &values {
                array.push_back(v).unwrap();
            }
            std::hint::black_box(&array);
        });
    });

    c.bench_function("vec_push_10k", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for &v in &values {
                vec.push(v);
            }
            std::hint::black_box(&vec);
        });
    });
}

/// Benchmark: 2K single-element inserts at random positions.
fn bench_insert_random(c: &mut Criterion) {
    let values = random_values(2_000, 2);
    let positions = insert_positions(2_000, 3);

    c.bench_function("array_insert_random_2k", |b| {
        b.iter(|| {
            let mut array = DynamicArray::new();
            for (&pos, &v) in positions.iter().zip(&values) {
                array.insert(pos, v).unwrap();
            }
            std::hint::black_box(&array);
        });
    });

    c.bench_function("vec_insert_random_2k", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for (&pos, &v) in positions.iter().zip(&values) {
                vec.insert(pos, v);
            }
            std::hint::black_box(&vec);
        });
    });
}

/// Benchmark: insert a 64-element run into the middle of a 10K array, then
/// erase it again.
fn bench_range_insert_erase(c: &mut Criterion) {
    let run = random_values(64, 4);
    let (mut array, mut vec) = filled(N, 5);
    array.reserve(N + run.len()).unwrap();
    vec.reserve(run.len());

    c.bench_function("array_insert_erase_range_64", |b| {
        b.iter(|| {
            array.insert_slice(N / 2, &run).unwrap();
            array.erase_range(N / 2..N / 2 + run.len());
            std::hint::black_box(&array);
        });
    });

    c.bench_function("vec_splice_drain_64", |b| {
        b.iter(|| {
            vec.splice(N / 2..N / 2, run.iter().copied());
            vec.drain(N / 2..N / 2 + run.len());
            std::hint::black_box(&vec);
        });
    });
}

/// Benchmark: refill a warm block with assign_n.
fn bench_assign(c: &mut Criterion) {
    let (mut array, _) = filled(N, 6);

    c.bench_function("array_assign_n_10k", |b| {
        b.iter(|| {
            array.assign_n(N, 7).unwrap();
            std::hint::black_box(&array);
        });
    });
}

criterion_group!(
    benches,
    bench_push_back,
    bench_insert_random,
    bench_range_insert_erase,
    bench_assign
);
criterion_main!(benches);
