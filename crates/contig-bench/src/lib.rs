//! Workload builders shared by the Contig benchmarks.
//!
//! - [`random_values`]: a deterministic element stream from a seed
//! - [`insert_positions`]: valid insertion points for a growing array
//! - [`filled`]: a [`DynamicArray`] and a `Vec` holding the same values
//! - [`mixed_workload`]: harness config for the mixed-operation benchmark

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use contig_array::DynamicArray;
use contig_test_utils::HarnessConfig;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `n` values drawn from a ChaCha8 stream seeded with `seed`.
pub fn random_values(n: usize, seed: u64) -> Vec<i32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.random()).collect()
}

/// `n` insertion points, the `i`-th valid for an array of `i` elements.
pub fn insert_positions(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|len| rng.random_range(0..=len)).collect()
}

/// An exactly-sized array and `Vec` with the same `n` random values.
pub fn filled(n: usize, seed: u64) -> (DynamicArray<i32>, Vec<i32>) {
    let values = random_values(n, seed);
    (DynamicArray::from(values.as_slice()), values)
}

/// The default harness workload, `rounds` operations long.
pub fn mixed_workload(rounds: usize, seed: u64) -> HarnessConfig {
    HarnessConfig::new(seed).with_rounds(rounds)
}
