//! Test allocators, tracked elements, and the randomized comparison harness.
//!
//! - [`CountingAlloc`] and [`FailingAlloc`] observe and sabotage the raw
//!   storage traffic of a [`DynamicArray`](contig_array::DynamicArray).
//! - [`Tracker`] hands out [`Tracked`] values that count their clones and
//!   drops, and can be told to panic mid-clone.
//! - [`harness`] drives random operation sequences against both a
//!   `DynamicArray` and `std::vec::Vec`, checking they agree after every step.

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod alloc;
pub mod config;
pub mod error;
pub mod harness;
pub mod tracked;

pub use alloc::{AllocStats, CountingAlloc, FailingAlloc};
pub use config::HarnessConfig;
pub use error::{Divergence, DivergenceKind};
pub use harness::{op_strategy, run_ops, run_random, ComparisonHarness, HarnessReport, Op};
pub use tracked::{Tracked, Tracker};
