//! Core types and traits for the Contig dynamic array.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the pieces every other Contig crate builds on: the allocation strategy
//! trait and its system-backed default, the capacity growth policy, and
//! the error types. Only [`alloc`] may contain `unsafe` code, where it
//! forwards to the system allocator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod alloc;
pub mod error;
pub mod growth;

pub use alloc::{Allocator, Global};
pub use error::{AllocError, OutOfRange};
pub use growth::{grown_capacity, max_elements, needs_growth, required_capacity, GROWTH_FACTOR};
