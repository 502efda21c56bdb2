//! Growable contiguous array with explicit storage management.
//!
//! [`DynamicArray`] is a randomly indexable sequence backed by a single
//! block from a pluggable [`Allocator`](contig_core::Allocator). The crate
//! holds the container's `unsafe` code; every block carries a
//! `// SAFETY:` comment, and raw block ownership is confined to `raw.rs`.
//!
//! # Architecture
//!
//! ```text
//! DynamicArray<T, A>
//! ├── RawBlock<T, A>   (owned slots + allocator; allocate / migrate / release)
//! ├── len              (live prefix [0, len) of the block)
//! ├── Gap              (panic-safe tail shift for positional inserts)
//! └── IntoIter<T, A>   (owning traversal; takes over the block)
//! ```
//!
//! Every size-increasing operation funnels through `reserve`, which is the
//! only path that reallocates on growth.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod array;
mod convert;
pub mod iter;
mod macros;
mod raw;

pub use array::DynamicArray;
pub use contig_core::{AllocError, Allocator, Global, OutOfRange};
pub use iter::IntoIter;
