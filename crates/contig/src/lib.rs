//! Contig: a growable contiguous array with an injectable allocator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Contig sub-crates. For most users, adding `contig` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use contig::prelude::*;
//!
//! let mut array: DynamicArray<i32> = dyn_array![9, 2, 3];
//! array.resize(5, 0)?;
//! assert_eq!(array, [9, 2, 3, 0, 0]);
//!
//! array.insert_n(1, 2, 8)?;
//! assert_eq!(array, [9, 8, 8, 2, 3, 0, 0]);
//!
//! array.erase_range(3..);
//! array.shrink_to_fit()?;
//! assert_eq!(array.capacity(), 3);
//! assert_eq!(array.at(5), Err(OutOfRange { index: 5, len: 3 }));
//! # Ok::<(), AllocError>(())
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`array`] | `contig-array` | `DynamicArray`, its iterators, the `dyn_array!` macro |
//! | [`types`] | `contig-core` | `Allocator`, `Global`, errors, growth policy |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The array itself (`contig-array`).
pub use contig_array as array;

/// Allocator trait, errors, and growth policy (`contig-core`).
///
/// Implement [`types::Allocator`] to supply storage from somewhere other
/// than the system heap.
pub use contig_core as types;

pub use contig_array::dyn_array;

/// Common imports for typical Contig usage.
pub mod prelude {
    pub use contig_array::{dyn_array, DynamicArray, IntoIter};
    pub use contig_core::{AllocError, Allocator, Global, OutOfRange};
}
