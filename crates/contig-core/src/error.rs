//! Error types for the Contig dynamic array.
//!
//! Two failure classes are recoverable: allocation failure during growth
//! or reallocation, and out-of-range checked access. Everything else
//! (unchecked indexing, stale pointers) is a caller obligation.

use std::error::Error;
use std::fmt;

/// Errors from raw storage allocation.
///
/// Returned by every container operation that may grow or reallocate.
/// When an operation returns `AllocError`, the container's elements,
/// length, and capacity are exactly as they were before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The requested element count cannot be described as a memory
    /// layout (it exceeds [`max_elements`](crate::growth::max_elements)).
    CapacityOverflow {
        /// Number of element slots requested.
        requested: usize,
    },
    /// The allocation strategy could not satisfy the request.
    OutOfMemory {
        /// Size of the refused request in bytes.
        bytes: usize,
        /// Alignment of the refused request in bytes.
        align: usize,
    },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} elements requested")
            }
            Self::OutOfMemory { bytes, align } => {
                write!(f, "out of memory: {bytes} bytes (align {align}) requested")
            }
        }
    }
}

impl Error for AllocError {}

/// A checked access named an index at or past the end of the live elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    /// The index that was requested.
    pub index: usize,
    /// The number of live elements at the time of the request.
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "index out of range: the len is {} but the index is {}",
            self.len, self.index
        )
    }
}

impl Error for OutOfRange {}
