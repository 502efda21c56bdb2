//! What the comparison harness reports when the array and `Vec` disagree.

use std::error::Error;
use std::fmt;

use contig_core::AllocError;

use crate::harness::Op;

/// The first step at which the array stopped matching the reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Divergence {
    /// Zero-based index of the offending operation.
    pub step: usize,
    /// The operation that exposed the mismatch.
    pub op: Op,
    pub kind: DivergenceKind,
}

/// The way in which the array disagreed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DivergenceKind {
    /// Element counts differ.
    Length { expected: usize, actual: usize },
    /// The element at `index` differs.
    Element {
        index: usize,
        expected: i32,
        actual: i32,
    },
    /// An insert or erase returned the wrong position.
    Position { expected: usize, actual: usize },
    /// `len() > capacity()`.
    CapacityBelowLength { len: usize, capacity: usize },
    /// An operation that must keep the block changed capacity.
    CapacityChanged { before: usize, after: usize },
    /// `shrink_to_fit` left spare slots.
    NotShrunk { len: usize, capacity: usize },
    /// The array refused an allocation the reference granted.
    Alloc(AllocError),
}

impl fmt::Display for DivergenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length { expected, actual } => {
                write!(f, "length {actual}, expected {expected}")
            }
            Self::Element {
                index,
                expected,
                actual,
            } => write!(f, "element {index} is {actual}, expected {expected}"),
            Self::Position { expected, actual } => {
                write!(f, "returned position {actual}, expected {expected}")
            }
            Self::CapacityBelowLength { len, capacity } => {
                write!(f, "capacity {capacity} below length {len}")
            }
            Self::CapacityChanged { before, after } => {
                write!(f, "capacity changed from {before} to {after}")
            }
            Self::NotShrunk { len, capacity } => {
                write!(f, "shrink left capacity {capacity} for length {len}")
            }
            Self::Alloc(err) => write!(f, "allocation failed: {err}"),
        }
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({:?}): {}", self.step, self.op, self.kind)
    }
}

impl Error for Divergence {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            DivergenceKind::Alloc(err) => Some(err),
            _ => None,
        }
    }
}
