//! The allocation strategy used by containers for raw storage.
//!
//! A container stores its [`Allocator`] by value and calls it only to
//! obtain or release whole blocks of element slots. The strategy never
//! sees element values and never constructs or destroys them.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::ptr::NonNull;

use log::error;

use crate::error::AllocError;

/// A strategy for obtaining and releasing raw memory blocks.
///
/// Containers never call `allocate` with a zero-sized layout; an empty
/// container owns no block at all.
pub trait Allocator {
    /// Allocate a block that fits `layout`.
    ///
    /// The returned memory is uninitialised.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::OutOfMemory`] if the request cannot be
    /// satisfied. No partial allocation is retained.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Release a block previously returned by [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by `allocate` on this allocator (or a
    /// clone of it) with the same `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<A: Allocator + ?Sized> Allocator for &A {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded contract.
        unsafe { (**self).deallocate(ptr, layout) }
    }
}

/// The system allocator.
///
/// Stateless and zero-sized, so storing it in a container costs nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

impl Allocator for Global {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        debug_assert!(layout.size() != 0, "zero-sized allocation request");
        // SAFETY: containers never request zero-sized layouts.
        let ptr = unsafe { std::alloc::alloc(layout) };
        NonNull::new(ptr).ok_or_else(|| {
            error!(
                "system allocator refused {} bytes (align {})",
                layout.size(),
                layout.align()
            );
            AllocError::OutOfMemory {
                bytes: layout.size(),
                align: layout.align(),
            }
        })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: caller guarantees `ptr` came from `allocate` with `layout`.
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}
