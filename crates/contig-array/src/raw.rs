//! Owned raw storage: a block of uninitialised element slots.
//!
//! [`RawBlock`] owns the memory and the allocator that produced it, and
//! nothing else. It never constructs or drops elements; the caller tracks
//! which prefix of the block is live and is responsible for dropping it
//! before the block goes away.

use std::alloc::Layout;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use contig_core::{AllocError, Allocator};

/// An owned block of `cap` slots for `T`, allocated from `A`.
///
/// `cap == 0` means no allocation exists and the pointer is dangling.
/// Zero-sized `T` never allocates, but the requested capacity is kept so
/// capacity bookkeeping behaves the same for every element type.
pub(crate) struct RawBlock<T, A: Allocator> {
    ptr: NonNull<T>,
    cap: usize,
    alloc: A,
    _owns: PhantomData<T>,
}

impl<T, A: Allocator> RawBlock<T, A> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// An empty block. Does not call the allocator.
    pub(crate) const fn new_in(alloc: A) -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            alloc,
            _owns: PhantomData,
        }
    }

    /// A block of exactly `cap` slots.
    pub(crate) fn with_capacity_in(cap: usize, alloc: A) -> Result<Self, AllocError> {
        let ptr = Self::allocate_slots(cap, &alloc)?;
        Ok(Self {
            ptr,
            cap,
            alloc,
            _owns: PhantomData,
        })
    }

    fn layout(cap: usize) -> Result<Layout, AllocError> {
        Layout::array::<T>(cap).map_err(|_| AllocError::CapacityOverflow { requested: cap })
    }

    fn allocate_slots(cap: usize, alloc: &A) -> Result<NonNull<T>, AllocError> {
        if cap == 0 || Self::IS_ZST {
            // Reject counts no real block could describe, even when nothing is allocated.
            Self::layout(cap)?;
            return Ok(NonNull::dangling());
        }
        let layout = Self::layout(cap)?;
        Ok(alloc.allocate(layout)?.cast())
    }

    /// Number of slots in the block.
    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) fn allocator(&self) -> &A {
        &self.alloc
    }

    #[inline]
    pub(crate) fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Pointer to slot `index`.
    ///
    /// # Safety
    ///
    /// `index <= cap`.
    #[inline]
    pub(crate) unsafe fn slot(&mut self, index: usize) -> *mut T {
        debug_assert!(index <= self.cap);
        // SAFETY: in bounds of the block (or one past it) per caller contract.
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// Migrate the first `len` live slots into a fresh block of `new_cap`
    /// slots, then release the old block.
    ///
    /// The new block is allocated before anything is touched, so on error
    /// the old block and its contents are unchanged. Migration is a bitwise
    /// move; the originals are forgotten, not dropped. `new_cap == 0`
    /// releases the block outright.
    ///
    /// # Safety
    ///
    /// Slots `[0, len)` are live and `len <= new_cap`.
    pub(crate) unsafe fn migrate(&mut self, len: usize, new_cap: usize) -> Result<(), AllocError> {
        debug_assert!(len <= new_cap && len <= self.cap);
        let new_ptr = Self::allocate_slots(new_cap, &self.alloc)?;
        if !Self::IS_ZST && len != 0 {
            // SAFETY: both blocks hold at least `len` slots and are distinct
            // allocations, so the ranges cannot overlap.
            unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), len) };
        }
        self.release();
        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    /// Return the block to the allocator, leaving an empty block behind.
    ///
    /// Live elements are not dropped; callers drop them first.
    pub(crate) fn release(&mut self) {
        if self.cap != 0 && !Self::IS_ZST {
            if let Ok(layout) = Self::layout(self.cap) {
                // SAFETY: `ptr` came from `allocate_slots` with this exact layout.
                unsafe { self.alloc.deallocate(self.ptr.cast(), layout) };
            }
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    /// Hand the block over to a new owner, leaving `self` empty.
    pub(crate) fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let alloc = self.alloc.clone();
        mem::replace(self, Self::new_in(alloc))
    }
}

impl<T, A: Allocator> Drop for RawBlock<T, A> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contig_core::Global;

    #[test]
    fn empty_block_has_no_capacity() {
        let block = RawBlock::<u32, Global>::new_in(Global);
        assert_eq!(block.cap(), 0);
    }

    #[test]
    fn with_capacity_allocates_exactly() {
        let block = RawBlock::<u32, Global>::with_capacity_in(10, Global).unwrap();
        assert_eq!(block.cap(), 10);
    }

    #[test]
    fn migrate_preserves_prefix() {
        let mut block = RawBlock::<u64, Global>::with_capacity_in(2, Global).unwrap();
        unsafe {
            block.slot(0).write(11);
            block.slot(1).write(22);
            block.migrate(2, 8).unwrap();
            assert_eq!(block.cap(), 8);
            assert_eq!(block.slot(0).read(), 11);
            assert_eq!(block.slot(1).read(), 22);
        }
    }

    #[test]
    fn migrate_to_zero_releases() {
        let mut block = RawBlock::<u64, Global>::with_capacity_in(4, Global).unwrap();
        unsafe { block.migrate(0, 0).unwrap() };
        assert_eq!(block.cap(), 0);
    }

    #[test]
    fn oversized_capacity_is_rejected() {
        let result = RawBlock::<u64, Global>::with_capacity_in(usize::MAX, Global);
        assert!(matches!(result, Err(AllocError::CapacityOverflow { .. })));
    }

    #[test]
    fn zero_sized_block_tracks_capacity() {
        let block = RawBlock::<(), Global>::with_capacity_in(1000, Global).unwrap();
        assert_eq!(block.cap(), 1000);
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut block = RawBlock::<u8, Global>::with_capacity_in(16, Global).unwrap();
        let moved = block.take();
        assert_eq!(block.cap(), 0);
        assert_eq!(moved.cap(), 16);
    }
}
