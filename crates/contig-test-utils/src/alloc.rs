//! Allocators that record or refuse raw storage requests.
//!
//! Both allocators share their state through `Rc`, so a clone kept by the
//! test observes exactly what the container's copy does.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

use contig_core::{AllocError, Allocator, Global};

/// Snapshot of the traffic seen by a [`CountingAlloc`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllocStats {
    /// Successful `allocate` calls.
    pub allocations: usize,
    /// `deallocate` calls.
    pub deallocations: usize,
    /// Blocks allocated and not yet released.
    pub live_blocks: usize,
    /// Bytes in live blocks.
    pub live_bytes: usize,
}

#[derive(Debug, Default)]
struct Counters {
    allocations: Cell<usize>,
    deallocations: Cell<usize>,
    live_bytes: Cell<usize>,
}

/// Forwards to [`Global`] and counts every block.
#[derive(Clone, Debug, Default)]
pub struct CountingAlloc {
    counters: Rc<Counters>,
}

impl CountingAlloc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> AllocStats {
        let allocations = self.counters.allocations.get();
        let deallocations = self.counters.deallocations.get();
        AllocStats {
            allocations,
            deallocations,
            live_blocks: allocations - deallocations,
            live_bytes: self.counters.live_bytes.get(),
        }
    }
}

impl Allocator for CountingAlloc {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let ptr = Global.allocate(layout)?;
        let c = &self.counters;
        c.allocations.set(c.allocations.get() + 1);
        c.live_bytes.set(c.live_bytes.get() + layout.size());
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        let c = &self.counters;
        c.deallocations.set(c.deallocations.get() + 1);
        c.live_bytes.set(c.live_bytes.get() - layout.size());
        // SAFETY: forwarded contract; every block came from `Global`.
        unsafe { Global.deallocate(ptr, layout) }
    }
}

/// Grants a fixed number of allocations, then refuses with
/// [`AllocError::OutOfMemory`]. Deallocation always succeeds.
#[derive(Clone, Debug, Default)]
pub struct FailingAlloc {
    inner: CountingAlloc,
    remaining: Rc<Cell<usize>>,
}

impl FailingAlloc {
    /// An allocator that succeeds `successes` times.
    pub fn new(successes: usize) -> Self {
        Self {
            inner: CountingAlloc::new(),
            remaining: Rc::new(Cell::new(successes)),
        }
    }

    /// Reset the number of allocations still granted.
    pub fn set_budget(&self, successes: usize) {
        self.remaining.set(successes);
    }

    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }

    pub fn stats(&self) -> AllocStats {
        self.inner.stats()
    }
}

impl Allocator for FailingAlloc {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let remaining = self.remaining.get();
        if remaining == 0 {
            return Err(AllocError::OutOfMemory {
                bytes: layout.size(),
                align: layout.align(),
            });
        }
        self.remaining.set(remaining - 1);
        self.inner.allocate(layout)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded contract.
        unsafe { self.inner.deallocate(ptr, layout) }
    }
}
