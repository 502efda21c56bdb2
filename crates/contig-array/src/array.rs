//! The growable contiguous array.
//!
//! [`DynamicArray`] keeps three concerns apart:
//!
//! - **raw storage**: a `RawBlock` of `capacity()` slots, obtained from
//!   and returned to the allocator as a whole;
//! - **element lifetime**: slots `[0, len)` are live, slots
//!   `[len, capacity)` are uninitialised;
//! - **bookkeeping**: `len <= capacity` after every operation, including
//!   ones that fail or unwind.
//!
//! # Failure model
//!
//! Every operation that may allocate returns `Result<_, AllocError>`. The
//! new block is always obtained before any element is touched, so an
//! `Err` leaves elements, length, and capacity exactly as they were.
//! A panicking `Clone`, `Default`, or closure leaves the array valid with
//! every element written so far kept.
//!
//! # Invalidation
//!
//! References and slices borrow the array, so the compiler rejects any use
//! across a mutating call. Raw pointers from [`as_ptr`](DynamicArray::as_ptr)
//! carry no such protection: growth, [`shrink_to_fit`](DynamicArray::shrink_to_fit),
//! and assignment move the whole block, and insertion or erasure moves
//! every element at or after the affected index.

use std::alloc::Layout;
use std::fmt;
use std::ops::{Bound, Deref, DerefMut, Index, IndexMut, RangeBounds};
use std::ptr;
use std::slice::{self, SliceIndex};

use contig_core::growth::{grown_capacity, max_elements, needs_growth, required_capacity};
use contig_core::{AllocError, Allocator, Global, OutOfRange};

use crate::raw::RawBlock;

/// A contiguous, growable array of `T` with an injectable allocator.
///
/// ```
/// use contig_array::DynamicArray;
///
/// let mut array = DynamicArray::new();
/// array.push_back(1).unwrap();
/// array.push_back(3).unwrap();
/// array.insert(1, 2).unwrap();
/// assert_eq!(array, [1, 2, 3]);
/// ```
pub struct DynamicArray<T, A: Allocator = Global> {
    buf: RawBlock<T, A>,
    len: usize,
}

// SAFETY: the array uniquely owns its elements and its block.
unsafe impl<T: Send, A: Allocator + Send> Send for DynamicArray<T, A> {}
// SAFETY: shared access only hands out `&T` and `&A`.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for DynamicArray<T, A> {}

impl<T> DynamicArray<T> {
    /// An empty array on the system allocator. Does not allocate.
    pub const fn new() -> Self {
        Self::new_in(Global)
    }

    /// An empty array with room for exactly `capacity` elements.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocError> {
        Self::try_with_capacity_in(capacity, Global)
    }

    /// `len` default-constructed elements.
    pub fn try_with_len(len: usize) -> Result<Self, AllocError>
    where
        T: Default,
    {
        Self::try_with_len_in(len, Global)
    }

    /// `n` copies of `elem`.
    pub fn try_from_elem(elem: T, n: usize) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Self::try_from_elem_in(elem, n, Global)
    }

    /// `n` copies of `elem`, treating allocation failure as fatal.
    pub fn from_elem(elem: T, n: usize) -> Self
    where
        T: Clone,
    {
        Self::try_from_elem(elem, n).unwrap_or_else(|err| alloc_failure(err))
    }

    /// A copy of every element of `values`, in order.
    pub fn try_from_slice(values: &[T]) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Self::try_from_slice_in(values, Global)
    }

    /// Every item of an exact-size iterator, in order.
    pub fn try_from_exact_iter<I>(iter: I) -> Result<Self, AllocError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        Self::try_from_exact_iter_in(iter, Global)
    }
}

impl<T, A: Allocator> DynamicArray<T, A> {
    /// An empty array using `alloc`. Does not allocate.
    pub const fn new_in(alloc: A) -> Self {
        Self {
            buf: RawBlock::new_in(alloc),
            len: 0,
        }
    }

    /// An empty array with room for exactly `capacity` elements.
    pub fn try_with_capacity_in(capacity: usize, alloc: A) -> Result<Self, AllocError> {
        Ok(Self {
            buf: RawBlock::with_capacity_in(capacity, alloc)?,
            len: 0,
        })
    }

    /// `len` default-constructed elements; capacity is exactly `len`.
    pub fn try_with_len_in(len: usize, alloc: A) -> Result<Self, AllocError>
    where
        T: Default,
    {
        let mut array = Self::try_with_capacity_in(len, alloc)?;
        // SAFETY: capacity is exactly `len` and the array is empty.
        unsafe { array.extend_unchecked(std::iter::repeat_with(T::default), len) };
        Ok(array)
    }

    /// `n` copies of `elem`; capacity is exactly `n`.
    pub fn try_from_elem_in(elem: T, n: usize, alloc: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        let mut array = Self::try_with_capacity_in(n, alloc)?;
        // SAFETY: capacity is exactly `n` and the array is empty.
        unsafe { array.fill_unchecked(elem, n) };
        Ok(array)
    }

    /// A copy of `values`; capacity is exactly `values.len()`.
    pub fn try_from_slice_in(values: &[T], alloc: A) -> Result<Self, AllocError>
    where
        T: Clone,
    {
        Self::try_from_exact_iter_in(values.iter().cloned(), alloc)
    }

    /// Every item of `iter`. The length is read once to size the block
    /// exactly; an iterator that yields fewer items leaves spare capacity,
    /// and items past the reported length are ignored.
    pub fn try_from_exact_iter_in<I>(iter: I, alloc: A) -> Result<Self, AllocError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let count = iter.len();
        let mut array = Self::try_with_capacity_in(count, alloc)?;
        // SAFETY: capacity is exactly `count` and the array is empty.
        unsafe { array.extend_unchecked(iter, count) };
        Ok(array)
    }

    /// An independent copy with its own block, on a clone of this allocator.
    pub fn try_clone(&self) -> Result<Self, AllocError>
    where
        T: Clone,
        A: Clone,
    {
        Self::try_from_slice_in(self.as_slice(), self.buf.allocator().clone())
    }

    /// An independent copy with its own block, on `alloc`.
    pub fn try_clone_in<B: Allocator>(&self, alloc: B) -> Result<DynamicArray<T, B>, AllocError>
    where
        T: Clone,
    {
        DynamicArray::try_from_slice_in(self.as_slice(), alloc)
    }

    /// Replace the contents with a copy of `source`.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.assign_slice(source.as_slice())
    }

    /// Move the contents out in O(1), leaving `self` empty and unallocated.
    ///
    /// ```
    /// use contig_array::dyn_array;
    ///
    /// let mut source = dyn_array![1, 2, 3];
    /// let moved = source.take();
    /// assert_eq!(moved, [1, 2, 3]);
    /// assert_eq!((source.len(), source.capacity()), (0, 0));
    /// ```
    pub fn take(&mut self) -> Self
    where
        A: Clone,
    {
        let len = std::mem::take(&mut self.len);
        Self {
            buf: self.buf.take(),
            len,
        }
    }

    /// Drop every element of `self`, release its block, and take over the
    /// block of `source`, leaving `source` empty and unallocated.
    pub fn move_assign(&mut self, source: &mut Self)
    where
        A: Clone,
    {
        self.clear();
        self.buf = source.buf.take();
        self.len = std::mem::take(&mut source.len);
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of element slots in the current block.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.cap()
    }

    /// Upper bound on the element count of any array of `T`.
    #[inline]
    pub const fn max_size() -> usize {
        max_elements::<T>()
    }

    /// The allocation strategy.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.buf.allocator()
    }

    /// Checked access.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.len;
        self.as_slice().get(index).ok_or(OutOfRange { index, len })
    }

    /// Checked mutable access.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRange`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(OutOfRange { index, len })
    }

    /// The first element, if any.
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// The first element, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// The last element, if any.
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// The last element, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Pointer to the first slot, valid for reads of `len()` elements.
    ///
    /// Dangling (but non-null and aligned) when nothing is allocated.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Pointer to the first slot, valid for reads and writes of `len()` elements.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    /// The live elements.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is live and the pointer is non-null and aligned.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// The live elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: `[0, len)` is live and uniquely borrowed.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr(), self.len) }
    }

    /// Back-to-front traversal over the same elements as `iter()`.
    pub fn iter_rev(&self) -> std::iter::Rev<slice::Iter<'_, T>> {
        self.as_slice().iter().rev()
    }

    /// Ensure room for at least `n` elements in total.
    ///
    /// No-op when `n <= capacity()`. Otherwise the block grows to
    /// `max(n, 2 * capacity())` and the live elements move across.
    ///
    /// # Errors
    ///
    /// On [`AllocError`] nothing changes.
    pub fn reserve(&mut self, n: usize) -> Result<(), AllocError> {
        if n <= self.capacity() {
            return Ok(());
        }
        let new_cap = grown_capacity::<T>(self.capacity(), n)?;
        // SAFETY: `[0, len)` is live and `len <= cap < n <= new_cap`.
        unsafe { self.buf.migrate(self.len, new_cap) }
    }

    /// Room for `additional` more elements, growing only if they do not fit.
    fn grow_for(&mut self, additional: usize) -> Result<(), AllocError> {
        if !needs_growth(self.len, additional, self.capacity()) {
            return Ok(());
        }
        self.reserve(required_capacity(self.len, additional)?)
    }

    /// Reallocate to a block of exactly `len()` slots.
    ///
    /// An empty array releases its block entirely.
    ///
    /// # Errors
    ///
    /// On [`AllocError`] nothing changes.
    pub fn shrink_to_fit(&mut self) -> Result<(), AllocError> {
        if self.capacity() == self.len {
            return Ok(());
        }
        // SAFETY: `[0, len)` is live and the new block holds exactly `len`.
        unsafe { self.buf.migrate(self.len, self.len) }
    }

    /// Append `value`. Amortised O(1).
    ///
    /// # Errors
    ///
    /// On [`AllocError`] the array is unchanged and `value` is dropped.
    pub fn push_back(&mut self, value: T) -> Result<(), AllocError> {
        self.grow_for(1)?;
        // SAFETY: `grow_for(1)` left at least one spare slot.
        unsafe { self.push_unchecked(value) };
        Ok(())
    }

    /// Construct an element in place at the end and return it.
    ///
    /// `make` runs only after room has been secured.
    pub fn emplace_back<F>(&mut self, make: F) -> Result<&mut T, AllocError>
    where
        F: FnOnce() -> T,
    {
        self.grow_for(1)?;
        let index = self.len;
        // SAFETY: `grow_for(1)` left at least one spare slot.
        unsafe {
            self.push_unchecked(make());
            Ok(&mut *self.buf.slot(index))
        }
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the old `len - 1` was live and is now outside
        // the live prefix, so it is read exactly once.
        Some(unsafe { self.buf.slot(self.len).read() })
    }

    /// Insert `value` before `index`, shifting the tail right by one.
    ///
    /// Returns `index`, the position of the new element.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize, AllocError> {
        self.assert_insert_index(index);
        self.grow_for(1)?;
        // SAFETY: `index <= len < cap`; the tail moves one slot right inside
        // the block and the vacated slot is written before `len` grows.
        unsafe { self.insert_unchecked(index, value) };
        Ok(index)
    }

    /// Construct an element in place before `index` and return it.
    ///
    /// `make` runs before anything is shifted, so a panic in it leaves the
    /// array unchanged apart from possibly grown capacity.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn emplace<F>(&mut self, index: usize, make: F) -> Result<&mut T, AllocError>
    where
        F: FnOnce() -> T,
    {
        self.assert_insert_index(index);
        self.grow_for(1)?;
        let value = make();
        // SAFETY: as in `insert`.
        unsafe {
            self.insert_unchecked(index, value);
            Ok(&mut *self.buf.slot(index))
        }
    }

    /// # Safety
    ///
    /// `index <= len < capacity`.
    unsafe fn insert_unchecked(&mut self, index: usize, value: T) {
        let tail = self.len - index;
        // SAFETY: per contract, `[index, len]` are all slots of the block.
        unsafe {
            let at = self.buf.slot(index);
            if tail != 0 {
                ptr::copy(at, at.add(1), tail);
            }
            at.write(value);
        }
        self.len += 1;
    }

    /// Insert `count` copies of `value` before `index`.
    ///
    /// Returns `index`. A zero `count` touches nothing.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_n(&mut self, index: usize, count: usize, value: T) -> Result<usize, AllocError>
    where
        T: Clone,
    {
        if count == 0 {
            return Ok(index);
        }
        self.assert_insert_index(index);
        self.grow_for(count)?;
        // SAFETY: `grow_for(count)` left `count` spare slots.
        let mut gap = unsafe { Gap::open(self, index, count) };
        for _ in 1..count {
            gap.fill(value.clone());
        }
        gap.fill(value);
        Ok(index)
    }

    /// Insert a copy of every element of `values` before `index`.
    ///
    /// Returns `index`. An empty slice touches nothing.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_slice(&mut self, index: usize, values: &[T]) -> Result<usize, AllocError>
    where
        T: Clone,
    {
        self.insert_iter(index, values.iter().cloned())
    }

    /// Insert every item of an exact-size iterator before `index`.
    ///
    /// The length is read once for a single capacity check. If the iterator
    /// yields fewer items than it reported, the gap closes around what was
    /// written; extra items are ignored.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn insert_iter<I>(&mut self, index: usize, iter: I) -> Result<usize, AllocError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let count = iter.len();
        if count == 0 {
            return Ok(index);
        }
        self.assert_insert_index(index);
        self.grow_for(count)?;
        // SAFETY: `grow_for(count)` left `count` spare slots.
        let mut gap = unsafe { Gap::open(self, index, count) };
        for value in iter.take(count) {
            gap.fill(value);
        }
        Ok(index)
    }

    /// Remove the element at `index`, shifting the tail left by one.
    ///
    /// Returns `index`, which now holds the element that followed the erased
    /// one (or equals `len()` if the last element was erased).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Remove and return the element at `index`, shifting the tail left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        assert!(
            index < len,
            "removal index (is {index}) should be < len (is {len})"
        );
        // SAFETY: `index < len`; the value is read out before its slot is
        // overwritten by the tail, and `len` shrinks before it is dropped.
        unsafe {
            let at = self.buf.slot(index);
            let value = at.read();
            ptr::copy(at.add(1), at, len - index - 1);
            self.len = len - 1;
            value
        }
    }

    /// Remove every element in `range`, shifting the tail left.
    ///
    /// Returns the start of the range. An empty range touches nothing.
    ///
    /// # Panics
    ///
    /// Panics if the range is decreasing or ends past `len()`.
    pub fn erase_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = self.resolve_range(range);
        if start == end {
            return start;
        }
        let tail = self.len - end;
        // A panicking destructor leaks the tail instead of dropping it twice.
        self.len = start;
        // SAFETY: `[start, end)` was live and is dropped exactly once; the
        // tail `[end, end + tail)` moves down to `start` within the block.
        unsafe {
            let at = self.buf.slot(start);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(at, end - start));
            ptr::copy(self.buf.slot(end), at, tail);
        }
        self.len = start + tail;
        start
    }

    fn resolve_range<R: RangeBounds<usize>>(&self, range: R) -> (usize, usize) {
        let len = self.len;
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start
                .checked_add(1)
                .unwrap_or_else(|| panic!("range start overflows usize")),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end
                .checked_add(1)
                .unwrap_or_else(|| panic!("range end overflows usize")),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        };
        assert!(start <= end, "range start (is {start}) should be <= end (is {end})");
        assert!(end <= len, "range end (is {end}) should be <= len (is {len})");
        (start, end)
    }

    /// Drop every element past the first `len`. Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let excess = self.len - len;
        self.len = len;
        // SAFETY: `[len, len + excess)` was live and is now outside the live
        // prefix, so it is dropped exactly once.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.buf.slot(len), excess));
        }
    }

    /// Drop every element. The block is kept: capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resize to `new_len`, filling new slots from `make`.
    pub fn resize_with<F>(&mut self, new_len: usize, make: F) -> Result<(), AllocError>
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        let additional = new_len - self.len;
        self.grow_for(additional)?;
        // SAFETY: `grow_for` left `additional` spare slots.
        unsafe { self.extend_unchecked(std::iter::repeat_with(make), additional) };
        Ok(())
    }

    /// Resize to `new_len`, filling new slots with copies of `value`.
    ///
    /// ```
    /// use contig_array::dyn_array;
    ///
    /// let mut array = dyn_array![9, 2, 3];
    /// array.resize(5, 0).unwrap();
    /// assert_eq!(array, [9, 2, 3, 0, 0]);
    /// array.resize(1, 0).unwrap();
    /// assert_eq!(array, [9]);
    /// ```
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), AllocError>
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        let additional = new_len - self.len;
        self.grow_for(additional)?;
        // SAFETY: `grow_for` left `additional` spare slots.
        unsafe { self.fill_unchecked(value, additional) };
        Ok(())
    }

    /// Resize to `new_len`, filling new slots with `T::default()`.
    pub fn resize_default(&mut self, new_len: usize) -> Result<(), AllocError>
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Replace the contents with `n` copies of `value`.
    ///
    /// The existing block is reused when it can hold `n`. Otherwise the
    /// larger block is obtained before the old elements are dropped, so
    /// on [`AllocError`] nothing changes.
    pub fn assign_n(&mut self, n: usize, value: T) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.reserve(n)?;
        self.clear();
        // SAFETY: capacity is at least `n` and the array is empty.
        unsafe { self.fill_unchecked(value, n) };
        Ok(())
    }

    /// Replace the contents with a copy of `values`.
    pub fn assign_slice(&mut self, values: &[T]) -> Result<(), AllocError>
    where
        T: Clone,
    {
        self.assign_iter(values.iter().cloned())
    }

    /// Replace the contents with every item of an exact-size iterator.
    pub fn assign_iter<I>(&mut self, iter: I) -> Result<(), AllocError>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let count = iter.len();
        self.reserve(count)?;
        self.clear();
        // SAFETY: capacity is at least `count` and the array is empty.
        unsafe { self.extend_unchecked(iter, count) };
        Ok(())
    }

    fn assert_insert_index(&self, index: usize) {
        let len = self.len;
        assert!(
            index <= len,
            "insertion index (is {index}) should be <= len (is {len})"
        );
    }

    /// # Safety
    ///
    /// `len < capacity`.
    #[inline]
    unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        // SAFETY: the slot at `len` is inside the block and uninitialised.
        unsafe { self.buf.slot(self.len).write(value) };
        self.len += 1;
    }

    /// Append up to `count` items. `len` tracks every write, so a panicking
    /// iterator leaves the array holding what was written.
    ///
    /// # Safety
    ///
    /// `capacity - len >= count`.
    unsafe fn extend_unchecked<I: Iterator<Item = T>>(&mut self, iter: I, count: usize) {
        for value in iter.take(count) {
            // SAFETY: at most `count` writes, all within spare capacity.
            unsafe { self.push_unchecked(value) };
        }
    }

    /// Append `n` copies of `value`, cloning `n - 1` times.
    ///
    /// # Safety
    ///
    /// `capacity - len >= n`.
    unsafe fn fill_unchecked(&mut self, value: T, n: usize)
    where
        T: Clone,
    {
        if n == 0 {
            return;
        }
        for _ in 1..n {
            // SAFETY: at most `n` writes, all within spare capacity.
            unsafe { self.push_unchecked(value.clone()) };
        }
        // SAFETY: as above.
        unsafe { self.push_unchecked(value) };
    }

    pub(crate) fn into_raw_parts(self) -> (RawBlock<T, A>, usize) {
        let this = std::mem::ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the block is read out exactly once.
        let buf = unsafe { ptr::read(&this.buf) };
        (buf, this.len)
    }
}

/// A run of uninitialised slots opened inside the live prefix by shifting
/// the tail right. Dropping it closes whatever part was not filled and
/// restores `len`, so a short iterator or a panic mid-fill leaves the array
/// contiguous.
struct Gap<'a, T, A: Allocator> {
    array: &'a mut DynamicArray<T, A>,
    index: usize,
    count: usize,
    filled: usize,
    tail: usize,
}

impl<'a, T, A: Allocator> Gap<'a, T, A> {
    /// # Safety
    ///
    /// `index <= len` and `capacity - len >= count`.
    unsafe fn open(array: &'a mut DynamicArray<T, A>, index: usize, count: usize) -> Self {
        let tail = array.len - index;
        // SAFETY: `[index, len + count)` lies inside the block per contract.
        unsafe {
            let at = array.buf.slot(index);
            ptr::copy(at, at.add(count), tail);
        }
        array.len = index;
        Self {
            array,
            index,
            count,
            filled: 0,
            tail,
        }
    }

    fn fill(&mut self, value: T) {
        debug_assert!(self.filled < self.count);
        // SAFETY: slot `index + filled` is inside the gap and uninitialised.
        unsafe { self.array.buf.slot(self.index + self.filled).write(value) };
        self.filled += 1;
    }
}

impl<T, A: Allocator> Drop for Gap<'_, T, A> {
    fn drop(&mut self) {
        if self.filled < self.count {
            // SAFETY: the tail sits at `index + count`; moving it down to
            // the end of the filled part stays inside the block.
            unsafe {
                let src = self.array.buf.slot(self.index + self.count);
                let dst = self.array.buf.slot(self.index + self.filled);
                ptr::copy(src, dst, self.tail);
            }
        }
        self.array.len = self.index + self.filled + self.tail;
    }
}

/// Report an allocation failure from a context that cannot return it.
#[cold]
pub(crate) fn alloc_failure(err: AllocError) -> ! {
    match err {
        AllocError::OutOfMemory { bytes, align } => match Layout::from_size_align(bytes, align) {
            Ok(layout) => std::alloc::handle_alloc_error(layout),
            Err(_) => panic!("{err}"),
        },
        AllocError::CapacityOverflow { .. } => panic!("{err}"),
    }
}

impl<T, A: Allocator> Drop for DynamicArray<T, A> {
    fn drop(&mut self) {
        // SAFETY: `[0, len)` is live; the block itself is released by `RawBlock`.
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

impl<T, A: Allocator> Deref for DynamicArray<T, A> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> DerefMut for DynamicArray<T, A> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator> Index<I> for DynamicArray<T, A> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>, A: Allocator> IndexMut<I> for DynamicArray<T, A> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: Clone, A: Allocator + Clone> Clone for DynamicArray<T, A> {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| alloc_failure(err))
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.try_clone_from(source) {
            alloc_failure(err);
        }
    }
}

impl<T, A: Allocator + Default> Default for DynamicArray<T, A> {
    fn default() -> Self {
        Self::new_in(A::default())
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for DynamicArray<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_slice(), f)
    }
}
