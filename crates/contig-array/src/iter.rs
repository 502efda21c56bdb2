//! Owning and borrowing traversal.

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;
use std::slice;

use contig_core::Allocator;

use crate::array::DynamicArray;
use crate::raw::RawBlock;

/// An owning iterator over the elements of a [`DynamicArray`].
///
/// Holds the block until dropped; elements not yielded are dropped with it.
pub struct IntoIter<T, A: Allocator> {
    buf: RawBlock<T, A>,
    /// Index of the next element from the front.
    start: usize,
    /// One past the next element from the back.
    end: usize,
}

// SAFETY: the iterator uniquely owns the remaining elements and the block.
unsafe impl<T: Send, A: Allocator + Send> Send for IntoIter<T, A> {}
// SAFETY: shared access only exposes `&[T]`.
unsafe impl<T: Sync, A: Allocator + Sync> Sync for IntoIter<T, A> {}

impl<T, A: Allocator> IntoIter<T, A> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[start, end)` is live; `start <= end <= cap`.
        unsafe { slice::from_raw_parts(self.buf.as_ptr().add(self.start), self.end - self.start) }
    }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: `start` is live and leaves the live range before the next read.
        let value = unsafe { self.buf.slot(self.start).read() };
        self.start += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.start;
        (remaining, Some(remaining))
    }
}

impl<T, A: Allocator> DoubleEndedIterator for IntoIter<T, A> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: `end` was live and is now outside the live range.
        Some(unsafe { self.buf.slot(self.end).read() })
    }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> {}

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> {}

impl<T, A: Allocator> Drop for IntoIter<T, A> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        // SAFETY: `[start, end)` is live and dropped exactly once.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buf.slot(self.start),
                remaining,
            ));
        }
    }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T, A: Allocator> IntoIterator for DynamicArray<T, A> {
    type Item = T;
    type IntoIter = IntoIter<T, A>;

    fn into_iter(self) -> IntoIter<T, A> {
        let (buf, len) = self.into_raw_parts();
        IntoIter {
            buf,
            start: 0,
            end: len,
        }
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a DynamicArray<T, A> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.as_slice().iter()
    }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut DynamicArray<T, A> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.as_mut_slice().iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use crate::dyn_array;
    use std::rc::Rc;

    #[test]
    fn into_iter_yields_in_order() {
        let array = dyn_array![1, 2, 3];
        let collected: Vec<_> = array.into_iter().collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[test]
    fn into_iter_is_double_ended() {
        let mut iter = dyn_array![1, 2, 3, 4].into_iter();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.as_slice(), &[2, 3]);
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn partially_consumed_iter_drops_rest() {
        let marker = Rc::new(());
        let array = dyn_array![marker.clone(), marker.clone(), marker.clone()];
        assert_eq!(Rc::strong_count(&marker), 4);
        let mut iter = array.into_iter();
        drop(iter.next());
        assert_eq!(Rc::strong_count(&marker), 3);
        drop(iter);
        assert_eq!(Rc::strong_count(&marker), 1);
    }

    #[test]
    fn borrowed_iteration() {
        let mut array = dyn_array![1, 2, 3];
        for value in &mut array {
            *value *= 10;
        }
        let sum: i32 = (&array).into_iter().sum();
        assert_eq!(sum, 60);
    }
}
