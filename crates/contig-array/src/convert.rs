//! Comparison, hashing, and conversion impls.
//!
//! Conversions that cannot return a `Result` treat allocation failure the
//! way std collections do: `handle_alloc_error` for a refused request and
//! a panic for a capacity overflow.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use contig_core::{Allocator, Global};

use crate::array::{alloc_failure, DynamicArray};

impl<T, U, A, B> PartialEq<DynamicArray<U, B>> for DynamicArray<T, A>
where
    T: PartialEq<U>,
    A: Allocator,
    B: Allocator,
{
    fn eq(&self, other: &DynamicArray<U, B>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, A: Allocator> Eq for DynamicArray<T, A> {}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<[U]> for DynamicArray<T, A> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<&[U]> for DynamicArray<T, A> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq<U>, U, A: Allocator, const N: usize> PartialEq<[U; N]> for DynamicArray<T, A> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U, A: Allocator> PartialEq<Vec<U>> for DynamicArray<T, A> {
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialOrd, A: Allocator> PartialOrd for DynamicArray<T, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord, A: Allocator> Ord for DynamicArray<T, A> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash, A: Allocator> Hash for DynamicArray<T, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Hash::hash(self.as_slice(), state)
    }
}

impl<T, A: Allocator> AsRef<[T]> for DynamicArray<T, A> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, A: Allocator> AsMut<[T]> for DynamicArray<T, A> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(values: &[T]) -> Self {
        Self::try_from_slice(values).unwrap_or_else(|err| alloc_failure(err))
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(values: [T; N]) -> Self {
        Self::try_from_exact_iter(values).unwrap_or_else(|err| alloc_failure(err))
    }
}

impl<T> FromIterator<T> for DynamicArray<T, Global> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = DynamicArray::new();
        array.extend(iter);
        array
    }
}

impl<T, A: Allocator> Extend<T> for DynamicArray<T, A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        if let Err(err) = self.reserve(self.len().saturating_add(lower)) {
            alloc_failure(err);
        }
        for value in iter {
            if let Err(err) = self.push_back(value) {
                alloc_failure(err);
            }
        }
    }
}

impl<'a, T: Copy + 'a, A: Allocator> Extend<&'a T> for DynamicArray<T, A> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn compares_against_other_sequences() {
        let array = DynamicArray::from([1, 2, 3]);
        assert_eq!(array, [1, 2, 3]);
        assert_eq!(array, vec![1, 2, 3]);
        assert_eq!(array, &[1, 2, 3][..]);
        assert_eq!(array, DynamicArray::from(&[1, 2, 3][..]));
        assert_ne!(array, [1, 2]);
    }

    #[test]
    fn orders_lexicographically() {
        let a = DynamicArray::from([1, 2, 3]);
        let b = DynamicArray::from([1, 3]);
        assert!(a < b);
    }

    #[test]
    fn equal_arrays_hash_equal() {
        let mut set = HashSet::new();
        set.insert(DynamicArray::from([1, 2]));
        assert!(set.contains(&DynamicArray::from([1, 2])));
    }

    #[test]
    fn collect_and_extend() {
        let mut array: DynamicArray<i32> = (0..5).collect();
        assert_eq!(array, [0, 1, 2, 3, 4]);
        array.extend([5, 6]);
        array.extend(&[7]);
        assert_eq!(array.len(), 8);
        assert_eq!(array.back(), Some(&7));
    }

    #[test]
    fn extend_from_unsized_hint() {
        let mut array = DynamicArray::new();
        array.extend((0..100).filter(|v| v % 10 == 0));
        assert_eq!(array, [0, 10, 20, 30, 40, 50, 60, 70, 80, 90]);
    }
}
