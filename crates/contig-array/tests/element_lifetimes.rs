//! Every element is dropped exactly once, including when a `Clone` or a
//! constructor panics partway through an operation.

use std::panic::{catch_unwind, AssertUnwindSafe};

use contig_array::DynamicArray;
use contig_test_utils::{Tracked, Tracker};

fn tracked(tracker: &Tracker, values: &[i32]) -> DynamicArray<Tracked> {
    let mut array = DynamicArray::new();
    for &value in values {
        array.push_back(tracker.make(value)).unwrap();
    }
    array
}

fn values(array: &DynamicArray<Tracked>) -> Vec<i32> {
    array.iter().map(|t| t.value).collect()
}

#[test]
fn mixed_workload_drops_each_element_once() {
    let tracker = Tracker::new();
    let mut array = tracked(&tracker, &[0, 1, 2, 3, 4]);
    array.insert(2, tracker.make(10)).unwrap();
    array.insert_n(0, 3, tracker.make(20)).unwrap();
    array.erase(1);
    array.erase_range(3..6);
    array.resize(12, tracker.make(30)).unwrap();
    array.resize(4, tracker.make(40)).unwrap();
    array.shrink_to_fit().unwrap();
    array.assign_n(6, tracker.make(50)).unwrap();
    assert_eq!(tracker.live(), 6);

    drop(array);
    assert_eq!(tracker.live(), 0);
    assert_eq!(tracker.dropped(), tracker.created());
}

#[test]
fn erase_range_drops_only_the_range() {
    let tracker = Tracker::new();
    let mut array = tracked(&tracker, &[0, 1, 2, 3, 4, 5]);
    array.erase_range(1..4);
    assert_eq!(tracker.dropped(), 3);
    assert_eq!(values(&array), [0, 4, 5]);
}

#[test]
fn pop_back_hands_over_ownership() {
    let tracker = Tracker::new();
    let mut array = tracked(&tracker, &[1, 2]);
    let last = array.pop_back().unwrap();
    assert_eq!(tracker.dropped(), 0);
    assert_eq!(last, 2);
    drop(last);
    assert_eq!(tracker.dropped(), 1);
}

#[test]
fn clear_and_truncate_drop_but_keep_block() {
    let tracker = Tracker::new();
    let mut array = tracked(&tracker, &[1, 2, 3, 4]);
    let capacity = array.capacity();
    array.truncate(2);
    assert_eq!(tracker.live(), 2);
    array.clear();
    assert_eq!(tracker.live(), 0);
    assert_eq!(array.capacity(), capacity);
}

#[test]
fn panicking_clone_in_insert_n_keeps_array_contiguous() {
    let tracker = Tracker::new();
    let mut array = tracked(&tracker, &[0, 1, 2]);
    array.reserve(16).unwrap();
    let fill = tracker.make(9);
    tracker.panic_after_clones(1);

    let result = catch_unwind(AssertUnwindSafe(|| array.insert_n(1, 3, fill)));
    assert!(result.is_err());
    tracker.allow_clones();

    // One clone landed before the panic; the tail closed up behind it.
    assert_eq!(values(&array), [0, 9, 1, 2]);
    drop(array);
    assert_eq!(tracker.live(), 0);
}

#[test]
fn panicking_clone_in_insert_slice_keeps_array_contiguous() {
    let tracker = Tracker::new();
    let mut array = tracked(&tracker, &[0, 1]);
    let source = tracked(&tracker, &[7, 8, 9]);
    tracker.panic_after_clones(2);

    let result = catch_unwind(AssertUnwindSafe(|| array.insert_slice(0, &source)));
    assert!(result.is_err());
    tracker.allow_clones();

    assert_eq!(values(&array), [7, 8, 0, 1]);
    drop((array, source));
    assert_eq!(tracker.live(), 0);
}

#[test]
fn panicking_clone_in_resize_keeps_written_prefix() {
    let tracker = Tracker::new();
    let mut array = tracked(&tracker, &[0]);
    let fill = tracker.make(5);
    tracker.panic_after_clones(1);

    let result = catch_unwind(AssertUnwindSafe(|| array.resize(4, fill)));
    assert!(result.is_err());
    tracker.allow_clones();

    assert_eq!(values(&array), [0, 5]);
    assert!(array.len() <= array.capacity());
    drop(array);
    assert_eq!(tracker.live(), 0);
}

#[test]
fn panicking_clone_in_try_clone_frees_partial_copy() {
    let tracker = Tracker::new();
    let array = tracked(&tracker, &[1, 2, 3]);
    tracker.panic_after_clones(1);

    let result = catch_unwind(AssertUnwindSafe(|| array.try_clone()));
    assert!(result.is_err());
    tracker.allow_clones();

    assert_eq!(tracker.live(), 3);
    assert_eq!(values(&array), [1, 2, 3]);
}

#[test]
fn panicking_constructor_in_emplace_changes_nothing() {
    let tracker = Tracker::new();
    let mut array = tracked(&tracker, &[1, 2, 3]);
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _ = array.emplace(1, || panic!("constructor failed"));
    }));
    assert!(result.is_err());
    assert_eq!(values(&array), [1, 2, 3]);
    assert_eq!(tracker.live(), 3);
}

#[test]
fn partially_consumed_into_iter_drops_rest() {
    let tracker = Tracker::new();
    let array = tracked(&tracker, &[1, 2, 3, 4]);
    let mut iter = array.into_iter();
    let first = iter.next().unwrap();
    let last = iter.next_back().unwrap();
    drop(iter);
    assert_eq!(tracker.live(), 2);
    assert_eq!((first.value, last.value), (1, 4));
}
