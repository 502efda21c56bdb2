//! Capacity growth policy.
//!
//! Growth is amortised doubling: a request that does not fit grows the
//! block to `max(required, GROWTH_FACTOR * capacity)`. Growth triggers
//! only when the live elements plus the new ones would not fit, never
//! earlier.

use crate::error::AllocError;

/// Multiplier applied to the current capacity on growth.
pub const GROWTH_FACTOR: usize = 2;

/// Largest element count a block of `T` can hold.
///
/// Bounded by `isize::MAX` bytes, the limit on any single Rust allocation.
/// Zero-sized types never occupy memory, so their bound is `usize::MAX`.
pub const fn max_elements<T>() -> usize {
    let size = std::mem::size_of::<T>();
    if size == 0 {
        usize::MAX
    } else {
        isize::MAX as usize / size
    }
}

/// Whether `additional` more elements need a larger block.
pub const fn needs_growth(len: usize, additional: usize, capacity: usize) -> bool {
    match len.checked_add(additional) {
        Some(required) => required > capacity,
        None => true,
    }
}

/// Total slots needed to hold `additional` elements after `len` live ones.
///
/// # Errors
///
/// Returns [`AllocError::CapacityOverflow`] if the sum overflows `usize`.
pub fn required_capacity(len: usize, additional: usize) -> Result<usize, AllocError> {
    len.checked_add(additional)
        .ok_or(AllocError::CapacityOverflow {
            requested: usize::MAX,
        })
}

/// New capacity for a block of `T` that must hold at least `required` slots.
///
/// Returns `max(required, GROWTH_FACTOR * current)`, with the doubled
/// term clamped to [`max_elements`].
///
/// # Errors
///
/// Returns [`AllocError::CapacityOverflow`] if `required` exceeds
/// [`max_elements::<T>()`](max_elements).
pub fn grown_capacity<T>(current: usize, required: usize) -> Result<usize, AllocError> {
    let max = max_elements::<T>();
    if required > max {
        return Err(AllocError::CapacityOverflow { requested: required });
    }
    let doubled = current.saturating_mul(GROWTH_FACTOR).min(max);
    Ok(required.max(doubled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_growth_is_exact() {
        assert_eq!(grown_capacity::<u32>(0, 1).unwrap(), 1);
        assert_eq!(grown_capacity::<u32>(0, 5).unwrap(), 5);
    }

    #[test]
    fn growth_doubles_small_requests() {
        assert_eq!(grown_capacity::<u32>(4, 5).unwrap(), 8);
    }

    #[test]
    fn large_request_wins_over_doubling() {
        assert_eq!(grown_capacity::<u32>(4, 100).unwrap(), 100);
    }

    #[test]
    fn oversized_request_is_overflow() {
        let max = max_elements::<u64>();
        assert_eq!(
            grown_capacity::<u64>(0, max + 1),
            Err(AllocError::CapacityOverflow { requested: max + 1 })
        );
    }

    #[test]
    fn doubling_clamps_to_max() {
        let max = max_elements::<u64>();
        assert_eq!(grown_capacity::<u64>(max - 1, max).unwrap(), max);
    }

    #[test]
    fn zero_sized_bound_is_usize_max() {
        assert_eq!(max_elements::<()>(), usize::MAX);
        assert_eq!(max_elements::<u8>(), isize::MAX as usize);
    }

    #[test]
    fn growth_trigger_is_exact() {
        assert!(!needs_growth(3, 1, 4));
        assert!(needs_growth(4, 1, 4));
        assert!(!needs_growth(4, 0, 4));
        assert!(needs_growth(usize::MAX, 1, usize::MAX));
    }

    #[test]
    fn required_capacity_overflow() {
        assert_eq!(required_capacity(2, 3).unwrap(), 5);
        assert!(required_capacity(usize::MAX, 1).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn grown_capacity_fits_request(current in 0usize..1 << 20, required in 0usize..1 << 20) {
                let grown = grown_capacity::<u32>(current, required).unwrap();
                prop_assert!(grown >= required);
            }

            #[test]
            fn grown_capacity_at_least_doubles(current in 1usize..1 << 20, extra in 1usize..64) {
                let grown = grown_capacity::<u32>(current, current + extra).unwrap();
                prop_assert!(grown >= current * GROWTH_FACTOR);
            }
        }
    }
}
