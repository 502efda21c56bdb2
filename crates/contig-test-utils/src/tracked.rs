//! Elements that count their own clones and drops.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct Ledger {
    created: Cell<usize>,
    dropped: Cell<usize>,
    clones: Cell<usize>,
    clone_limit: Cell<Option<usize>>,
}

/// Issues [`Tracked`] values and reports how many are still alive.
///
/// A leak shows up as `live() > 0` after the container is gone; a double
/// drop as `dropped() > created()`.
#[derive(Clone, Debug, Default)]
pub struct Tracker {
    ledger: Rc<Ledger>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make(&self, value: i32) -> Tracked {
        bump(&self.ledger.created);
        Tracked {
            value,
            tracker: self.clone(),
        }
    }

    pub fn created(&self) -> usize {
        self.ledger.created.get()
    }

    pub fn dropped(&self) -> usize {
        self.ledger.dropped.get()
    }

    pub fn clones(&self) -> usize {
        self.ledger.clones.get()
    }

    pub fn live(&self) -> usize {
        self.created() - self.dropped()
    }

    /// Make the clone after the next `n` successful ones panic.
    pub fn panic_after_clones(&self, n: usize) {
        self.ledger.clone_limit.set(Some(self.clones() + n));
    }

    pub fn allow_clones(&self) {
        self.ledger.clone_limit.set(None);
    }
}

fn bump(cell: &Cell<usize>) {
    cell.set(cell.get() + 1);
}

/// An `i32` payload whose lifetime is recorded by its [`Tracker`].
#[derive(Debug)]
pub struct Tracked {
    pub value: i32,
    tracker: Tracker,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        let ledger = &self.tracker.ledger;
        if ledger.clone_limit.get() == Some(ledger.clones.get()) {
            panic!("clone limit reached");
        }
        bump(&ledger.clones);
        self.tracker.make(self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        bump(&self.tracker.ledger.dropped);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialEq<i32> for Tracked {
    fn eq(&self, other: &i32) -> bool {
        self.value == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn counts_lifetimes() {
        let tracker = Tracker::new();
        let a = tracker.make(1);
        let b = a.clone();
        assert_eq!(tracker.live(), 2);
        assert_eq!(tracker.clones(), 1);
        drop(a);
        drop(b);
        assert_eq!(tracker.live(), 0);
        assert_eq!(tracker.dropped(), 2);
    }

    #[test]
    fn clone_limit_panics() {
        let tracker = Tracker::new();
        let a = tracker.make(1);
        tracker.panic_after_clones(1);
        let b = a.clone();
        let result = catch_unwind(AssertUnwindSafe(|| a.clone()));
        assert!(result.is_err());
        tracker.allow_clones();
        let c = b.clone();
        assert_eq!(c, 1);
        drop((a, b, c));
        assert_eq!(tracker.live(), 0);
    }
}
