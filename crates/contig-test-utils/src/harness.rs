//! Randomized differential testing against `std::vec::Vec`.
//!
//! A [`ComparisonHarness`] applies every [`Op`] to a `DynamicArray<i32>` and
//! to a `Vec<i32>`, then checks that both hold the same elements and that
//! the array's capacity bookkeeping still holds:
//!
//! - `len() <= capacity()` after every step;
//! - capacity is unchanged by any step whose resulting length fits the old
//!   block, except `ShrinkToFit`;
//! - `ShrinkToFit` leaves `capacity() == len()`.

use contig_array::DynamicArray;
use contig_core::{Allocator, Global};
use proptest::collection::vec;
use proptest::prelude::{any, Just, Strategy};
use proptest::prop_oneof;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::HarnessConfig;
use crate::error::{Divergence, DivergenceKind};

/// One mutation, applied identically to both sides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    PushBack(i32),
    Insert { pos: usize, value: i32 },
    Erase { pos: usize },
    ResizeDefault(usize),
    Resize { len: usize, value: i32 },
    AssignN { n: usize, value: i32 },
    AssignSlice(Vec<i32>),
    InsertSlice { pos: usize, values: Vec<i32> },
    EraseRange { start: usize, end: usize },
    ShrinkToFit,
    Clear,
    PopBack,
}

impl Op {
    /// Draw an operation valid for an array of `len` elements.
    ///
    /// Returns `None` when the drawn kind has no valid form at this length
    /// (erasing from an empty array).
    pub fn random<R: Rng + ?Sized>(rng: &mut R, len: usize, config: &HarnessConfig) -> Option<Op> {
        let op = match rng.random_range(0..14u32) {
            0..=2 => Op::PushBack(rng.random()),
            3 | 4 => Op::Insert {
                pos: rng.random_range(0..=len),
                value: rng.random(),
            },
            5 | 6 => {
                if len == 0 {
                    return None;
                }
                Op::Erase {
                    pos: rng.random_range(0..len),
                }
            }
            7 => Op::ResizeDefault(rng.random_range(0..2 * len.max(1))),
            8 => Op::Resize {
                len: rng.random_range(0..2 * len.max(1)),
                value: rng.random(),
            },
            9 => Op::AssignN {
                n: rng.random_range(0..config.max_fill.max(1)),
                value: rng.random(),
            },
            10 => {
                let n = rng.random_range(0..config.max_assign_len.max(1));
                Op::AssignSlice((0..n).map(|_| rng.random()).collect())
            }
            11 => {
                let pos = rng.random_range(0..=len);
                let n = rng.random_range(0..config.max_insert_len.max(1));
                Op::InsertSlice {
                    pos,
                    values: (0..n).map(|_| rng.random()).collect(),
                }
            }
            12 => {
                let start = rng.random_range(0..=len);
                let end = rng.random_range(start..=len);
                Op::EraseRange { start, end }
            }
            _ => match rng.random_range(0..3u32) {
                0 => Op::ShrinkToFit,
                1 => Op::Clear,
                _ => Op::PopBack,
            },
        };
        Some(op)
    }

    /// Fold arbitrary positions into the valid range for `len` elements.
    ///
    /// `None` for an `Erase` against an empty array.
    pub fn fit(self, len: usize) -> Option<Op> {
        let op = match self {
            Op::Insert { pos, value } => Op::Insert {
                pos: pos % (len + 1),
                value,
            },
            Op::Erase { pos } => {
                if len == 0 {
                    return None;
                }
                Op::Erase { pos: pos % len }
            }
            Op::InsertSlice { pos, values } => Op::InsertSlice {
                pos: pos % (len + 1),
                values,
            },
            Op::EraseRange { start, end } => {
                let (a, b) = (start % (len + 1), end % (len + 1));
                Op::EraseRange {
                    start: a.min(b),
                    end: a.max(b),
                }
            }
            other => other,
        };
        Some(op)
    }
}

/// Arbitrary operations with unconstrained positions; pass each through
/// [`Op::fit`] before applying.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<i32>().prop_map(Op::PushBack),
        2 => (any::<usize>(), any::<i32>()).prop_map(|(pos, value)| Op::Insert { pos, value }),
        2 => any::<usize>().prop_map(|pos| Op::Erase { pos }),
        1 => (0usize..64).prop_map(Op::ResizeDefault),
        1 => (0usize..64, any::<i32>()).prop_map(|(len, value)| Op::Resize { len, value }),
        1 => (0usize..100, any::<i32>()).prop_map(|(n, value)| Op::AssignN { n, value }),
        1 => vec(any::<i32>(), 0..20).prop_map(Op::AssignSlice),
        1 => (any::<usize>(), vec(any::<i32>(), 0..8))
            .prop_map(|(pos, values)| Op::InsertSlice { pos, values }),
        1 => (any::<usize>(), any::<usize>()).prop_map(|(start, end)| Op::EraseRange { start, end }),
        1 => Just(Op::ShrinkToFit),
        1 => Just(Op::Clear),
        1 => Just(Op::PopBack),
    ]
}

/// Summary of a completed session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HarnessReport {
    /// Operations applied and verified.
    pub applied: usize,
    /// Draws discarded as invalid for the length at the time.
    pub skipped: usize,
    pub peak_len: usize,
    pub peak_capacity: usize,
    pub final_len: usize,
    pub final_capacity: usize,
}

impl HarnessReport {
    fn record<A: Allocator>(&mut self, harness: &ComparisonHarness<A>) {
        let (len, capacity) = (harness.subject.len(), harness.subject.capacity());
        self.applied += 1;
        self.peak_len = self.peak_len.max(len);
        self.peak_capacity = self.peak_capacity.max(capacity);
        self.final_len = len;
        self.final_capacity = capacity;
    }
}

/// A `DynamicArray<i32>` run in lockstep with a `Vec<i32>`.
#[derive(Debug)]
pub struct ComparisonHarness<A: Allocator = Global> {
    subject: DynamicArray<i32, A>,
    reference: Vec<i32>,
    step: usize,
}

impl ComparisonHarness {
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl Default for ComparisonHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Allocator> ComparisonHarness<A> {
    /// Compare an array backed by `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self {
            subject: DynamicArray::new_in(alloc),
            reference: Vec::new(),
            step: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    /// Operations applied so far.
    pub fn steps(&self) -> usize {
        self.step
    }

    pub fn subject(&self) -> &DynamicArray<i32, A> {
        &self.subject
    }

    /// Direct access to the array under test, bypassing the reference.
    pub fn subject_mut(&mut self) -> &mut DynamicArray<i32, A> {
        &mut self.subject
    }

    pub fn reference(&self) -> &[i32] {
        &self.reference
    }

    /// Apply `op` to both sides and verify they still agree.
    ///
    /// # Panics
    ///
    /// Panics if `op` holds a position invalid for the current length; use
    /// [`Op::fit`] to repair arbitrary positions first.
    pub fn apply(&mut self, op: Op) -> Result<(), Divergence> {
        let step = self.step;
        self.step += 1;
        let before = self.subject.capacity();
        self.execute(&op)
            .and_then(|()| self.check(&op, before))
            .map_err(|kind| Divergence { step, op, kind })
    }

    fn execute(&mut self, op: &Op) -> Result<(), DivergenceKind> {
        let subject = &mut self.subject;
        let reference = &mut self.reference;
        match *op {
            Op::PushBack(value) => {
                subject.push_back(value).map_err(DivergenceKind::Alloc)?;
                reference.push(value);
            }
            Op::Insert { pos, value } => {
                let at = subject.insert(pos, value).map_err(DivergenceKind::Alloc)?;
                reference.insert(pos, value);
                expect_position(pos, at)?;
            }
            Op::Erase { pos } => {
                let at = subject.erase(pos);
                reference.remove(pos);
                expect_position(pos, at)?;
            }
            Op::ResizeDefault(len) => {
                subject.resize_default(len).map_err(DivergenceKind::Alloc)?;
                reference.resize(len, 0);
            }
            Op::Resize { len, value } => {
                subject.resize(len, value).map_err(DivergenceKind::Alloc)?;
                reference.resize(len, value);
            }
            Op::AssignN { n, value } => {
                subject.assign_n(n, value).map_err(DivergenceKind::Alloc)?;
                reference.clear();
                reference.resize(n, value);
            }
            Op::AssignSlice(ref values) => {
                subject.assign_slice(values).map_err(DivergenceKind::Alloc)?;
                reference.clear();
                reference.extend_from_slice(values);
            }
            Op::InsertSlice { pos, ref values } => {
                let at = subject
                    .insert_slice(pos, values)
                    .map_err(DivergenceKind::Alloc)?;
                reference.splice(pos..pos, values.iter().copied());
                expect_position(pos, at)?;
            }
            Op::EraseRange { start, end } => {
                let at = subject.erase_range(start..end);
                reference.drain(start..end);
                expect_position(start, at)?;
            }
            Op::ShrinkToFit => {
                subject.shrink_to_fit().map_err(DivergenceKind::Alloc)?;
                reference.shrink_to_fit();
            }
            Op::Clear => {
                subject.clear();
                reference.clear();
            }
            Op::PopBack => {
                if let (Some(actual), Some(expected)) = (subject.pop_back(), reference.pop()) {
                    if actual != expected {
                        return Err(DivergenceKind::Element {
                            index: reference.len(),
                            expected,
                            actual,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn check(&self, op: &Op, before: usize) -> Result<(), DivergenceKind> {
        let (len, capacity) = (self.subject.len(), self.subject.capacity());
        if len != self.reference.len() {
            return Err(DivergenceKind::Length {
                expected: self.reference.len(),
                actual: len,
            });
        }
        let mismatch = self
            .subject
            .iter()
            .zip(&self.reference)
            .position(|(actual, expected)| actual != expected);
        if let Some(index) = mismatch {
            return Err(DivergenceKind::Element {
                index,
                expected: self.reference[index],
                actual: self.subject[index],
            });
        }
        if len > capacity {
            return Err(DivergenceKind::CapacityBelowLength { len, capacity });
        }
        if *op == Op::ShrinkToFit {
            if capacity != len {
                return Err(DivergenceKind::NotShrunk { len, capacity });
            }
        } else if len <= before && capacity != before {
            return Err(DivergenceKind::CapacityChanged {
                before,
                after: capacity,
            });
        }
        Ok(())
    }

    /// Draw `config.rounds` operations from a ChaCha8 stream seeded with
    /// `config.seed` and apply each, stopping at the first divergence.
    pub fn run_random(&mut self, config: &HarnessConfig) -> Result<HarnessReport, Divergence> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut report = HarnessReport::default();
        for _ in 0..config.rounds {
            let Some(op) = Op::random(&mut rng, self.len(), config) else {
                report.skipped += 1;
                continue;
            };
            if let Err(divergence) = self.apply(op) {
                log::error!("seed {:#x}: {divergence}", config.seed);
                return Err(divergence);
            }
            report.record(self);
        }
        log::debug!(
            "seed {:#x}: {} ops applied, {} skipped, peak len {}, peak capacity {}",
            config.seed,
            report.applied,
            report.skipped,
            report.peak_len,
            report.peak_capacity
        );
        Ok(report)
    }

    /// Apply every op after folding its positions with [`Op::fit`].
    pub fn run_ops<I>(&mut self, ops: I) -> Result<HarnessReport, Divergence>
    where
        I: IntoIterator<Item = Op>,
    {
        let mut report = HarnessReport::default();
        for op in ops {
            let Some(op) = op.fit(self.len()) else {
                report.skipped += 1;
                continue;
            };
            self.apply(op)?;
            report.record(self);
        }
        Ok(report)
    }
}

fn expect_position(expected: usize, actual: usize) -> Result<(), DivergenceKind> {
    if expected == actual {
        Ok(())
    } else {
        Err(DivergenceKind::Position { expected, actual })
    }
}

/// Run a fresh system-allocator harness through a seeded random session.
pub fn run_random(config: &HarnessConfig) -> Result<HarnessReport, Divergence> {
    ComparisonHarness::new().run_random(config)
}

/// Run a fresh system-allocator harness through `ops`.
pub fn run_ops<I>(ops: I) -> Result<HarnessReport, Divergence>
where
    I: IntoIterator<Item = Op>,
{
    ComparisonHarness::new().run_ops(ops)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_random_session_agrees() {
        let report = run_random(&HarnessConfig::new(1).with_rounds(2_000)).unwrap();
        assert_eq!(report.applied + report.skipped, 2_000);
        assert!(report.peak_len > 0);
        assert!(report.peak_capacity >= report.peak_len);
    }

    #[test]
    fn sessions_replay_from_seed() {
        let cfg = HarnessConfig::new(42).with_rounds(500);
        assert_eq!(run_random(&cfg).unwrap(), run_random(&cfg).unwrap());
    }

    #[test]
    fn fixed_sequence_agrees() {
        let report = run_ops([
            Op::AssignN { n: 3, value: 7 },
            Op::InsertSlice {
                pos: 1,
                values: vec![1, 2],
            },
            Op::EraseRange { start: 0, end: 2 },
            Op::ShrinkToFit,
            Op::PushBack(9),
            Op::Clear,
        ])
        .unwrap();
        assert_eq!(report.applied, 6);
        assert_eq!(report.final_len, 0);
    }

    #[test]
    fn fit_folds_positions() {
        assert_eq!(Op::Erase { pos: 5 }.fit(0), None);
        assert_eq!(Op::Erase { pos: 5 }.fit(3), Some(Op::Erase { pos: 2 }));
        assert_eq!(
            Op::EraseRange { start: 9, end: 1 }.fit(4),
            Some(Op::EraseRange { start: 1, end: 4 })
        );
        assert_eq!(
            Op::Insert { pos: 4, value: 0 }.fit(3),
            Some(Op::Insert { pos: 0, value: 0 })
        );
    }

    #[test]
    fn detects_tampered_element() {
        let mut harness = ComparisonHarness::new();
        harness.apply(Op::AssignSlice(vec![1, 2, 3])).unwrap();
        harness.subject_mut()[1] = 20;
        let divergence = harness.apply(Op::PushBack(4)).unwrap_err();
        assert_eq!(divergence.step, 1);
        assert_eq!(
            divergence.kind,
            DivergenceKind::Element {
                index: 1,
                expected: 2,
                actual: 20,
            }
        );
    }

    #[test]
    fn detects_tampered_length() {
        let mut harness = ComparisonHarness::new();
        harness.apply(Op::AssignN { n: 4, value: 1 }).unwrap();
        harness.subject_mut().truncate(2);
        let divergence = harness.apply(Op::ShrinkToFit).unwrap_err();
        assert_eq!(
            divergence.kind,
            DivergenceKind::Length {
                expected: 4,
                actual: 2,
            }
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arbitrary_sequences_agree(ops in proptest::collection::vec(op_strategy(), 0..64)) {
                prop_assert!(run_ops(ops).is_ok());
            }
        }
    }
}
