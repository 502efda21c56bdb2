//! Parameters for the randomized comparison run.

/// Shape of a [`run_random`](crate::run_random) session.
///
/// The defaults reproduce the reference workload: one hundred thousand
/// operations from a fixed seed, with fill-assignments shorter than 100
/// elements, range-assignments shorter than 20, and range-inserts shorter
/// than 8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Operations to draw.
    pub rounds: usize,
    /// Seed for the ChaCha8 stream; equal seeds replay equal sessions.
    pub seed: u64,
    /// Exclusive upper bound on `AssignN` lengths.
    pub max_fill: usize,
    /// Exclusive upper bound on `AssignSlice` lengths.
    pub max_assign_len: usize,
    /// Exclusive upper bound on `InsertSlice` lengths.
    pub max_insert_len: usize,
}

impl HarnessConfig {
    pub const DEFAULT_ROUNDS: usize = 100_000;
    pub const DEFAULT_SEED: u64 = 0x00C0_FFEE;
    pub const DEFAULT_MAX_FILL: usize = 100;
    pub const DEFAULT_MAX_ASSIGN_LEN: usize = 20;
    pub const DEFAULT_MAX_INSERT_LEN: usize = 8;

    /// Default workload replayed from `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Same workload, `rounds` operations long.
    pub fn with_rounds(self, rounds: usize) -> Self {
        Self { rounds, ..self }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            rounds: Self::DEFAULT_ROUNDS,
            seed: Self::DEFAULT_SEED,
            max_fill: Self::DEFAULT_MAX_FILL,
            max_assign_len: Self::DEFAULT_MAX_ASSIGN_LEN,
            max_insert_len: Self::DEFAULT_MAX_INSERT_LEN,
        }
    }
}
