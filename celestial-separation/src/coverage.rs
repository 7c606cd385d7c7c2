//! Pair-coverage matrix: which unordered pairs have already been computed.
//!
//! An `n × n` grid of one-byte flags shared by every worker. Marking `{i, j}`
//! always writes both `(i, j)` and `(j, i)`, so a scan that reaches the pair
//! from either side sees it as done. The diagonal is never set.
//!
//! Cells are [`AtomicU8`]. [`PairCoverage::try_claim`] performs the
//! check-and-mark as a single compare-and-set on the canonical cell
//! `(min(i, j), max(i, j))`, so exactly one caller ever wins a given pair no
//! matter how many workers race for it.

use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::{SeparationError, SeparationResult};

const NOT_COMPUTED: u8 = 0;
const COMPUTED: u8 = 1;

pub struct PairCoverage {
    n: usize,
    cells: Vec<AtomicU8>,
}

impl PairCoverage {
    /// Allocate an `n × n` matrix with every cell "not computed".
    ///
    /// # Errors
    /// Returns [`SeparationError::Allocation`] with the required byte count
    /// if `n²` overflows or the allocation fails. There is no retry.
    pub fn new(n: usize) -> SeparationResult<Self> {
        let bytes = required_bytes(n);
        let len = usize::try_from(bytes).map_err(|_| SeparationError::Allocation { bytes })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| SeparationError::Allocation { bytes })?;
        cells.resize_with(len, || AtomicU8::new(NOT_COMPUTED));

        Ok(Self { n, cells })
    }

    /// Total matrix size in bytes.
    pub fn size_bytes(&self) -> usize {
        self.cells.len()
    }

    pub fn is_computed(&self, i: usize, j: usize) -> bool {
        self.cells[self.offset(i, j)].load(Ordering::Acquire) == COMPUTED
    }

    /// Unconditionally mark `{i, j}` as computed.
    pub fn mark(&self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.cells[self.offset(i, j)].store(COMPUTED, Ordering::Release);
        self.cells[self.offset(j, i)].store(COMPUTED, Ordering::Release);
    }

    /// Atomically mark `{i, j}` as computed if nobody has yet.
    ///
    /// Returns `true` only for the single caller that flipped the pair.
    /// Always `false` on the diagonal.
    pub fn try_claim(&self, i: usize, j: usize) -> bool {
        if i == j {
            return false;
        }
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };

        let won = self.cells[self.offset(lo, hi)]
            .compare_exchange(NOT_COMPUTED, COMPUTED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            self.cells[self.offset(hi, lo)].store(COMPUTED, Ordering::Release);
        }
        won
    }

    /// Number of unordered pairs currently marked.
    pub fn marked_pairs(&self) -> u64 {
        let mut marked = 0;
        for i in 0..self.n {
            for j in (i + 1)..self.n {
                if self.is_computed(i, j) {
                    marked += 1;
                }
            }
        }
        marked
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        assert!(
            i < self.n && j < self.n,
            "pair ({i}, {j}) outside {n}×{n} coverage matrix",
            n = self.n
        );
        i * self.n + j
    }
}

/// Bytes needed for an `n × n` coverage matrix.
pub fn required_bytes(n: usize) -> u128 {
    (n as u128) * (n as u128)
}
