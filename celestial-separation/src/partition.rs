//! Work partitioning for the threaded passes.
//!
//! Both partitioners return exactly `workers` contiguous, non-overlapping
//! [`RowBlock`]s whose union is `[0, n)`. Blocks may be empty when there are
//! more workers than rows.
//!
//! - [`partition_rows`] balances by row count: `n / workers` rows each, with
//!   the `n % workers` leftover rows handed one apiece to the leading blocks.
//!   Used by the full-width row-block scan.
//! - [`partition_triangle`] balances by pair count for the upper-triangle
//!   scan, where row `i` owns the `n - 1 - i` pairs `(i, j > i)`.

use std::ops::Range;

/// Rows `[start, end)` assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBlock {
    pub worker: usize,
    pub start: usize,
    pub end: usize,
}

impl RowBlock {
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Pairs `(i, j > i)` this block owns in an upper-triangle scan of `n`.
    pub fn triangle_pairs(&self, n: usize) -> u64 {
        self.rows().map(|i| (n - 1 - i) as u64).sum()
    }
}

/// Number of unordered pairs among `n` items.
pub fn expected_pairs(n: usize) -> u64 {
    let n = n as u64;
    n * n.saturating_sub(1) / 2
}

/// Split `[0, n)` into `workers` blocks of near-equal row count.
///
/// Returns an empty vector when `workers` is zero.
pub fn partition_rows(n: usize, workers: usize) -> Vec<RowBlock> {
    if workers == 0 {
        return Vec::new();
    }
    let base = n / workers;
    let extra = n % workers;

    let mut blocks = Vec::with_capacity(workers);
    let mut start = 0;
    for worker in 0..workers {
        let len = base + usize::from(worker < extra);
        blocks.push(RowBlock {
            worker,
            start,
            end: start + len,
        });
        start += len;
    }
    blocks
}

/// Split `[0, n)` into `workers` blocks of near-equal upper-triangle pair
/// count. Early rows carry more pairs, so early blocks are shorter.
pub fn partition_triangle(n: usize, workers: usize) -> Vec<RowBlock> {
    if workers == 0 {
        return Vec::new();
    }
    let total = expected_pairs(n);

    let mut blocks = Vec::with_capacity(workers);
    let mut start = 0;
    let mut assigned: u64 = 0;
    for worker in 0..workers {
        let end = if worker + 1 == workers {
            n
        } else {
            let target = total * (worker as u64 + 1) / workers as u64;
            let mut end = start;
            while end < n && assigned < target {
                assigned += (n - 1 - end) as u64;
                end += 1;
            }
            end
        };
        blocks.push(RowBlock { worker, start, end });
        start = end;
    }
    blocks
}
