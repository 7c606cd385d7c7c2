//! Threaded upper-triangle pass.
//!
//! Rows are split with [`partition_triangle`] so every worker owns a
//! disjoint set of unordered pairs `(i, j > i)`. No coverage matrix is
//! allocated and no lock is taken during the scan: each worker folds into
//! its own [`RunningStats`], and the partials are merged in worker order
//! after the join, which makes the result independent of scheduling.

use std::panic::{self, AssertUnwindSafe};

use celestial_catalog::Catalog;
use rayon::prelude::*;
use tracing::{debug, error, warn};

use super::PairMetric;
use crate::partition::{partition_triangle, RowBlock};
use crate::stats::RunningStats;

pub(super) fn run<M: PairMetric + ?Sized>(
    catalog: &Catalog,
    metric: &M,
    workers: usize,
) -> (RunningStats, usize) {
    let blocks = partition_triangle(catalog.len(), workers);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("separation-{}", i))
        .build();

    let partials: Vec<Option<RunningStats>> = match pool {
        Ok(pool) => pool.install(|| {
            blocks
                .par_iter()
                .map(|block| scan_guarded(catalog, metric, block))
                .collect()
        }),
        Err(e) => {
            error!(error = %e, "Failed to build worker pool; scanning on the calling thread");
            blocks
                .iter()
                .map(|block| scan_guarded(catalog, metric, block))
                .collect()
        }
    };

    let mut stats = RunningStats::new();
    let mut completed = 0;
    for partial in partials.iter().flatten() {
        stats.merge(partial);
        completed += 1;
    }

    if completed < workers {
        warn!(
            completed,
            workers, "not every worker finished; statistics are partial"
        );
    }
    (stats, completed)
}

fn scan_guarded<M: PairMetric + ?Sized>(
    catalog: &Catalog,
    metric: &M,
    block: &RowBlock,
) -> Option<RunningStats> {
    match panic::catch_unwind(AssertUnwindSafe(|| scan_block(catalog, metric, block))) {
        Ok(stats) => {
            debug!(worker = block.worker, pairs = stats.count(), "worker finished");
            Some(stats)
        }
        Err(_) => {
            error!(worker = block.worker, "worker panicked; its pairs are missing");
            None
        }
    }
}

fn scan_block<M: PairMetric + ?Sized>(
    catalog: &Catalog,
    metric: &M,
    block: &RowBlock,
) -> RunningStats {
    let stars = catalog.stars();
    let mut stats = RunningStats::new();
    for i in block.rows() {
        let a = &stars[i];
        for b in &stars[i + 1..] {
            stats.push(metric.distance(a, b));
        }
    }
    stats
}
