//! Threaded full-width row-block pass.
//!
//! Rows are split with [`partition_rows`]; each worker scans its rows against
//! all `n` columns. A pair `{i, j}` is reachable from both `(i, j)` and
//! `(j, i)`, possibly by two different workers, and the coverage matrix's
//! atomic claim decides which one computes it.
//!
//! Workers are scoped OS threads, created once and joined once. A worker
//! that fails to spawn or panics is logged; the pass still returns whatever
//! the others accumulated.

use std::thread;

use tracing::{debug, error, warn};

use super::{ComputationContext, PairMetric};
use crate::partition::{partition_rows, RowBlock};
use crate::stats::RunningStats;

pub(super) fn run<M: PairMetric + ?Sized>(
    ctx: &ComputationContext<'_, M>,
    workers: usize,
) -> (RunningStats, usize) {
    let blocks = partition_rows(ctx.len(), workers);
    let mut completed = 0;

    thread::scope(|s| {
        let mut handles = Vec::with_capacity(blocks.len());

        for block in &blocks {
            let spawned = thread::Builder::new()
                .name(format!("separation-{}", block.worker))
                .spawn_scoped(s, move || scan_block(ctx, block));

            match spawned {
                Ok(handle) => handles.push((block.worker, handle)),
                Err(e) => error!(worker = block.worker, error = %e, "Failed to create worker thread"),
            }
        }

        for (worker, handle) in handles {
            match handle.join() {
                Ok(found) => {
                    completed += 1;
                    debug!(worker, pairs = found, "worker finished");
                }
                Err(_) => error!(worker, "Failed to join worker thread"),
            }
        }
    });

    if completed < workers {
        warn!(
            completed,
            workers, "not every worker finished; statistics are partial"
        );
    }
    (ctx.stats(), completed)
}

fn scan_block<M: PairMetric + ?Sized>(ctx: &ComputationContext<'_, M>, block: &RowBlock) -> u64 {
    debug!(
        worker = block.worker,
        start = block.start,
        end = block.end,
        "worker started"
    );
    let n = ctx.len();
    let mut found = 0;
    for i in block.rows() {
        for j in 0..n {
            if ctx.visit_shared(i, j) {
                found += 1;
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::GreatCircle;
    use crate::partition::expected_pairs;
    use celestial_catalog::{Catalog, StarRecord};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn spiral(n: i64) -> Catalog {
        let stars = (0..n)
            .map(|k| StarRecord::new(k, (k as f64 * 37.0) % 360.0, (k as f64 * 1.7) % 180.0 - 90.0))
            .collect();
        Catalog::from_records(stars)
    }

    #[test]
    fn test_each_pair_computed_exactly_once() {
        let catalog = spiral(60);
        let seen: Mutex<HashMap<(i64, i64), u32>> = Mutex::new(HashMap::new());
        let metric = |a: &StarRecord, b: &StarRecord| {
            let key = (a.id.min(b.id), a.id.max(b.id));
            *seen.lock().unwrap().entry(key).or_default() += 1;
            0.0
        };

        for workers in [1, 2, 4, 7] {
            seen.lock().unwrap().clear();
            let ctx = ComputationContext::new(&catalog, &metric).unwrap();
            let (stats, completed) = run(&ctx, workers);

            assert_eq!(completed, workers);
            assert_eq!(stats.count(), expected_pairs(60));
            let seen = seen.lock().unwrap();
            assert_eq!(seen.len() as u64, expected_pairs(60));
            assert!(seen.values().all(|&calls| calls == 1));
        }
    }

    #[test]
    fn test_uneven_rows_reach_last_record() {
        // 10 rows over 4 workers leaves a remainder; the last record must
        // still pair with everything.
        let catalog = spiral(10);
        let ctx = ComputationContext::new(&catalog, &GreatCircle).unwrap();
        let (stats, _) = run(&ctx, 4);

        assert_eq!(stats.count(), expected_pairs(10));
        for j in 0..9 {
            assert!(ctx.coverage().is_computed(9, j));
        }
    }

    #[test]
    fn test_more_workers_than_rows() {
        let catalog = spiral(3);
        let ctx = ComputationContext::new(&catalog, &GreatCircle).unwrap();
        let (stats, completed) = run(&ctx, 8);
        assert_eq!(stats.count(), 3);
        assert_eq!(completed, 8);
    }

    #[test]
    fn test_panicking_worker_is_not_fatal() {
        let catalog = spiral(20);
        // 20 rows over 4 workers: block 0 owns rows 0..5. Pairs inside that
        // block are only reachable from its own rows, so only worker 0 fails.
        let metric = |a: &StarRecord, b: &StarRecord| {
            if a.id < 5 && b.id < 5 {
                panic!("synthetic failure");
            }
            1.0
        };
        let ctx = ComputationContext::new(&catalog, &metric).unwrap();
        let (stats, completed) = run(&ctx, 4);

        assert_eq!(completed, 3);
        assert_eq!(stats.count(), expected_pairs(20) - expected_pairs(5));
        assert_eq!(stats.mean(), Some(1.0));
        for i in 0..5 {
            for j in 5..20 {
                assert!(ctx.coverage().is_computed(i, j));
            }
        }
    }
}
