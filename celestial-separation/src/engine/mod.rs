//! The all-pairs pass.
//!
//! [`compute`] visits every unordered pair of catalog records once, feeds
//! each pair's distance to a [`RunningStats`], and returns a
//! [`PairwiseSummary`]. Which pass runs depends on the [`EngineConfig`]:
//!
//! | Workers | Strategy | Pass | Shared state |
//! |---------|----------|------|--------------|
//! | 0 | any | `sequential` | coverage matrix, stats without locking |
//! | ≥ 1 | [`Strategy::RowBlock`] | `row_block` | coverage matrix (atomic claim), stats under one mutex |
//! | ≥ 1 | [`Strategy::Triangular`] | `triangular` | none; per-worker stats merged after the join |
//!
//! The row-block and sequential passes scan the full `n × n` grid and rely on
//! the [`PairCoverage`] matrix to skip the second visit of each pair. Both
//! live inside a [`ComputationContext`] that the calling thread owns for
//! the whole run; workers only borrow it.

mod row_block;
mod sequential;
mod triangular;

use celestial_catalog::{Catalog, StarRecord};
use celestial_core::angular_separation_deg;
use tracing::info;

use crate::config::{EngineConfig, Strategy};
use crate::coverage::PairCoverage;
use crate::error::SeparationResult;
use crate::partition::expected_pairs;
use crate::stats::{RunningStats, SharedStats};

/// Distance between two catalog records.
///
/// Implemented by [`GreatCircle`] and by any `Fn(&StarRecord, &StarRecord) -> f64`
/// closure, which lets tests substitute a synthetic metric.
pub trait PairMetric: Sync {
    fn distance(&self, a: &StarRecord, b: &StarRecord) -> f64;
}

impl<F> PairMetric for F
where
    F: Fn(&StarRecord, &StarRecord) -> f64 + Sync,
{
    fn distance(&self, a: &StarRecord, b: &StarRecord) -> f64 {
        self(a, b)
    }
}

/// Great-circle separation in degrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatCircle;

impl PairMetric for GreatCircle {
    #[inline]
    fn distance(&self, a: &StarRecord, b: &StarRecord) -> f64 {
        angular_separation_deg(a.ra, a.dec, b.ra, b.dec)
    }
}

/// State shared by the workers of a full-grid pass.
pub struct ComputationContext<'a, M: PairMetric + ?Sized> {
    catalog: &'a Catalog,
    metric: &'a M,
    coverage: PairCoverage,
    stats: SharedStats,
}

impl<'a, M: PairMetric + ?Sized> ComputationContext<'a, M> {
    /// Allocate a zeroed coverage matrix for `catalog` and empty statistics.
    ///
    /// # Errors
    /// [`SeparationError::Allocation`](crate::SeparationError::Allocation)
    /// if the `n²`-byte matrix cannot be allocated.
    pub fn new(catalog: &'a Catalog, metric: &'a M) -> SeparationResult<Self> {
        Ok(Self {
            catalog,
            metric,
            coverage: PairCoverage::new(catalog.len())?,
            stats: SharedStats::new(),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn coverage(&self) -> &PairCoverage {
        &self.coverage
    }

    pub fn stats(&self) -> RunningStats {
        self.stats.snapshot()
    }

    /// Always evaluated as (lower index, higher index), so a pair yields
    /// the same bits whichever side it was reached from.
    #[inline]
    fn distance(&self, i: usize, j: usize) -> f64 {
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        self.metric.distance(&self.catalog[lo], &self.catalog[hi])
    }

    /// Threaded visit of `(i, j)`. Returns `true` if this call discovered
    /// the pair.
    ///
    /// Already-marked pairs are skipped before touching the lock. The
    /// claim is atomic, so two workers reaching `{i, j}` from opposite
    /// sides never both count it.
    #[inline]
    fn visit_shared(&self, i: usize, j: usize) -> bool {
        if i == j || self.coverage.is_computed(i, j) || !self.coverage.try_claim(i, j) {
            return false;
        }
        let distance = self.distance(i, j);
        self.stats.push(distance);
        true
    }

    /// Single-threaded visit of `(i, j)`; no locking.
    #[inline]
    fn visit_exclusive(&mut self, i: usize, j: usize) {
        if i == j || self.coverage.is_computed(i, j) {
            return;
        }
        let distance = self.distance(i, j);
        self.coverage.mark(i, j);
        self.stats.get_mut().push(distance);
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, Copy)]
pub struct PairwiseSummary {
    /// Catalog size.
    pub records: usize,
    pub stats: RunningStats,
    pub config: EngineConfig,
    /// Workers whose contribution made it into `stats`. Zero for the
    /// sequential pass.
    pub workers_completed: usize,
}

impl PairwiseSummary {
    /// Pairs a complete pass over `records` would visit.
    pub fn expected_pairs(&self) -> u64 {
        expected_pairs(self.records)
    }

    /// `true` if every configured worker finished.
    pub fn is_complete(&self) -> bool {
        self.workers_completed == self.config.workers.get()
    }
}

/// Run the all-pairs pass described by `config`.
///
/// Worker creation, join and panic failures are logged and leave a partial
/// result; they never surface as errors.
///
/// # Errors
/// Only allocation of the coverage matrix can fail.
pub fn compute<M: PairMetric + ?Sized>(
    catalog: &Catalog,
    config: &EngineConfig,
    metric: &M,
) -> SeparationResult<PairwiseSummary> {
    info!(
        records = catalog.len(),
        workers = config.workers.get(),
        strategy = %config.strategy,
        "starting pairwise pass"
    );

    let workers = config.workers.get();
    let (stats, workers_completed) = if config.workers.is_sequential() {
        let mut ctx = ComputationContext::new(catalog, metric)?;
        (sequential::run(&mut ctx), 0)
    } else {
        match config.strategy {
            Strategy::RowBlock => {
                let ctx = ComputationContext::new(catalog, metric)?;
                row_block::run(&ctx, workers)
            }
            Strategy::Triangular => triangular::run(catalog, metric, workers),
        }
    };

    let summary = PairwiseSummary {
        records: catalog.len(),
        stats,
        config: *config,
        workers_completed,
    };
    info!(
        pairs = summary.stats.count(),
        expected = summary.expected_pairs(),
        workers_completed,
        "pairwise pass finished"
    );
    Ok(summary)
}
