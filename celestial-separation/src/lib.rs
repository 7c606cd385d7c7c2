//! Brute-force pairwise angular separation statistics.
//!
//! Given a [`Catalog`](celestial_catalog::Catalog) of `n` stars, computes the
//! mean, minimum and maximum great-circle separation over all `n(n-1)/2`
//! unordered pairs. The pass is deliberately O(n²) with no spatial index;
//! the interesting part is how the work is split across threads.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | [`EngineConfig`], [`WorkerCount`], [`Strategy`], [`MAX_WORKERS`] |
//! | [`coverage`] | [`PairCoverage`] matrix with atomic per-pair claim |
//! | [`stats`] | [`RunningStats`] (Welford mean, min, max) and mutex-wrapped [`SharedStats`] |
//! | [`partition`] | Row-block and triangle partitioners |
//! | [`engine`] | [`compute`], [`ComputationContext`], sequential and threaded passes |
//! | [`report`] | Plain-text [`Report`] |
//! | [`error`] | [`SeparationError`] and exit statuses |
//!
//! # Quick Start
//!
//! ```ignore
//! use celestial_catalog::Catalog;
//! use celestial_separation::{compute, EngineConfig, GreatCircle};
//!
//! let catalog = Catalog::open("data/tycho-trimmed.csv")?;
//! let summary = compute(&catalog, &EngineConfig::threaded(8)?, &GreatCircle)?;
//! println!("mean separation {:?}", summary.stats.mean());
//! ```

pub mod config;
pub mod coverage;
pub mod engine;
pub mod error;
pub mod partition;
pub mod report;
pub mod stats;

pub use config::{EngineConfig, Strategy, WorkerCount, MAX_WORKERS};
pub use coverage::PairCoverage;
pub use engine::{compute, ComputationContext, GreatCircle, PairMetric, PairwiseSummary};
pub use error::{SeparationError, SeparationResult};
pub use report::Report;
pub use stats::{RunningStats, SharedStats};
