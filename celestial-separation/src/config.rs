//! Immutable run configuration.
//!
//! A [`EngineConfig`] is validated once, at construction, and then passed by
//! reference into the partitioner and workers. Nothing reads the worker
//! count from anywhere else.

use std::fmt;

use clap::ValueEnum;

use crate::error::{SeparationError, SeparationResult};

/// Hard upper bound on the number of workers.
pub const MAX_WORKERS: usize = 1000;

/// Validated worker count in `0..=MAX_WORKERS`. Zero selects the
/// sequential pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerCount(usize);

impl WorkerCount {
    pub const SEQUENTIAL: WorkerCount = WorkerCount(0);

    pub fn new(workers: usize) -> SeparationResult<Self> {
        if workers > MAX_WORKERS {
            return Err(SeparationError::UnsupportedWorkers {
                requested: i64::try_from(workers).unwrap_or(i64::MAX),
                max: MAX_WORKERS,
            });
        }
        Ok(Self(workers))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn is_sequential(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<i64> for WorkerCount {
    type Error = SeparationError;

    fn try_from(requested: i64) -> SeparationResult<Self> {
        usize::try_from(requested)
            .ok()
            .filter(|&n| n <= MAX_WORKERS)
            .map(Self)
            .ok_or(SeparationError::UnsupportedWorkers {
                requested,
                max: MAX_WORKERS,
            })
    }
}

impl fmt::Display for WorkerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the pair space is split across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    /// Contiguous row blocks, each scanning all columns. Duplicate visits of
    /// a pair are suppressed by the shared pair-coverage matrix.
    #[default]
    RowBlock,
    /// Upper-triangle row blocks balanced by pair count. Workers own disjoint
    /// pairs, so no coverage matrix and no shared lock are needed.
    Triangular,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowBlock => f.write_str("row-block"),
            Self::Triangular => f.write_str("triangular"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineConfig {
    pub workers: WorkerCount,
    pub strategy: Strategy,
}

impl EngineConfig {
    pub fn new(workers: WorkerCount, strategy: Strategy) -> Self {
        Self { workers, strategy }
    }

    /// Single-threaded configuration.
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Row-block configuration with `workers` threads.
    pub fn threaded(workers: usize) -> SeparationResult<Self> {
        Ok(Self::new(WorkerCount::new(workers)?, Strategy::RowBlock))
    }

    pub fn with_strategy(self, strategy: Strategy) -> Self {
        Self { strategy, ..self }
    }
}
