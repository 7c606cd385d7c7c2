//! Running statistics over pairwise distances.
//!
//! [`RunningStats`] keeps count, running mean, minimum and maximum. The mean
//! uses Welford's online update `mean += (x - mean) / count`, which never
//! holds a running sum, so precision does not degrade as the count grows
//! into the hundreds of millions.
//!
//! [`SharedStats`] wraps a [`RunningStats`] in a single mutex. One call to
//! [`SharedStats::push`] applies the whole update (count, mean, min, max)
//! under the lock; interleaving two partial updates would corrupt the
//! running mean.

use std::sync::{Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunningStats {
    count: u64,
    mean: f64,
    min: f64,
    max: f64,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl RunningStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one distance into the statistics.
    #[inline]
    pub fn push(&mut self, distance: f64) {
        self.count += 1;
        self.mean += (distance - self.mean) / self.count as f64;
        if distance < self.min {
            self.min = distance;
        }
        if distance > self.max {
            self.max = distance;
        }
    }

    /// Combine two partial accumulators (Chan et al. pairwise update).
    ///
    /// The result equals pushing every sample of both into one accumulator,
    /// up to floating-point rounding of the mean.
    pub fn merge(&mut self, other: &RunningStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let total = self.count + other.count;
        self.mean += (other.mean - self.mean) * (other.count as f64 / total as f64);
        self.count = total;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Mean distance, or `None` if nothing was pushed.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }
}

impl FromIterator<f64> for RunningStats {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::default();
        for distance in iter {
            stats.push(distance);
        }
        stats
    }
}

/// Mutex-protected [`RunningStats`] shared by all workers of a run.
#[derive(Debug, Default)]
pub struct SharedStats {
    inner: Mutex<RunningStats>,
}

impl SharedStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one complete update under the lock.
    ///
    /// A worker that panicked while holding the lock cannot have left a
    /// half-applied update behind (`push` does not panic), so a poisoned
    /// lock is recovered rather than propagated.
    pub fn push(&self, distance: f64) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(distance);
    }

    /// Copy of the current statistics.
    pub fn snapshot(&self) -> RunningStats {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock-free access for a single-threaded caller.
    pub fn get_mut(&mut self) -> &mut RunningStats {
        self.inner.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}
