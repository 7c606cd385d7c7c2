//! Single-threaded pass, used when the worker count is zero.
//!
//! Same body as the row-block workers, but the caller holds the context
//! exclusively, so statistics are updated without taking the lock.

use super::{ComputationContext, PairMetric};
use crate::stats::RunningStats;

pub(super) fn run<M: PairMetric + ?Sized>(ctx: &mut ComputationContext<'_, M>) -> RunningStats {
    let n = ctx.len();
    for i in 0..n {
        for j in 0..n {
            ctx.visit_exclusive(i, j);
        }
    }
    *ctx.stats.get_mut()
}
