//! Human-readable run report.

use std::fmt;
use std::time::Duration;

use crate::engine::PairwiseSummary;

/// Final statistics plus wall-clock time, printed as plain text.
///
/// ```text
/// Average distance found is 90.000000
/// Minimum distance found is 90.000000
/// Maximum distance found is 90.000000
///
/// Runtime: 0.00 seconds
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Report {
    pub summary: PairwiseSummary,
    pub elapsed: Duration,
}

impl Report {
    pub fn new(summary: PairwiseSummary, elapsed: Duration) -> Self {
        Self { summary, elapsed }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.summary.stats;
        writeln!(f, "Average distance found is {}", Degrees(stats.mean()))?;
        writeln!(f, "Minimum distance found is {}", Degrees(stats.min()))?;
        writeln!(f, "Maximum distance found is {}", Degrees(stats.max()))?;
        writeln!(f)?;
        writeln!(f, "Runtime: {:.2} seconds", self.elapsed.as_secs_f64())
    }
}

/// `n/a` when no pair was seen, six decimals otherwise.
struct Degrees(Option<f64>);

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{:.6}", value),
            None => f.write_str("n/a"),
        }
    }
}
