//! Error type for a pairwise separation run.
//!
//! # Error Categories
//!
//! | Variant | Raised | Exit status |
//! |---------|--------|-------------|
//! | [`Catalog`](SeparationError::Catalog) | catalog missing or malformed | 1 |
//! | [`UnsupportedWorkers`](SeparationError::UnsupportedWorkers) | worker count outside `0..=MAX_WORKERS` | 1 |
//! | [`Allocation`](SeparationError::Allocation) | pair-coverage matrix cannot be allocated | 2 |
//!
//! All of these abort before any distance is computed. Failures of
//! individual workers are not errors: they are logged and the run finishes
//! with whatever the remaining workers contributed.

use celestial_catalog::CatalogError;
use thiserror::Error;

/// Exit status for input and configuration errors.
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for resource exhaustion.
pub const EXIT_ALLOCATION: u8 = 2;

#[derive(Error, Debug)]
pub enum SeparationError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Number of threads not supported: {requested} (allowed 0..={max})")]
    UnsupportedWorkers { requested: i64, max: usize },

    /// `bytes` is the full matrix size, which may exceed `usize::MAX`.
    #[error("Could not allocate {bytes} bytes for the pair-coverage matrix")]
    Allocation { bytes: u128 },
}

impl SeparationError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Catalog(_) | Self::UnsupportedWorkers { .. } => EXIT_FAILURE,
            Self::Allocation { .. } => EXIT_ALLOCATION,
        }
    }
}

/// Convenience alias for `Result<T, SeparationError>`.
pub type SeparationResult<T> = Result<T, SeparationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_workers_message() {
        let err = SeparationError::UnsupportedWorkers {
            requested: -3,
            max: 1000,
        };
        assert!(err.to_string().contains("Number of threads not supported"));
        assert!(err.to_string().contains("-3"));
        assert_eq!(err.exit_code(), EXIT_FAILURE);
    }

    #[test]
    fn test_allocation_is_distinct_status() {
        let err = SeparationError::Allocation { bytes: 900_000_000 };
        assert_eq!(
            err.to_string(),
            "Could not allocate 900000000 bytes for the pair-coverage matrix"
        );
        assert_eq!(err.exit_code(), EXIT_ALLOCATION);
        assert_ne!(EXIT_ALLOCATION, EXIT_FAILURE);
    }

    #[test]
    fn test_catalog_error_passes_through() {
        let err: SeparationError = CatalogError::TooManyColumns {
            line: 4,
            expected: 3,
            found: 5,
        }
        .into();
        assert_eq!(err.to_string(), "line 4 had more than 3 columns (found 5)");
        assert_eq!(err.exit_code(), EXIT_FAILURE);
    }
}
