//! Errors raised while loading a catalog.
//!
//! Every variant is fatal to a run: a catalog is either loaded completely or
//! not at all.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be opened.
    #[error("Unable to open the file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from an already opened catalog failed part way.
    #[error("Read error at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// A line carried more than three columns.
    #[error("line {line} had more than {expected} columns (found {found})")]
    TooManyColumns {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A non-blank line carried fewer than three columns.
    #[error("line {line} had only {found} of {expected} columns")]
    MissingColumns {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A column could not be parsed as a number.
    #[error("line {line}: cannot parse {column} '{value}'")]
    InvalidField {
        line: usize,
        column: &'static str,
        value: String,
    },
}

impl CatalogError {
    /// One-based line number the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Open { .. } => None,
            Self::Read { line, .. }
            | Self::TooManyColumns { line, .. }
            | Self::MissingColumns { line, .. }
            | Self::InvalidField { line, .. } => Some(*line),
        }
    }
}

/// Convenience alias for `Result<T, CatalogError>`.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_many_columns_message() {
        let err = CatalogError::TooManyColumns {
            line: 7,
            expected: 3,
            found: 4,
        };
        assert_eq!(err.to_string(), "line 7 had more than 3 columns (found 4)");
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn test_open_error_has_no_line() {
        let err = CatalogError::Open {
            path: PathBuf::from("data/missing.csv"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("data/missing.csv"));
        assert_eq!(err.line(), None);
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<CatalogError>();
        _assert_sync::<CatalogError>();
    }
}
