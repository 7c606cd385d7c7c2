//! Plain-text star catalog loader.
//!
//! A catalog file holds one star per line with three whitespace-separated
//! columns: integer id, right ascension and declination (both in degrees).
//!
//! ```text
//! 1 0.0 0.0
//! 2 90.0 0.0
//! 3 0.0 90.0
//! ```
//!
//! The whole file is read into an owned [`Catalog`] on open. Records are
//! immutable after loading, so a `&Catalog` can be shared freely across
//! worker threads.
//!
//! # Quick Start
//!
//! ```ignore
//! use celestial_catalog::Catalog;
//!
//! let catalog = Catalog::open("data/tycho-trimmed.csv")?;
//! println!("{} records read", catalog.len());
//! ```

pub mod catalog;
pub mod error;

pub use catalog::{Catalog, StarRecord, COLUMNS};
pub use error::{CatalogError, CatalogResult};
