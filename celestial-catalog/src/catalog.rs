//! In-memory star catalog read from a whitespace-separated text file.
//!
//! Open a catalog with [`Catalog::open`], or build one from any
//! [`BufRead`] source with [`Catalog::from_reader`]. The loaded records are
//! stored in file order; a record's index is its identity for pairwise work.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Index;
use std::path::Path;

use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

/// Number of columns every non-blank catalog line must carry.
pub const COLUMNS: usize = 3;

/// A single catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarRecord {
    /// Catalog identifier. Carried through but never used for lookup.
    pub id: i64,
    /// Right ascension, in degrees.
    pub ra: f64,
    /// Declination, in degrees.
    pub dec: f64,
}

impl StarRecord {
    pub fn new(id: i64, ra: f64, dec: f64) -> Self {
        Self { id, ra, dec }
    }
}

/// Ordered, immutable collection of [`StarRecord`]s.
///
/// Sized from the number of records actually read; there is no fixed
/// capacity.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    stars: Vec<StarRecord>,
}

impl Catalog {
    /// Read and parse a catalog file.
    ///
    /// # Errors
    /// Returns [`CatalogError::Open`] if the file cannot be opened, or the
    /// first parse error encountered. Parsing stops at the first bad line.
    pub fn open(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Self::from_reader(BufReader::new(file))?;
        debug!(path = %path.display(), records = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Parse a catalog from a buffered reader.
    ///
    /// Blank lines are skipped. Any other line must have exactly
    /// [`COLUMNS`] fields.
    pub fn from_reader<R: BufRead>(reader: R) -> CatalogResult<Self> {
        let mut stars = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = line.map_err(|source| CatalogError::Read {
                line: line_no,
                source,
            })?;

            if let Some(star) = parse_line(&line, line_no)? {
                stars.push(star);
            }
        }

        Ok(Self { stars })
    }

    /// Wrap already parsed records.
    pub fn from_records(stars: Vec<StarRecord>) -> Self {
        Self { stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn stars(&self) -> &[StarRecord] {
        &self.stars
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StarRecord> {
        self.stars.iter()
    }
}

impl Index<usize> for Catalog {
    type Output = StarRecord;

    fn index(&self, index: usize) -> &StarRecord {
        &self.stars[index]
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a StarRecord;
    type IntoIter = std::slice::Iter<'a, StarRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.stars.iter()
    }
}

fn parse_line(line: &str, line_no: usize) -> CatalogResult<Option<StarRecord>> {
    let fields: Vec<&str> = line.split_whitespace().collect();

    match fields.len() {
        0 => Ok(None),
        COLUMNS => {
            let id = parse_field(fields[0], "id", line_no)?;
            let ra = parse_field(fields[1], "right ascension", line_no)?;
            let dec = parse_field(fields[2], "declination", line_no)?;
            Ok(Some(StarRecord { id, ra, dec }))
        }
        found if found > COLUMNS => Err(CatalogError::TooManyColumns {
            line: line_no,
            expected: COLUMNS,
            found,
        }),
        found => Err(CatalogError::MissingColumns {
            line: line_no,
            expected: COLUMNS,
            found,
        }),
    }
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    column: &'static str,
    line_no: usize,
) -> CatalogResult<T> {
    value.parse().map_err(|_| CatalogError::InvalidField {
        line: line_no,
        column,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn parse(text: &str) -> CatalogResult<Catalog> {
        Catalog::from_reader(Cursor::new(text))
    }

    #[test]
    fn test_parse_three_records() {
        let catalog = parse("1 0.0 0.0\n2 90.0 0.0\n3 0.0 90.0\n").unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[0], StarRecord::new(1, 0.0, 0.0));
        assert_eq!(catalog[1], StarRecord::new(2, 90.0, 0.0));
        assert_eq!(catalog[2], StarRecord::new(3, 0.0, 90.0));
    }

    #[test]
    fn test_tabs_and_repeated_spaces() {
        let catalog = parse("17\t  123.25 \t-45.5\n").unwrap();
        assert_eq!(catalog[0], StarRecord::new(17, 123.25, -45.5));
    }

    #[test]
    fn test_no_trailing_newline() {
        let catalog = parse("1 10.0 20.0\n2 30.0 40.0").unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let catalog = parse("\n1 10.0 20.0\n   \n2 30.0 40.0\n\n").unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[1].id, 2);
    }

    #[test]
    fn test_empty_input() {
        let catalog = parse("").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.stars().is_empty());
    }

    #[test]
    fn test_four_columns_rejected_with_line_number() {
        let err = parse("1 0.0 0.0\n2 1.0 1.0 99\n3 2.0 2.0\n").unwrap_err();
        match err {
            CatalogError::TooManyColumns { line, found, .. } => {
                assert_eq!(line, 2);
                assert_eq!(found, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_two_columns_rejected() {
        let err = parse("1 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingColumns { line: 1, found: 2, .. }
        ));
    }

    #[test]
    fn test_bad_number_rejected() {
        let err = parse("1 0.0 0.0\n2 abc 0.0\n").unwrap_err();
        match err {
            CatalogError::InvalidField { line, column, value } => {
                assert_eq!(line, 2);
                assert_eq!(column, "right ascension");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fractional_id_rejected() {
        let err = parse("1.5 0.0 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidField { column: "id", .. }
        ));
    }

    #[test]
    fn test_open_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "100 83.633 -5.375").unwrap();
        writeln!(file, "101 88.793 7.407").unwrap();
        file.flush().unwrap();

        let catalog = Catalog::open(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.stars()[1].id, 101);
        assert_eq!(catalog.iter().map(|s| s.id).sum::<i64>(), 201);
    }

    #[test]
    fn test_open_missing_file() {
        let err = Catalog::open("does/not/exist.csv").unwrap_err();
        assert!(matches!(err, CatalogError::Open { .. }));
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
