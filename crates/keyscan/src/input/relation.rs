//! The immutable relation snapshot that profiling runs against.

use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{KeyscanError, Result};
use crate::profiling::AttributeList;

/// Metadata about the file a relation was loaded from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            loaded_at: Utc::now(),
        }
    }
}

static NEXT_RELATION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a loaded relation, assigned once at construction.
///
/// Clones share the id of the relation they were cloned from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationId(u64);

impl RelationId {
    fn next() -> Self {
        Self(NEXT_RELATION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named table of string values.
///
/// Rows are normalized to the header width on construction: short rows are
/// padded with empty strings and long rows are truncated, so every cell is
/// addressable. The column-major view is derived once and shares no state
/// with the caller afterwards.
#[derive(Debug, Clone)]
pub struct Relation {
    id: RelationId,
    name: String,
    attributes: Vec<String>,
    records: Vec<Vec<String>>,
    columns: Vec<Vec<String>>,
}

impl Relation {
    /// Create a relation from attribute names and row-major records.
    pub fn new(
        name: impl Into<String>,
        attributes: Vec<String>,
        mut records: Vec<Vec<String>>,
    ) -> Self {
        let width = attributes.len();
        for row in &mut records {
            row.resize(width, String::new());
        }

        let columns = (0..width)
            .map(|col| records.iter().map(|row| row[col].clone()).collect())
            .collect();

        Self {
            id: RelationId::next(),
            name: name.into(),
            attributes,
            records,
            columns,
        }
    }

    /// Convenience constructor from string slices.
    pub fn from_rows(name: &str, attributes: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            name,
            attributes.iter().map(|a| a.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|v| v.to_string()).collect())
                .collect(),
        )
    }

    pub fn id(&self) -> RelationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute names in column order.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Row-major records.
    pub fn records(&self) -> &[Vec<String>] {
        &self.records
    }

    /// Column-major view.
    pub fn columns(&self) -> &[Vec<String>] {
        &self.columns
    }

    /// Get all values of one column.
    pub fn column(&self, index: usize) -> Option<&[String]> {
        self.columns.get(index).map(|c| c.as_slice())
    }

    /// Get all values of one column, failing on an out-of-range index.
    pub fn try_column(&self, index: usize) -> Result<&[String]> {
        self.column(index).ok_or(KeyscanError::AttributeOutOfRange {
            index,
            count: self.attribute_count(),
        })
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Position of an attribute by name.
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a == name)
    }

    /// Resolve an attribute list to column names.
    ///
    /// Indices outside the relation are skipped.
    pub fn attribute_names(&self, attributes: &AttributeList) -> Vec<&str> {
        attributes
            .iter()
            .filter_map(|index| self.attributes.get(index).map(|s| s.as_str()))
            .collect()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.records
            .get(row)
            .and_then(|r| r.get(col).map(|s| s.as_str()))
    }
}

/// Relations compare by content; two loads of the same data are equal even
/// though their ids differ.
impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.attributes == other.attributes
            && self.records == other.records
    }
}

impl Eq for Relation {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_normalized_to_header_width() {
        let relation = Relation::new(
            "r",
            vec!["a".into(), "b".into()],
            vec![vec!["1".into()], vec!["2".into(), "x".into(), "extra".into()]],
        );

        assert_eq!(relation.records()[0], vec!["1", ""]);
        assert_eq!(relation.records()[1], vec!["2", "x"]);
        assert_eq!(relation.column(1), Some(&["".to_string(), "x".to_string()][..]));
    }

    #[test]
    fn test_column_view_matches_records() {
        let relation = Relation::from_rows("r", &["id", "cat"], &[&["1", "A"], &["2", "A"]]);

        assert_eq!(relation.columns().len(), 2);
        assert_eq!(relation.column(0).unwrap(), &["1", "2"]);
        assert_eq!(relation.get(1, 1), Some("A"));
        assert_eq!(relation.attribute_index("cat"), Some(1));
        assert!(relation.column(2).is_none());
    }

    #[test]
    fn test_try_column_out_of_range() {
        let relation = Relation::from_rows("r", &["id"], &[&["1"]]);
        let err = relation.try_column(3).unwrap_err();
        assert!(matches!(
            err,
            KeyscanError::AttributeOutOfRange { index: 3, count: 1 }
        ));
    }

    #[test]
    fn test_ids_distinguish_loads_but_not_clones() {
        let first = Relation::from_rows("r", &["a"], &[&["1"]]);
        let second = Relation::from_rows("r", &["a"], &[&["1"]]);
        let copy = first.clone();

        assert_ne!(first.id(), second.id());
        assert_eq!(first.id(), copy.id());
        assert_eq!(first, second);
    }

    #[test]
    fn test_attribute_names() {
        let relation = Relation::from_rows("r", &["a", "b", "c"], &[]);
        let names = relation.attribute_names(&AttributeList::new([2, 0]));
        assert_eq!(names, vec!["a", "c"]);
    }
}
