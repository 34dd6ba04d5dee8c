//! Error types for the keyscan library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for keyscan operations.
#[derive(Debug, Error)]
pub enum KeyscanError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no columns to profile.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// An attribute index does not name a column of the relation.
    #[error("Attribute index {index} out of range for relation with {count} attributes")]
    AttributeOutOfRange { index: usize, count: usize },

    /// Two position list indexes over different relations were combined.
    #[error("Cannot intersect partitions of different relations: {0}")]
    RelationMismatch(String),

    /// The requested feature is not available.
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Discovery was cancelled at a level boundary.
    #[error("Discovery cancelled before level {level}")]
    Cancelled { level: usize },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for keyscan operations.
pub type Result<T> = std::result::Result<T, KeyscanError>;
