//! Error types for row scanning
//!
//! This module defines every failure that can end a scan: schema problems found
//! before the first row, and per-row failures carrying the row index.

use thiserror::Error;
use type_mapping::ConversionError;

/// Error reported by a cursor implementation
pub type CursorError = Box<dyn std::error::Error + Send + Sync>;

/// Column metadata could not be turned into descriptors
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("duplicate column name '{name}' at positions {first} and {second}")]
    DuplicateColumn {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("failed to read column metadata: {0}")]
    Metadata(#[source] CursorError),
}

/// Terminal failure of a scan
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("row {row} scan failed: column '{column}' (position {position}): {source}")]
    Conversion {
        row: usize,
        column: String,
        position: usize,
        #[source]
        source: ConversionError,
    },

    #[error("row {row} scan failed: {source}")]
    ScanIo {
        row: usize,
        #[source]
        source: CursorError,
    },

    #[error("row {row} scan failed: cursor returned {actual} cells for {expected} columns")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("scan cancelled after {rows_read} rows")]
    Cancelled { rows_read: usize },
}

impl ScanError {
    /// Index of the row the failure happened on, if it happened inside the row loop
    pub fn row(&self) -> Option<usize> {
        match self {
            ScanError::Conversion { row, .. }
            | ScanError::ScanIo { row, .. }
            | ScanError::ColumnCountMismatch { row, .. } => Some(*row),
            ScanError::Cancelled { rows_read } => Some(*rows_read),
            ScanError::Schema(_) => None,
        }
    }
}
