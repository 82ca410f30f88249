//! Error types for the RowHaus crate
//!
//! This module contains all error types that can be returned by RowHaus operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RowHausError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Scan error: {0}")]
    Scan(#[from] row_scanner::ScanError),

    #[error("Failed to close cursor: {0}")]
    CursorClose(#[source] row_scanner::CursorError),
}
