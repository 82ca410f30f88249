//! # RowHaus
//!
//! Typed scanning of relational result sets whose columns are only known at runtime.
//! Every raw cell is converted by a rule table keyed by the column's scan shape or
//! database type name, and rows come out positional or keyed by column name.
//!
//! ## Quick Start
//!
//! ```rust
//! use rowhaus::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cursor = MemoryCursor::new(vec![
//!         ColumnMetadata::new("id", ScanShape::NullInt64, "INT"),
//!         ColumnMetadata::new("name", ScanShape::NullString, "VARCHAR"),
//!     ])
//!     .with_row([Some("1"), Some("mysql")]);
//!
//!     let rowhaus = RowHaus::new(ScanConfig::default());
//!     let rows = rowhaus.scan_to_json(cursor, RowLayout::NameKeyed)?;
//!     assert_eq!(rows, json!([{"id": 1, "name": "mysql"}]));
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod prelude;

// Re-export the main public types for convenience
pub use crate::core::RowHaus;
pub use crate::errors::RowHausError;

// Re-export centralized config
pub use config::{AppConfig, MatchStrategy, ScanConfig, TimePolicy};

// Re-export internal crates
pub use config;
pub use row_scanner;
pub use type_mapping;

// Re-export external dependencies used in public API
pub use serde_json;
pub use tokio_util::sync::CancellationToken;
