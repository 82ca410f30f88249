//! Convenience re-exports for common RowHaus usage
//!
//! This prelude module re-exports the most commonly used items from the RowHaus ecosystem,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use rowhaus::prelude::*;
//!
//! // Now you have access to all the common RowHaus types and traits
//! let rowhaus = RowHaus::new(ScanConfig::default());
//! ```

// Core RowHaus components
pub use crate::core::RowHaus;
pub use crate::errors::RowHausError;

// Re-export centralized config
pub use config::{AppConfig, MatchStrategy, ScanConfig, TimePolicy};

// Cursors, scanning and assembly
pub use row_scanner::prelude::*;

// Conversion rules and cell types
pub use type_mapping::{
    named_row_to_json, positional_row_to_json, typed_cell_to_json, ColumnTypeKey,
    ConversionError, ConversionRule, DatabaseType, RawCell, RuleTable, ScanShape, TypedCell,
};

// Common external dependencies
pub use serde::Serialize;
pub use serde_json;
