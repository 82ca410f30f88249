//! Unified type mapping from raw driver text to typed values
//! This crate provides the conversion rules and rule tables used across the rowhaus ecosystem

pub mod errors;
pub mod parse;
pub mod rules;
pub mod serialize;
pub mod sql;
pub mod types;

// Re-export centralized config
pub use config::{MatchStrategy, TimePolicy};

pub use errors::ConversionError;
pub use rules::{ConversionRule, ConvertFn, RuleTable};
pub use serialize::{named_row_to_json, positional_row_to_json, typed_cell_to_json};
pub use sql::{ColumnTypeKey, DatabaseType, ScanShape};
pub use types::{RawCell, TypedCell};
