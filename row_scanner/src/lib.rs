//! Row Scanner - typed scanning of result sets with unknown schemas
//!
//! This crate reads column metadata once, converts every raw cell of every row
//! through a [`type_mapping::RuleTable`], and assembles the converted cells into
//! positional or name-keyed rows.

pub mod assembler;
pub mod cursor;
pub mod descriptor;
pub mod errors;
pub mod memory;
pub mod prelude;
pub mod scanner;

pub use assembler::{LayoutAssembler, NameKeyed, Positional, RowAssembler, RowLayout, TypedRow};
pub use cursor::{ColumnMetadata, CursorGuard, ResultCursor};
pub use descriptor::{describe_columns, extract_descriptors, ColumnDescriptor};
pub use errors::{CursorError, ScanError, SchemaError};
pub use memory::MemoryCursor;
pub use scanner::RowScanner;

pub use tokio_util::sync::CancellationToken;
