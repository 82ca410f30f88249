//! Convenience re-exports for common row-scanner usage

// Cursor boundary
pub use crate::cursor::{ColumnMetadata, CursorGuard, ResultCursor};
pub use crate::memory::MemoryCursor;

// Scanning
pub use crate::descriptor::{extract_descriptors, ColumnDescriptor};
pub use crate::scanner::RowScanner;
pub use crate::assembler::{LayoutAssembler, NameKeyed, Positional, RowAssembler, RowLayout, TypedRow};

// Error types
pub use crate::errors::{CursorError, ScanError, SchemaError};

// Type mapping used in public signatures
pub use type_mapping::{
    ColumnTypeKey, ConversionError, ConversionRule, DatabaseType, RawCell, RuleTable, ScanShape,
    TypedCell,
};
pub use config::{MatchStrategy, TimePolicy};

pub use tokio_util::sync::CancellationToken;
