//! Column descriptor extraction
//!
//! Descriptors are read once per query. Their order is the alignment contract
//! every later step relies on: cell `i` of each row belongs to descriptor `i`.

use crate::cursor::{ColumnMetadata, ResultCursor};
use crate::errors::SchemaError;
use config::MatchStrategy;
use std::collections::HashMap;
use type_mapping::ColumnTypeKey;

/// One column of a result set, as seen by the rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    pub position: usize,
    pub key: ColumnTypeKey,
}

/// Read the cursor's metadata and build descriptors keyed for `strategy`
pub fn extract_descriptors<C>(
    cursor: &mut C,
    strategy: MatchStrategy,
) -> Result<Vec<ColumnDescriptor>, SchemaError>
where
    C: ResultCursor + ?Sized,
{
    let columns = cursor.columns().map_err(SchemaError::Metadata)?;
    describe_columns(&columns, strategy)
}

/// Build descriptors from already fetched metadata, rejecting duplicate names
pub fn describe_columns(
    columns: &[ColumnMetadata],
    strategy: MatchStrategy,
) -> Result<Vec<ColumnDescriptor>, SchemaError> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(columns.len());
    let mut descriptors = Vec::with_capacity(columns.len());

    for (position, column) in columns.iter().enumerate() {
        if let Some(&first) = seen.get(column.name.as_str()) {
            return Err(SchemaError::DuplicateColumn {
                name: column.name.clone(),
                first,
                second: position,
            });
        }
        seen.insert(column.name.as_str(), position);

        descriptors.push(ColumnDescriptor {
            name: column.name.clone(),
            position,
            key: ColumnTypeKey::for_strategy(
                strategy,
                &column.scan_shape,
                &column.database_type_name,
            ),
        });
    }

    #[cfg(feature = "debug-logging")]
    tracing::debug!(
        "extracted {} column descriptors keyed by {}",
        descriptors.len(),
        strategy
    );

    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryCursor;
    use type_mapping::{DatabaseType, ScanShape};

    fn columns() -> Vec<ColumnMetadata> {
        vec![
            ColumnMetadata::new("id", ScanShape::NullInt64, "BIGINT"),
            ColumnMetadata::new("flag", ScanShape::NullInt64, "TINYINT"),
            ColumnMetadata::new("name", ScanShape::NullString, "VARCHAR"),
        ]
    }

    #[test]
    fn test_descriptors_preserve_order() {
        let descriptors = describe_columns(&columns(), MatchStrategy::DatabaseType).unwrap();
        let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["id", "flag", "name"]);
        assert_eq!(descriptors[1].position, 1);
        assert_eq!(descriptors[1].key, ColumnTypeKey::Database(DatabaseType::TinyInt));
    }

    #[test]
    fn test_descriptors_keyed_by_shape() {
        let descriptors = describe_columns(&columns(), MatchStrategy::ScanShape).unwrap();
        assert_eq!(descriptors[0].key, descriptors[1].key);
        assert_eq!(descriptors[2].key, ColumnTypeKey::Shape(ScanShape::NullString));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let cols = vec![
            ColumnMetadata::new("id", ScanShape::NullInt64, "INT"),
            ColumnMetadata::new("id", ScanShape::NullInt64, "INT"),
        ];
        let err = describe_columns(&cols, MatchStrategy::DatabaseType).unwrap_err();
        match err {
            SchemaError::DuplicateColumn { name, first, second } => {
                assert_eq!(name, "id");
                assert_eq!((first, second), (0, 1));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_metadata_failure() {
        let mut cursor = MemoryCursor::new(columns()).with_metadata_error("connection reset");
        let err = extract_descriptors(&mut cursor, MatchStrategy::DatabaseType).unwrap_err();
        assert!(matches!(err, SchemaError::Metadata(_)));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_empty_result_set() {
        let descriptors = describe_columns(&[], MatchStrategy::ScanShape).unwrap();
        assert!(descriptors.is_empty());
    }
}
