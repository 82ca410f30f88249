//! Row assembly strategies
//!
//! Assemblers project the converted cells of one row into the caller's
//! output shape. They never convert anything themselves.

use crate::descriptor::ColumnDescriptor;
use serde::Serialize;
use std::collections::HashMap;
use type_mapping::{named_row_to_json, positional_row_to_json, TypedCell};

/// Builds one output row from cells aligned with the descriptors
pub trait RowAssembler {
    type Row;

    fn assemble(&self, descriptors: &[ColumnDescriptor], cells: Vec<TypedCell>) -> Self::Row;
}

/// Ordered sequence of cells, same order as the descriptors
#[derive(Debug, Clone, Copy, Default)]
pub struct Positional;

impl RowAssembler for Positional {
    type Row = Vec<TypedCell>;

    fn assemble(&self, _descriptors: &[ColumnDescriptor], cells: Vec<TypedCell>) -> Self::Row {
        cells
    }
}

/// Mapping from column name to cell
#[derive(Debug, Clone, Copy, Default)]
pub struct NameKeyed;

impl RowAssembler for NameKeyed {
    type Row = HashMap<String, TypedCell>;

    fn assemble(&self, descriptors: &[ColumnDescriptor], cells: Vec<TypedCell>) -> Self::Row {
        // Names are unique, checked during descriptor extraction
        descriptors
            .iter()
            .zip(cells)
            .map(|(descriptor, cell)| (descriptor.name.clone(), cell))
            .collect()
    }
}

/// Output layout selected at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RowLayout {
    #[default]
    Positional,
    NameKeyed,
}

/// A row in either layout
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedRow {
    Positional(Vec<TypedCell>),
    NameKeyed(HashMap<String, TypedCell>),
}

impl TypedRow {
    pub fn len(&self) -> usize {
        match self {
            TypedRow::Positional(cells) => cells.len(),
            TypedRow::NameKeyed(cells) => cells.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell of the named column, `descriptors` resolving names for positional rows
    pub fn get<'a>(&'a self, descriptors: &[ColumnDescriptor], name: &str) -> Option<&'a TypedCell> {
        match self {
            TypedRow::Positional(cells) => descriptors
                .iter()
                .find(|d| d.name == name)
                .and_then(|d| cells.get(d.position)),
            TypedRow::NameKeyed(cells) => cells.get(name),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            TypedRow::Positional(cells) => positional_row_to_json(cells),
            TypedRow::NameKeyed(cells) => named_row_to_json(cells),
        }
    }
}

/// Assembler for a layout chosen at runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutAssembler(pub RowLayout);

impl RowAssembler for LayoutAssembler {
    type Row = TypedRow;

    fn assemble(&self, descriptors: &[ColumnDescriptor], cells: Vec<TypedCell>) -> Self::Row {
        match self.0 {
            RowLayout::Positional => TypedRow::Positional(Positional.assemble(descriptors, cells)),
            RowLayout::NameKeyed => TypedRow::NameKeyed(NameKeyed.assemble(descriptors, cells)),
        }
    }
}
