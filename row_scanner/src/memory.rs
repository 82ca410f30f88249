//! In-memory cursor
//!
//! A [`ResultCursor`] over rows held in memory, for tests, demos, and
//! callers that already fetched their rows as strings.

use crate::cursor::{ColumnMetadata, ResultCursor};
use crate::errors::CursorError;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use type_mapping::RawCell;

#[derive(Debug)]
enum MemoryRow {
    Cells(Vec<RawCell>),
    Failure(String),
}

/// Cursor over pre-rendered rows
#[derive(Debug, Default)]
pub struct MemoryCursor {
    columns: Vec<ColumnMetadata>,
    metadata_error: Option<String>,
    rows: VecDeque<MemoryRow>,
    closed: Arc<AtomicBool>,
}

impl MemoryCursor {
    pub fn new(columns: Vec<ColumnMetadata>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Append a row; `None` cells are SQL NULL
    pub fn with_row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        self.rows.push_back(MemoryRow::Cells(
            cells.into_iter().map(|cell| cell.map(|s| s.into())).collect(),
        ));
        self
    }

    /// Append a row whose read fails with `message`
    pub fn with_failing_row(mut self, message: impl Into<String>) -> Self {
        self.rows.push_back(MemoryRow::Failure(message.into()));
        self
    }

    /// Make metadata reads fail with `message`
    pub fn with_metadata_error(mut self, message: impl Into<String>) -> Self {
        self.metadata_error = Some(message.into());
        self
    }

    /// Flag set once the cursor has been closed, observable after the cursor is moved
    pub fn closed_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.closed)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Rows not yet read
    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl ResultCursor for MemoryCursor {
    fn columns(&mut self) -> Result<Vec<ColumnMetadata>, CursorError> {
        match &self.metadata_error {
            Some(message) => Err(message.clone().into()),
            None => Ok(self.columns.clone()),
        }
    }

    fn next_row(&mut self) -> Result<Option<Vec<RawCell>>, CursorError> {
        if self.is_closed() {
            return Err("cursor is closed".into());
        }
        match self.rows.pop_front() {
            Some(MemoryRow::Cells(cells)) => Ok(Some(cells)),
            Some(MemoryRow::Failure(message)) => Err(message.into()),
            None => Ok(None),
        }
    }

    fn close(&mut self) -> Result<(), CursorError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
