//! Result cursor abstraction
//!
//! A cursor is the forward-only view over one query's result rows. Drivers adapt
//! their native row type to [`ResultCursor`], binding every column as an optional string.

use crate::errors::CursorError;
use std::ops::{Deref, DerefMut};
use type_mapping::{RawCell, ScanShape};

/// Column metadata as reported by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMetadata {
    pub name: String,
    pub scan_shape: ScanShape,
    pub database_type_name: String,
}

impl ColumnMetadata {
    pub fn new(name: impl Into<String>, scan_shape: ScanShape, database_type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scan_shape,
            database_type_name: database_type_name.into(),
        }
    }
}

/// Forward-only, single-pass result cursor
pub trait ResultCursor {
    /// Ordered column metadata of the result set
    fn columns(&mut self) -> Result<Vec<ColumnMetadata>, CursorError>;

    /// Advance and read the next row as raw cells, `None` once exhausted
    fn next_row(&mut self) -> Result<Option<Vec<RawCell>>, CursorError>;

    /// Release driver resources. Called once by [`CursorGuard`].
    fn close(&mut self) -> Result<(), CursorError> {
        Ok(())
    }
}

impl<C: ResultCursor + ?Sized> ResultCursor for &mut C {
    fn columns(&mut self) -> Result<Vec<ColumnMetadata>, CursorError> {
        (**self).columns()
    }

    fn next_row(&mut self) -> Result<Option<Vec<RawCell>>, CursorError> {
        (**self).next_row()
    }

    fn close(&mut self) -> Result<(), CursorError> {
        (**self).close()
    }
}

impl<C: ResultCursor + ?Sized> ResultCursor for Box<C> {
    fn columns(&mut self) -> Result<Vec<ColumnMetadata>, CursorError> {
        (**self).columns()
    }

    fn next_row(&mut self) -> Result<Option<Vec<RawCell>>, CursorError> {
        (**self).next_row()
    }

    fn close(&mut self) -> Result<(), CursorError> {
        (**self).close()
    }
}

/// Owns a cursor for the duration of a scan and closes it on every exit path
#[derive(Debug)]
pub struct CursorGuard<C: ResultCursor> {
    cursor: C,
    closed: bool,
}

impl<C: ResultCursor> CursorGuard<C> {
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            closed: false,
        }
    }

    /// Close now and report the outcome instead of logging it on drop
    pub fn close(mut self) -> Result<(), CursorError> {
        self.closed = true;
        self.cursor.close()
    }
}

impl<C: ResultCursor> Deref for CursorGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.cursor
    }
}

impl<C: ResultCursor> DerefMut for CursorGuard<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.cursor
    }
}

impl<C: ResultCursor> Drop for CursorGuard<C> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        // Drop cannot report errors and must not mask the scan outcome
        if let Err(e) = self.cursor.close() {
            tracing::warn!("failed to close result cursor: {}", e);
        }
    }
}
