//! Column-oriented tables.

use serde::Serialize;

use super::column::{Column, Scalar};
use super::label::{range_index, Label};
use super::series::Series;
use crate::error::FrameError;

/// An ordered set of uniquely named columns sharing one row index.
///
/// Invariant: every column has `index.len()` cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    index: Vec<Label>,
    names: Vec<String>,
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table with no rows and no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from named columns with the positional index `0..n`.
    pub fn from_columns<N, C>(columns: Vec<(N, C)>) -> Result<Self, FrameError>
    where
        N: Into<String>,
        C: Into<Column>,
    {
        let mut table = Table::new();
        for (name, column) in columns {
            table.push_column(name, column)?;
        }
        Ok(table)
    }

    /// Replace the row index.
    pub fn with_index(mut self, index: Vec<Label>) -> Result<Self, FrameError> {
        if !self.columns.is_empty() && index.len() != self.nrows() {
            return Err(FrameError::LengthMismatch {
                expected: self.nrows(),
                actual: index.len(),
            });
        }
        self.index = index;
        Ok(self)
    }

    /// Replace the row index with a fresh `0..n`.
    pub fn reset_index(mut self) -> Self {
        self.index = range_index(self.nrows());
        self
    }

    pub fn nrows(&self) -> usize {
        self.index.len()
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nrows() == 0
    }

    pub fn index(&self) -> &[Label] {
        &self.index
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }

    fn position_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Column by name.
    pub fn column(&self, name: &str) -> Result<&Column, FrameError> {
        self.position_of(name)
            .map(|i| &self.columns[i])
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }

    /// `(name, column)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> + '_ {
        self.names.iter().map(String::as_str).zip(self.columns.iter())
    }

    /// Column as a series carrying the table's row index.
    pub fn series(&self, name: &str) -> Result<Series, FrameError> {
        let column = self.column(name)?;
        Series::new(name, self.index.clone(), column.clone())
    }

    /// Cell at row position `row` of column `name`.
    pub fn get(&self, name: &str, row: usize) -> Result<Option<Scalar>, FrameError> {
        Ok(self.column(name)?.get(row))
    }

    /// Append a new column. The first column of an empty table fixes the
    /// row count and gets the positional index.
    pub fn push_column(&mut self, name: impl Into<String>, column: impl Into<Column>) -> Result<(), FrameError> {
        let name = name.into();
        let column = column.into();
        if self.has_column(&name) {
            return Err(FrameError::DuplicateColumn(name));
        }
        if self.columns.is_empty() && self.index.is_empty() {
            self.index = range_index(column.len());
        } else if column.len() != self.nrows() {
            return Err(FrameError::LengthMismatch {
                expected: self.nrows(),
                actual: column.len(),
            });
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Insert or replace a column, keeping its position when it exists.
    pub fn set_column(&mut self, name: impl Into<String>, column: impl Into<Column>) -> Result<(), FrameError> {
        let name = name.into();
        let column = column.into();
        match self.position_of(&name) {
            Some(i) => {
                if column.len() != self.nrows() {
                    return Err(FrameError::LengthMismatch {
                        expected: self.nrows(),
                        actual: column.len(),
                    });
                }
                self.columns[i] = column;
                Ok(())
            }
            None => self.push_column(name, column),
        }
    }

    /// Keep the rows at `positions` in the given order, index labels included.
    pub fn take_rows(&self, positions: &[usize]) -> Table {
        Table {
            index: positions.iter().map(|&i| self.index[i].clone()).collect(),
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(positions)).collect(),
        }
    }

    /// Assemble a table from parts that the caller has already validated.
    pub(crate) fn from_parts(index: Vec<Label>, names: Vec<String>, columns: Vec<Column>) -> Table {
        debug_assert_eq!(names.len(), columns.len());
        debug_assert!(columns.iter().all(|c| c.len() == index.len()));
        Table { index, names, columns }
    }
}
