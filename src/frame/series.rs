//! Labeled vectors.

use serde::Serialize;
use std::collections::HashSet;

use super::column::{Column, DType, Scalar};
use super::label::{range_index, Label};
use crate::error::FrameError;

/// A named, labeled, typed vector.
///
/// Invariant: `index.len() == data.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    name: String,
    index: Vec<Label>,
    data: Column,
}

impl Series {
    /// Create a series with an explicit index.
    pub fn new(name: impl Into<String>, index: Vec<Label>, data: Column) -> Result<Self, FrameError> {
        if index.len() != data.len() {
            return Err(FrameError::LengthMismatch {
                expected: index.len(),
                actual: data.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            index,
            data,
        })
    }

    /// Create a series with the positional index `0..len`.
    pub fn from_column(name: impl Into<String>, data: impl Into<Column>) -> Self {
        let data = data.into();
        Self {
            name: name.into(),
            index: range_index(data.len()),
            data,
        }
    }

    /// Create a series from labels and values.
    pub fn with_labels<L, I>(name: impl Into<String>, labels: I, data: impl Into<Column>) -> Result<Self, FrameError>
    where
        L: Into<Label>,
        I: IntoIterator<Item = L>,
    {
        let index = labels.into_iter().map(Into::into).collect();
        Self::new(name, index, data.into())
    }

    /// Create a series from `(label, value)` pairs, like a literal mapping.
    pub fn from_pairs<L, V>(name: impl Into<String>, pairs: Vec<(L, V)>) -> Self
    where
        L: Into<Label>,
        Vec<V>: Into<Column>,
    {
        let (labels, values): (Vec<L>, Vec<V>) = pairs.into_iter().unzip();
        let data: Column = values.into();
        Self {
            name: name.into(),
            index: labels.into_iter().map(Into::into).collect(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the same series under a new name.
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn index(&self) -> &[Label] {
        &self.index
    }

    pub fn data(&self) -> &Column {
        &self.data
    }

    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Position of the first entry carrying `label`.
    pub fn position(&self, label: &Label) -> Option<usize> {
        self.index.iter().position(|l| l == label)
    }

    /// Value stored under `label`; `None` when absent or missing.
    pub fn get(&self, label: impl Into<Label>) -> Option<Scalar> {
        let label = label.into();
        self.position(&label).and_then(|i| self.data.get(i))
    }

    /// Value at a position; `None` when missing or out of bounds.
    pub fn iget(&self, position: usize) -> Option<Scalar> {
        self.data.get(position)
    }

    /// `(label, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&Label, Option<Scalar>)> + '_ {
        self.index
            .iter()
            .enumerate()
            .map(move |(i, label)| (label, self.data.get(i)))
    }

    /// Numeric values widened to `f64`.
    pub fn values_f64(&self) -> Result<Vec<Option<f64>>, FrameError> {
        self.data.to_f64().ok_or_else(|| FrameError::TypeMismatch {
            column: self.name.clone(),
            expected: "numeric",
            actual: self.data.dtype(),
        })
    }

    /// Fail with `DuplicateLabel` if any label occurs twice.
    pub fn ensure_unique_index(&self) -> Result<(), FrameError> {
        let mut seen = HashSet::with_capacity(self.index.len());
        for label in &self.index {
            if !seen.insert(label) {
                return Err(FrameError::DuplicateLabel(label.clone()));
            }
        }
        Ok(())
    }

    /// Keep the entries at `positions`, labels included.
    pub fn take(&self, positions: &[usize]) -> Series {
        Series {
            name: self.name.clone(),
            index: positions.iter().map(|&i| self.index[i].clone()).collect(),
            data: self.data.take(positions),
        }
    }

    /// Same name and index, new data.
    pub(crate) fn with_data(&self, data: Column) -> Series {
        debug_assert_eq!(data.len(), self.index.len());
        Series {
            name: self.name.clone(),
            index: self.index.clone(),
            data,
        }
    }

    /// Apply a function to every cell, producing a new series aligned to the
    /// same index. The output type is inferred from the produced values.
    pub fn map<F>(&self, f: F) -> Result<Series, FrameError>
    where
        F: Fn(Option<Scalar>) -> Option<Scalar>,
    {
        let cells = (0..self.len()).map(|i| f(self.data.get(i))).collect();
        let data = Column::from_scalars(cells).map_err(|e| match e {
            FrameError::TypeMismatch { expected, actual, .. } => FrameError::TypeMismatch {
                column: self.name.clone(),
                expected,
                actual,
            },
            other => other,
        })?;
        Ok(self.with_data(data))
    }

    /// Sum of present values; zero for none.
    pub fn sum(&self) -> Result<f64, FrameError> {
        Ok(self.values_f64()?.into_iter().flatten().sum())
    }

    /// Count of present values.
    pub fn count(&self) -> usize {
        self.len() - self.data.missing_count()
    }

    /// Mean of present values; `None` when there are none.
    pub fn mean(&self) -> Result<Option<f64>, FrameError> {
        let values: Vec<f64> = self.values_f64()?.into_iter().flatten().collect();
        if values.is_empty() {
            return Ok(None);
        }
        Ok(Some(values.iter().sum::<f64>() / values.len() as f64))
    }

    pub fn max(&self) -> Result<Option<f64>, FrameError> {
        Ok(self
            .values_f64()?
            .into_iter()
            .flatten()
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v)))))
    }

    pub fn min(&self) -> Result<Option<f64>, FrameError> {
        Ok(self
            .values_f64()?
            .into_iter()
            .flatten()
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v)))))
    }
}
