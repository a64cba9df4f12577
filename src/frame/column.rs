//! Strongly typed columns with explicit missing cells.
//!
//! A cell is `Option<T>`; `None` is the missing-value marker. Columns never
//! coerce between kinds on their own: numeric code asks for `to_f64` and
//! gets `None` back for text and date columns.

use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

use super::display::format_float;
use super::label::Label;
use crate::error::FrameError;

/// Column element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    Int,
    Float,
    Text,
    Date,
}

impl DType {
    pub fn name(&self) -> &'static str {
        match self {
            DType::Int => "int64",
            DType::Float => "float64",
            DType::Text => "text",
            DType::Date => "date",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DType::Int | DType::Float)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single present cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl Scalar {
    pub fn dtype(&self) -> DType {
        match self {
            Scalar::Int(_) => DType::Int,
            Scalar::Float(_) => DType::Float,
            Scalar::Text(_) => DType::Text,
            Scalar::Date(_) => DType::Date,
        }
    }

    /// Numeric value, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Scalar::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Convert into a row label. Floats have no label form.
    pub fn to_label(&self) -> Option<Label> {
        match self {
            Scalar::Int(i) => Some(Label::Int(*i)),
            Scalar::Float(_) => None,
            Scalar::Text(s) => Some(Label::Text(s.clone())),
            Scalar::Date(d) => Some(Label::Date(*d)),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(v) => write!(f, "{}", format_float(*v)),
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// A typed vector of optional cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "dtype", content = "values", rename_all = "lowercase")]
pub enum Column {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Date(Vec<Option<NaiveDate>>),
}

/// Evaluate an expression against the inner vector of any variant.
macro_rules! with_values {
    ($col:expr, $v:ident => $body:expr) => {
        match $col {
            Column::Int($v) => $body,
            Column::Float($v) => $body,
            Column::Text($v) => $body,
            Column::Date($v) => $body,
        }
    };
}

/// Build a column of the same variant from an expression over the inner vector.
macro_rules! map_values {
    ($col:expr, $v:ident => $body:expr) => {
        match $col {
            Column::Int($v) => Column::Int($body),
            Column::Float($v) => Column::Float($body),
            Column::Text($v) => Column::Text($body),
            Column::Date($v) => Column::Date($body),
        }
    };
}

impl Column {
    /// Zero-length column of the given type.
    pub fn empty(dtype: DType) -> Self {
        Self::missing(dtype, 0)
    }

    /// Column of `len` missing cells.
    pub fn missing(dtype: DType, len: usize) -> Self {
        match dtype {
            DType::Int => Column::Int(vec![None; len]),
            DType::Float => Column::Float(vec![None; len]),
            DType::Text => Column::Text(vec![None; len]),
            DType::Date => Column::Date(vec![None; len]),
        }
    }

    pub fn len(&self) -> usize {
        with_values!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DType {
        match self {
            Column::Int(_) => DType::Int,
            Column::Float(_) => DType::Float,
            Column::Text(_) => DType::Text,
            Column::Date(_) => DType::Date,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.dtype().is_numeric()
    }

    /// Cell at `i`; `None` when missing or out of bounds.
    pub fn get(&self, i: usize) -> Option<Scalar> {
        match self {
            Column::Int(v) => v.get(i).copied().flatten().map(Scalar::Int),
            Column::Float(v) => v.get(i).copied().flatten().map(Scalar::Float),
            Column::Text(v) => v.get(i).cloned().flatten().map(Scalar::Text),
            Column::Date(v) => v.get(i).copied().flatten().map(Scalar::Date),
        }
    }

    pub fn is_missing(&self, i: usize) -> bool {
        with_values!(self, v => v.get(i).map_or(true, |cell| cell.is_none()))
    }

    pub fn missing_count(&self) -> usize {
        with_values!(self, v => v.iter().filter(|cell| cell.is_none()).count())
    }

    /// Positions holding a present value, in order.
    pub fn present_positions(&self) -> Vec<usize> {
        with_values!(self, v => v
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.as_ref().map(|_| i))
            .collect())
    }

    /// Gather cells by position. Positions must be in bounds.
    pub fn take(&self, positions: &[usize]) -> Column {
        map_values!(self, v => positions.iter().map(|&i| v[i].clone()).collect())
    }

    /// Gather cells by optional position; `None` produces a missing cell.
    pub fn take_opt(&self, positions: &[Option<usize>]) -> Column {
        map_values!(self, v => positions
            .iter()
            .map(|p| p.and_then(|i| v[i].clone()))
            .collect())
    }

    /// Numeric cells widened to `f64`, or `None` for non-numeric columns.
    pub fn to_f64(&self) -> Option<Vec<Option<f64>>> {
        match self {
            Column::Int(v) => Some(v.iter().map(|c| c.map(|i| i as f64)).collect()),
            Column::Float(v) => Some(v.clone()),
            _ => None,
        }
    }

    /// Row label form of the cell at `i`; `None` for missing cells and floats.
    pub fn label_at(&self, i: usize) -> Option<Label> {
        self.get(i).and_then(|s| s.to_label())
    }

    /// Compare two present cells of this column by natural order.
    ///
    /// Missing cells compare equal to everything; callers decide where
    /// missing values go.
    pub fn cmp_present(&self, a: usize, b: usize) -> Ordering {
        match self {
            Column::Int(v) => cmp_cells(&v[a], &v[b], |x, y| x.cmp(y)),
            Column::Float(v) => cmp_cells(&v[a], &v[b], |x, y| x.total_cmp(y)),
            Column::Text(v) => cmp_cells(&v[a], &v[b], |x, y| x.cmp(y)),
            Column::Date(v) => cmp_cells(&v[a], &v[b], |x, y| x.cmp(y)),
        }
    }

    /// Build a column from loose cells. The first present cell decides the
    /// type; integers promote to floats when floats are mixed in. An
    /// all-missing input yields a float column.
    pub fn from_scalars(cells: Vec<Option<Scalar>>) -> Result<Column, FrameError> {
        let mut dtype: Option<DType> = None;
        for cell in cells.iter().flatten() {
            dtype = match (dtype, cell.dtype()) {
                (None, d) => Some(d),
                (Some(a), b) if a == b => Some(a),
                (Some(DType::Int), DType::Float) | (Some(DType::Float), DType::Int) => {
                    Some(DType::Float)
                }
                (Some(a), b) => {
                    return Err(FrameError::TypeMismatch {
                        column: String::new(),
                        expected: a.name(),
                        actual: b,
                    })
                }
            };
        }

        let column = match dtype.unwrap_or(DType::Float) {
            DType::Int => Column::Int(
                cells
                    .into_iter()
                    .map(|c| match c {
                        Some(Scalar::Int(i)) => Some(i),
                        _ => None,
                    })
                    .collect(),
            ),
            DType::Float => Column::Float(
                cells
                    .into_iter()
                    .map(|c| c.and_then(|s| s.as_f64()))
                    .collect(),
            ),
            DType::Text => Column::Text(
                cells
                    .into_iter()
                    .map(|c| match c {
                        Some(Scalar::Text(s)) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            DType::Date => Column::Date(
                cells
                    .into_iter()
                    .map(|c| c.and_then(|s| s.as_date()))
                    .collect(),
            ),
        };
        Ok(column)
    }
}

fn cmp_cells<T>(a: &Option<T>, b: &Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        _ => Ordering::Equal,
    }
}

impl From<Vec<i64>> for Column {
    fn from(values: Vec<i64>) -> Self {
        Column::Int(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<i64>>> for Column {
    fn from(values: Vec<Option<i64>>) -> Self {
        Column::Int(values)
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Float(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<f64>>> for Column {
    fn from(values: Vec<Option<f64>>) -> Self {
        Column::Float(values)
    }
}

impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        Column::Text(values.into_iter().map(|s| Some(s.to_string())).collect())
    }
}

impl From<Vec<String>> for Column {
    fn from(values: Vec<String>) -> Self {
        Column::Text(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<String>>> for Column {
    fn from(values: Vec<Option<String>>) -> Self {
        Column::Text(values)
    }
}

impl From<Vec<NaiveDate>> for Column {
    fn from(values: Vec<NaiveDate>) -> Self {
        Column::Date(values.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<NaiveDate>>> for Column {
    fn from(values: Vec<Option<NaiveDate>>) -> Self {
        Column::Date(values)
    }
}
