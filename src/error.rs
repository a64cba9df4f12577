//! Error types for the tabular core, chart rendering and report sinks.

use thiserror::Error;

use crate::frame::{DType, Label};

/// Errors raised by the data model and the transform operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    #[error("column '{0}' already exists")]
    DuplicateColumn(String),

    #[error("length mismatch: expected {expected} rows, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("column '{column}' has dtype {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: DType,
    },

    #[error("key column '{column}' has dtype {left} on the left and {right} on the right")]
    KeyTypeMismatch {
        column: String,
        left: DType,
        right: DType,
    },

    #[error("duplicate label {0} in index")]
    DuplicateLabel(Label),

    #[error("duplicate key {key} in join column '{column}'")]
    DuplicateKey { column: String, key: String },

    #[error("band '{first}' overlaps band '{second}'")]
    OverlappingBands { first: String, second: String },

    #[error("invalid band '{0}': lower bound exceeds upper bound")]
    EmptyBand(String),

    #[error("date out of range: {0}")]
    DateOutOfRange(String),

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("empty sampling range [{low}, {high})")]
    InvalidRange { low: i64, high: i64 },

    #[error("at least one sort key is required")]
    NoSortKeys,
}

/// Errors raised while drawing a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart '{title}' has {labels} labels but {values} values")]
    ShapeMismatch {
        title: String,
        labels: usize,
        values: usize,
    },

    #[error("drawing failed: {0}")]
    Draw(String),
}

/// Errors raised by report sinks.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Chart(#[from] ChartError),
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
