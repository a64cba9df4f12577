//! Frame Lab - labeled tabular data operations with static charts
//!
//! This crate provides a small in-memory data frame and a showcase
//! pipeline built on it:
//!
//! - Label-aligned arithmetic between series
//! - Date-indexed time series
//! - Missing value imputation
//! - SQL-style joins
//! - Group-by aggregation
//! - Threshold classification and multi-key sorting
//! - Bar and line charts rendered to SVG
//! - Pluggable report sinks (text, HTML, JSON)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use frame_lab::{MemorySink, Pipeline, PipelineConfig};
//!
//! let mut sink = MemorySink::new();
//! let mut pipeline = Pipeline::new(PipelineConfig::seeded(7));
//! pipeline.run(&mut sink).unwrap();
//! assert_eq!(sink.headings().len(), 9);
//! ```

pub mod chart;
pub mod error;
pub mod frame;
pub mod logger;
pub mod ops;
pub mod pipeline;
pub mod render;
pub mod setting;
pub mod utility;

#[cfg(feature = "polars")]
pub mod interop;

// Re-export commonly used types
pub use chart::{render_svg, ChartKind, ChartSpec, Rgb};
pub use error::{ChartError, Error, FrameError, RenderError, Result};
pub use frame::{Column, DType, Label, Scalar, Series, Table};
pub use ops::{Aggregation, Band, Bands, BinaryOp, FillStrategy, Frequency, JoinKind, SortKey};
pub use pipeline::{Pipeline, PipelineConfig, Stage};
pub use render::{Block, HtmlSink, JsonSink, MemorySink, RenderSink, ReportFormat, TextSink};
pub use setting::{Settings, SETTINGS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
