//! Report sinks.
//!
//! Pipeline stages never print directly. They describe their output as a
//! sequence of blocks handed to a `RenderSink`, and the sink decides how
//! the report looks: plain text, a single HTML page, JSON, or an in-memory
//! record.

mod html;
mod memory;
mod text;

use serde::Serialize;

use crate::chart::ChartSpec;
use crate::error::RenderError;
use crate::frame::{Scalar, Series, Table};

pub use html::HtmlSink;
pub use memory::{JsonSink, MemorySink};
pub use text::TextSink;

/// Destination for report output.
pub trait RenderSink {
    /// Section title.
    fn heading(&mut self, text: &str) -> Result<(), RenderError>;

    /// Explanatory paragraph.
    fn note(&mut self, text: &str) -> Result<(), RenderError>;

    /// Section divider.
    fn rule(&mut self) -> Result<(), RenderError>;

    fn series(&mut self, caption: &str, series: &Series) -> Result<(), RenderError>;

    fn table(&mut self, caption: &str, table: &Table) -> Result<(), RenderError>;

    /// A single value; `None` shows as missing.
    fn scalar(&mut self, caption: &str, value: Option<Scalar>) -> Result<(), RenderError>;

    fn chart(&mut self, spec: &ChartSpec) -> Result<(), RenderError>;
}

/// One unit of report output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Note { text: String },
    Rule,
    Series { caption: String, series: Series },
    Table { caption: String, table: Table },
    Scalar { caption: String, value: Option<Scalar> },
    Chart { spec: ChartSpec },
}

impl Block {
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Note { .. } => "note",
            Block::Rule => "rule",
            Block::Series { .. } => "series",
            Block::Table { .. } => "table",
            Block::Scalar { .. } => "scalar",
            Block::Chart { .. } => "chart",
        }
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Text,
    Html,
    Json,
}

impl ReportFormat {
    /// Parse a `report.format` setting value, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "html" => Some(ReportFormat::Html),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
        }
    }
}
