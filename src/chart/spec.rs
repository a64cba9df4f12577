//! Declarative chart description.

use std::fmt;

use serde::Serialize;

use super::base::{Rgb, DPI, SKYBLUE_COLOR};
use crate::error::ChartError;
use crate::frame::{cell_text, Series, Table};

/// Chart geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Bar => write!(f, "bar"),
            ChartKind::Line => write!(f, "line"),
        }
    }
}

/// A single-series bar or line chart.
///
/// `labels[i]` is the x tick text of `values[i]`; missing values leave a gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub values: Vec<Option<f64>>,
    pub color: Rgb,
    pub markers: bool,
    pub grid: bool,
    /// Pixel size (width, height)
    pub size: (u32, u32),
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            labels: Vec::new(),
            values: Vec::new(),
            color: SKYBLUE_COLOR,
            markers: false,
            grid: false,
            size: (8 * DPI, 4 * DPI),
        }
    }

    pub fn bar(title: impl Into<String>) -> Self {
        Self::new(ChartKind::Bar, title)
    }

    pub fn line(title: impl Into<String>) -> Self {
        Self::new(ChartKind::Line, title)
    }

    pub fn axis_labels(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_label = x.into();
        self.y_label = y.into();
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn markers(mut self, on: bool) -> Self {
        self.markers = on;
        self
    }

    pub fn grid(mut self, on: bool) -> Self {
        self.grid = on;
        self
    }

    /// Figure size in inches, rendered at `DPI`.
    pub fn figsize(mut self, width: u32, height: u32) -> Self {
        self.size = (width * DPI, height * DPI);
        self
    }

    pub fn data(mut self, labels: Vec<String>, values: Vec<Option<f64>>) -> Self {
        self.labels = labels;
        self.values = values;
        self
    }

    /// Plot a numeric series against its index labels.
    pub fn with_series(self, series: &Series) -> Result<Self, ChartError> {
        let values = series.values_f64().map_err(|e| ChartError::Draw(e.to_string()))?;
        let labels = series.index().iter().map(|l| l.to_string()).collect();
        Ok(self.data(labels, values))
    }

    /// Plot column `y` against the cells of column `x`.
    pub fn with_columns(self, table: &Table, x: &str, y: &str) -> Result<Self, ChartError> {
        let x_column = table.column(x).map_err(|e| ChartError::Draw(e.to_string()))?;
        let labels = (0..table.nrows()).map(|r| cell_text(x_column, r)).collect();
        let values = table
            .series(y)
            .and_then(|s| s.values_f64())
            .map_err(|e| ChartError::Draw(e.to_string()))?;
        Ok(self.data(labels, values))
    }

    pub fn width(&self) -> u32 {
        self.size.0
    }

    pub fn height(&self) -> u32 {
        self.size.1
    }

    /// File name for the rendered chart, derived from the title.
    pub fn file_name(&self) -> String {
        let mut stem = String::new();
        for c in self.title.chars() {
            if c.is_ascii_alphanumeric() {
                stem.push(c.to_ascii_lowercase());
            } else if !stem.is_empty() && !stem.ends_with('_') {
                stem.push('_');
            }
        }
        let stem = stem.trim_end_matches('_');
        if stem.is_empty() {
            format!("{}_chart.svg", self.kind)
        } else {
            format!("{}.svg", stem)
        }
    }

    /// Number of present values.
    pub fn points(&self) -> usize {
        self.values.iter().flatten().count()
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if self.labels.len() != self.values.len() {
            return Err(ChartError::ShapeMismatch {
                title: self.title.clone(),
                labels: self.labels.len(),
                values: self.values.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::base::PURPLE_COLOR;
    use crate::frame::Column;

    #[test]
    fn test_builder() {
        let spec = ChartSpec::line("Stock Prices Over Time")
            .axis_labels("Date", "Price ($)")
            .color(PURPLE_COLOR)
            .markers(true)
            .grid(true)
            .figsize(10, 5);
        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.size, (1000, 500));
        assert!(spec.markers && spec.grid);
    }

    #[test]
    fn test_with_series_uses_index_labels() {
        let series = Series::with_labels("s", ["Bangalore", "Delhi"], vec![None, Some(250.0)]).unwrap();
        let spec = ChartSpec::bar("t").with_series(&series).unwrap();
        assert_eq!(spec.labels, vec!["Bangalore".to_string(), "Delhi".to_string()]);
        assert_eq!(spec.points(), 1);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_with_columns() {
        let table = Table::from_columns(vec![
            ("City", Column::from(vec!["Delhi", "Mumbai"])),
            ("Sales", Column::from(vec![520_i64, 560])),
        ])
        .unwrap();
        let spec = ChartSpec::bar("Total Sales by City")
            .with_columns(&table, "City", "Sales")
            .unwrap();
        assert_eq!(spec.values, vec![Some(520.0), Some(560.0)]);
        assert!(ChartSpec::bar("x").with_columns(&table, "City", "City").is_err());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            ChartSpec::bar("Automatic Alignment of Labels (Sum of Sales)").file_name(),
            "automatic_alignment_of_labels_sum_of_sales.svg"
        );
        assert_eq!(ChartSpec::line("!!").file_name(), "line_chart.svg");
    }

    #[test]
    fn test_shape_mismatch() {
        let spec = ChartSpec::bar("t").data(vec!["a".into()], vec![]);
        assert!(matches!(spec.validate(), Err(ChartError::ShapeMismatch { .. })));
    }
}
