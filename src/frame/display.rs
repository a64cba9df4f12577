//! Plain-text rendering of series and tables.

use std::fmt;

use super::column::{Column, DType};
use super::series::Series;
use super::table::Table;

/// Format a float the way tables show it: integral values keep one
/// decimal place, others print up to six decimals without trailing zeros.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.1}", value);
    }
    let text = format!("{:.6}", value);
    let trimmed = text.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{}0", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Text shown for a missing cell of the given type.
pub fn missing_marker(dtype: DType) -> &'static str {
    match dtype {
        DType::Int | DType::Float => "NaN",
        DType::Date => "NaT",
        DType::Text => "None",
    }
}

/// Display text of one cell.
pub fn cell_text(column: &Column, row: usize) -> String {
    match column.get(row) {
        Some(value) => value.to_string(),
        None => missing_marker(column.dtype()).to_string(),
    }
}

fn width_of<'a>(cells: impl Iterator<Item = &'a String>) -> usize {
    cells.map(|c| c.chars().count()).max().unwrap_or(0)
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let footer = if self.name().is_empty() {
            format!("dtype: {}", self.dtype())
        } else {
            format!("Name: {}, dtype: {}", self.name(), self.dtype())
        };

        if self.is_empty() {
            return write!(f, "Series([], {})", footer);
        }

        let labels: Vec<String> = self.index().iter().map(|l| l.to_string()).collect();
        let values: Vec<String> = (0..self.len()).map(|i| cell_text(self.data(), i)).collect();
        let label_width = width_of(labels.iter());
        let value_width = width_of(values.iter());

        for (label, value) in labels.iter().zip(values.iter()) {
            writeln!(f, "{:<lw$}    {:>vw$}", label, value, lw = label_width, vw = value_width)?;
        }
        write!(f, "{}", footer)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(
                f,
                "Empty table\nColumns: [{}]\nIndex: []",
                self.column_names().join(", ")
            );
        }

        let labels: Vec<String> = self.index().iter().map(|l| l.to_string()).collect();
        let label_width = width_of(labels.iter());

        let mut rendered: Vec<(String, Vec<String>, usize)> = Vec::with_capacity(self.ncols());
        for (name, column) in self.columns() {
            let cells: Vec<String> = (0..self.nrows()).map(|i| cell_text(column, i)).collect();
            let width = width_of(cells.iter()).max(name.chars().count());
            rendered.push((name.to_string(), cells, width));
        }

        write!(f, "{:lw$}", "", lw = label_width)?;
        for (name, _, width) in &rendered {
            write!(f, "  {:>w$}", name, w = width)?;
        }

        for (row, label) in labels.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{:<lw$}", label, lw = label_width)?;
            for (_, cells, width) in &rendered {
                write!(f, "  {:>w$}", cells[row], w = width)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Label;

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(250.0), "250.0");
        assert_eq!(format_float(292.857142857), "292.857143");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(f64::NAN), "NaN");
    }

    #[test]
    fn test_series_display() {
        let s = Series::with_labels(
            "Sales",
            ["Bangalore", "Delhi"],
            vec![None, Some(250.0)],
        )
        .unwrap();
        let text = s.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Bangalore      NaN");
        assert_eq!(lines[1], "Delhi        250.0");
        assert_eq!(lines[2], "Name: Sales, dtype: float64");
    }

    #[test]
    fn test_empty_series_display() {
        let s = Series::new("", Vec::<Label>::new(), Column::empty(DType::Int)).unwrap();
        assert_eq!(s.to_string(), "Series([], dtype: int64)");
    }

    #[test]
    fn test_table_display() {
        let table = Table::from_columns(vec![
            ("CustID", Column::from(vec![1_i64, 2])),
            ("Orders", Column::from(vec![Some(5_i64), None])),
        ])
        .unwrap();
        let text = table.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "   CustID  Orders");
        assert_eq!(lines[1], "0       1       5");
        assert_eq!(lines[2], "1       2     NaN");
    }
}
