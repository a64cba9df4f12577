//! Conversion into polars data frames.
//!
//! Only compiled with the `polars` feature. Row labels are not carried
//! over; polars frames are positional.

use chrono::NaiveDate;
use polars::prelude::*;

use crate::frame::{Column as FrameColumn, Table};

fn days_since_epoch(date: NaiveDate) -> i32 {
    let epoch = NaiveDate::default();
    (date - epoch).num_days() as i32
}

fn to_polars_column(name: &str, column: &FrameColumn) -> PolarsResult<Column> {
    let name: PlSmallStr = name.into();
    let converted = match column {
        FrameColumn::Int(values) => Column::new(name, values.as_slice()),
        FrameColumn::Float(values) => Column::new(name, values.as_slice()),
        FrameColumn::Text(values) => {
            let values: Vec<Option<&str>> = values.iter().map(|v| v.as_deref()).collect();
            Column::new(name, values)
        }
        FrameColumn::Date(values) => {
            let days: Vec<Option<i32>> = values.iter().map(|v| v.map(days_since_epoch)).collect();
            Column::new(name, days).cast(&DataType::Date)?
        }
    };
    Ok(converted)
}

/// Copy every column of `table` into a polars `DataFrame`.
pub fn to_polars(table: &Table) -> PolarsResult<DataFrame> {
    let columns = table
        .columns()
        .map(|(name, column)| to_polars_column(name, column))
        .collect::<PolarsResult<Vec<_>>>()?;
    DataFrame::new(columns)
}
