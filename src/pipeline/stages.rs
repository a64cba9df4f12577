//! The nine showcase stages.

use std::fmt;

use rand::Rng;

use super::datasets;
use crate::chart::base::{
    LIGHTCORAL_COLOR, MEDIUMSEAGREEN_COLOR, PURPLE_COLOR, SKYBLUE_COLOR, TEAL_COLOR,
};
use crate::chart::ChartSpec;
use crate::error::Result;
use crate::frame::{DType, Scalar, Series};
use crate::ops::{all_imputers, Aggregation, JoinKind, SortKey};
use crate::render::RenderSink;

/// One self-contained showcase step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Alignment,
    TimeSeries,
    Arithmetic,
    MissingData,
    Merge,
    Cleaning,
    GroupBy,
    CustomFunction,
    Sorting,
}

impl Stage {
    /// Every stage in presentation order.
    pub fn all() -> [Stage; 9] {
        [
            Stage::Alignment,
            Stage::TimeSeries,
            Stage::Arithmetic,
            Stage::MissingData,
            Stage::Merge,
            Stage::Cleaning,
            Stage::GroupBy,
            Stage::CustomFunction,
            Stage::Sorting,
        ]
    }

    /// 1-based position in the report.
    pub fn number(&self) -> usize {
        *self as usize + 1
    }

    pub fn title(&self) -> &'static str {
        match self {
            Stage::Alignment => "Labeled Data + Automatic Alignment",
            Stage::TimeSeries => "Time Series & Non-Time Series",
            Stage::Arithmetic => "Arithmetic & Aggregation with Metadata",
            Stage::MissingData => "Missing Data Handling",
            Stage::Merge => "Merge/Join Like SQL",
            Stage::Cleaning => "Data Cleaning & Preparation Pipeline",
            Stage::GroupBy => "Groupby and Aggregation",
            Stage::CustomFunction => "Applying Custom Functions",
            Stage::Sorting => "Sorting Data",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stage::Alignment => {
                "Arithmetic between labeled series aligns values by label (index), not by position."
            }
            Stage::TimeSeries => {
                "Time series data gets a date index, while plain lists keep a positional index."
            }
            Stage::Arithmetic => {
                "Metadata such as the series name is preserved through arithmetic and aggregations."
            }
            Stage::MissingData => {
                "Missing values can be filled or dropped, which is crucial for data cleaning."
            }
            Stage::Merge => {
                "Combine tables with join types (inner, left, right, outer) similar to SQL operations."
            }
            Stage::Cleaning => {
                "A combined example of data generation, missing value imputation and visualization."
            }
            Stage::GroupBy => {
                "Group rows by a column and aggregate another (sum, mean, count) to analyze patterns."
            }
            Stage::CustomFunction => "Apply a custom function row-wise to derive a new column.",
            Stage::Sorting => "Sort a table by the values in one or more columns.",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

fn open(stage: Stage, sink: &mut dyn RenderSink) -> Result<()> {
    sink.heading(&stage.to_string())?;
    sink.note(stage.description())?;
    Ok(())
}

/// Aggregate value in the column's own type where it has one.
fn typed_value(series: &Series, value: Option<f64>) -> Option<Scalar> {
    match series.dtype() {
        DType::Int => value.map(|v| Scalar::Int(v as i64)),
        _ => value.map(Scalar::Float),
    }
}

pub(crate) fn alignment(sink: &mut dyn RenderSink) -> Result<()> {
    open(Stage::Alignment, sink)?;
    let q1 = datasets::sales_q1()?;
    let q2 = datasets::sales_q2()?;
    let total = q1.add(&q2)?;

    sink.series("Sales Q1:", &q1)?;
    sink.series("Sales Q2:", &q2)?;
    sink.series("Aligned Result (Sum of Sales):", &total)?;

    let chart = ChartSpec::bar("Automatic Alignment of Labels (Sum of Sales)")
        .axis_labels("City", "Total Sales")
        .color(SKYBLUE_COLOR)
        .figsize(8, 4)
        .with_series(&total)?;
    sink.chart(&chart)?;
    Ok(())
}

pub(crate) fn time_series<R: Rng + ?Sized>(sink: &mut dyn RenderSink, rng: &mut R) -> Result<()> {
    open(Stage::TimeSeries, sink)?;
    let prices = datasets::stock_prices(rng)?;
    let products = datasets::products();

    sink.series("Time Series Data (Daily Stock Prices):", &prices)?;
    sink.series("Non-Time Series Data (Product List):", &products)?;

    let chart = ChartSpec::line("Stock Prices Over Time")
        .axis_labels("Date", "Price ($)")
        .color(PURPLE_COLOR)
        .markers(true)
        .grid(true)
        .figsize(10, 5)
        .with_series(&prices)?;
    sink.chart(&chart)?;
    Ok(())
}

pub(crate) fn arithmetic(sink: &mut dyn RenderSink) -> Result<()> {
    open(Stage::Arithmetic, sink)?;
    let players = datasets::player_scores();

    sink.series("Players Scores:", &players)?;
    sink.scalar("Average Score:", players.mean()?.map(Scalar::Float))?;
    sink.scalar("Maximum Score:", typed_value(&players, players.max()?))?;
    sink.series("Scores + 5 Bonus Runs:", &players.add_scalar(5.0)?)?;
    Ok(())
}

pub(crate) fn missing_data(sink: &mut dyn RenderSink) -> Result<()> {
    open(Stage::MissingData, sink)?;
    let sample = datasets::sample_with_missing()?;

    sink.series("Original Data with Missing Values:", &sample)?;
    for (caption, imputer) in all_imputers() {
        sink.series(&format!("{}:", caption), &imputer(&sample)?)?;
    }
    Ok(())
}

pub(crate) fn merge(sink: &mut dyn RenderSink) -> Result<()> {
    open(Stage::Merge, sink)?;
    let customers = datasets::customers()?;
    let orders = datasets::orders()?;

    sink.table("Customer Data:", &customers)?;
    sink.table("Order Data:", &orders)?;

    let joins = [
        (JoinKind::Outer, "Outer Merge (union of keys, missing where no match):"),
        (JoinKind::Inner, "Inner Merge (intersection of keys):"),
        (JoinKind::Left, "Left Merge (all keys from left, matching from right):"),
        (JoinKind::Right, "Right Merge (all keys from right, matching from left):"),
    ];
    for (how, caption) in joins {
        sink.rule()?;
        sink.table(caption, &customers.merge(&orders, "CustID", how)?)?;
    }
    Ok(())
}

pub(crate) fn cleaning(sink: &mut dyn RenderSink) -> Result<()> {
    open(Stage::Cleaning, sink)?;
    sink.table("Original Raw Data:", &datasets::weekly_sales()?)?;

    sink.rule()?;
    sink.note("Step 1: Fill Missing Sales with Mean")?;
    let cleaned = datasets::cleaned_weekly_sales()?;
    sink.table("Data After Imputing Missing Sales:", &cleaned)?;

    let chart = ChartSpec::line("Sales Over Time (Cleaned Data)")
        .axis_labels("Date", "Sales Amount")
        .color(TEAL_COLOR)
        .markers(true)
        .grid(true)
        .figsize(10, 5)
        .with_columns(&cleaned, "Date", "Sales")?;
    sink.chart(&chart)?;
    Ok(())
}

pub(crate) fn group_by(sink: &mut dyn RenderSink) -> Result<()> {
    open(Stage::GroupBy, sink)?;
    let cleaned = datasets::cleaned_weekly_sales()?;
    sink.table("Original Data for Groupby:", &cleaned)?;

    sink.rule()?;
    let by_city = cleaned.group_by("City")?.sorted().aggregate("Sales", Aggregation::Sum)?;
    sink.table("Sales by City:", &by_city)?;
    let chart = ChartSpec::bar("Total Sales by City")
        .axis_labels("City", "Total Sales")
        .color(LIGHTCORAL_COLOR)
        .figsize(8, 5)
        .with_columns(&by_city, "City", "Sales")?;
    sink.chart(&chart)?;

    sink.rule()?;
    let by_region = cleaned.group_by("Region")?.sorted().aggregate("Sales", Aggregation::Mean)?;
    sink.table("Average Sales by Region:", &by_region)?;
    let chart = ChartSpec::bar("Average Sales by Region")
        .axis_labels("Region", "Average Sales")
        .color(MEDIUMSEAGREEN_COLOR)
        .figsize(8, 5)
        .with_columns(&by_region, "Region", "Sales")?;
    sink.chart(&chart)?;
    Ok(())
}

pub(crate) fn custom_function(sink: &mut dyn RenderSink) -> Result<()> {
    open(Stage::CustomFunction, sink)?;
    let bands = datasets::sales_bands()?;
    for band in bands.bands() {
        sink.note(&band.to_string())?;
    }
    sink.note(&format!("{}: otherwise", bands.otherwise()))?;
    sink.table(
        "Data with New Sales Category Column:",
        &datasets::categorized_weekly_sales()?,
    )?;
    Ok(())
}

pub(crate) fn sorting(sink: &mut dyn RenderSink) -> Result<()> {
    open(Stage::Sorting, sink)?;
    let table = datasets::categorized_weekly_sales()?;

    sink.table("Sorted by Sales (Ascending):", &table.sort_by(&[SortKey::asc("Sales")])?)?;
    sink.rule()?;
    sink.table("Sorted by Date (Descending):", &table.sort_by(&[SortKey::desc("Date")])?)?;
    Ok(())
}
