//! Literal sample data for the showcase stages.
//!
//! Every builder returns a fresh value; nothing is cached or shared.

use rand::Rng;

use crate::error::FrameError;
use crate::frame::{Column, Series, Table};
use crate::ops::{date_range, parse_date, random_integers, time_series, Band, Bands, FillStrategy, Frequency};

pub const STOCK_START: &str = "2023-01-01";
pub const STOCK_DAYS: usize = 7;
pub const STOCK_LOW: i64 = 100;
pub const STOCK_HIGH: i64 = 200;

pub const WEEKLY_START: &str = "2023-01-01";
pub const WEEKLY_PERIODS: usize = 10;

/// Quarter one city sales.
pub fn sales_q1() -> Result<Series, FrameError> {
    Series::with_labels("Sales Q1", ["Delhi", "Mumbai"], vec![100_i64, 200])
}

/// Quarter two city sales.
pub fn sales_q2() -> Result<Series, FrameError> {
    Series::with_labels("Sales Q2", ["Delhi", "Bangalore"], vec![150_i64, 120])
}

/// Daily prices drawn from `[STOCK_LOW, STOCK_HIGH)`.
pub fn stock_prices<R: Rng + ?Sized>(rng: &mut R) -> Result<Series, FrameError> {
    let prices = random_integers(rng, STOCK_LOW, STOCK_HIGH, STOCK_DAYS)?;
    time_series("Stock Price", STOCK_START, Frequency::Day, prices)
}

pub fn products() -> Series {
    Series::from_column("Products", vec!["Shampoo", "Soap", "Toothpaste", "Brush", "Lotion"])
}

pub fn player_scores() -> Series {
    Series::from_pairs(
        "Player Scores",
        vec![("Virat", 45_i64), ("Rohit", 50), ("Rahul", 38), ("Dhoni", 60), ("Sachin", 75)],
    )
}

pub fn sample_with_missing() -> Result<Series, FrameError> {
    Series::with_labels(
        "Sample Data",
        ["P1", "P2", "P3", "P4", "P5", "P6", "P7"],
        vec![Some(25.0), None, Some(30.0), None, Some(40.0), Some(50.0), None],
    )
}

pub fn customers() -> Result<Table, FrameError> {
    Table::from_columns(vec![
        ("CustID", Column::from(vec![1_i64, 2, 3, 5])),
        ("Name", Column::from(vec!["Amit", "Neha", "Raj", "Priya"])),
        ("City", Column::from(vec!["Delhi", "Mumbai", "Pune", "Chennai"])),
    ])
}

pub fn orders() -> Result<Table, FrameError> {
    Table::from_columns(vec![
        ("CustID", Column::from(vec![1_i64, 2, 4, 3])),
        ("Orders", Column::from(vec![5_i64, 3, 2, 7])),
        ("Product", Column::from(vec!["Laptop", "Mouse", "Keyboard", "Monitor"])),
    ])
}

/// Ten weeks of sales with gaps, before any cleaning.
pub fn weekly_sales() -> Result<Table, FrameError> {
    let dates = date_range(parse_date(WEEKLY_START)?, WEEKLY_PERIODS, Frequency::Week)?;
    let cities = ["Delhi", "Mumbai", "Bangalore", "Chennai", "Kolkata"];
    let regions = ["North", "West", "South", "South", "East"];
    Table::from_columns(vec![
        ("Date", Column::from(dates)),
        (
            "Sales",
            Column::from(vec![
                Some(200.0),
                None,
                Some(250.0),
                Some(300.0),
                None,
                Some(320.0),
                Some(280.0),
                None,
                Some(350.0),
                Some(400.0),
            ]),
        ),
        ("City", Column::from(cities.repeat(2))),
        ("Region", Column::from(regions.repeat(2))),
    ])
}

/// Weekly sales with missing Sales replaced by the column mean.
pub fn cleaned_weekly_sales() -> Result<Table, FrameError> {
    let mut table = weekly_sales()?;
    table.fill_column("Sales", FillStrategy::Mean)?;
    Ok(table)
}

/// `> 300` High, `250..=300` Medium, otherwise Low.
pub fn sales_bands() -> Result<Bands, FrameError> {
    Bands::new(
        vec![Band::above("High", 300.0), Band::between("Medium", 250.0, 300.0)],
        "Low",
    )
}

/// Cleaned weekly sales plus the `Sales_Category` column.
pub fn categorized_weekly_sales() -> Result<Table, FrameError> {
    let mut table = cleaned_weekly_sales()?;
    table.classify_column("Sales", "Sales_Category", &sales_bands()?)?;
    Ok(table)
}
