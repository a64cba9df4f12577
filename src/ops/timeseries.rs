//! Calendar ranges and time-indexed series.

use chrono::{Days, Months, NaiveDate};
use rand::Rng;
use std::fmt;

use crate::error::FrameError;
use crate::frame::{Column, Label, Series};

/// Step between consecutive points of a date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    /// One calendar day
    Day,
    /// Seven calendar days
    Week,
    /// One calendar month, clamped to the last day of shorter months
    Month,
}

impl Frequency {
    pub fn code(&self) -> &'static str {
        match self {
            Frequency::Day => "D",
            Frequency::Week => "W",
            Frequency::Month => "M",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "D" => Some(Frequency::Day),
            "W" => Some(Frequency::Week),
            "M" => Some(Frequency::Month),
            _ => None,
        }
    }

    /// The `k`-th point after `start`.
    fn offset(&self, start: NaiveDate, k: u32) -> Option<NaiveDate> {
        match self {
            Frequency::Day => start.checked_add_days(Days::new(u64::from(k))),
            Frequency::Week => start.checked_add_days(Days::new(7 * u64::from(k))),
            Frequency::Month => start.checked_add_months(Months::new(k)),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Parse a date in `YYYY-MM-DD` or `YYYYMMDD` form.
pub fn parse_date(text: &str) -> Result<NaiveDate, FrameError> {
    let format = if text.contains('-') { "%Y-%m-%d" } else { "%Y%m%d" };
    NaiveDate::parse_from_str(text, format).map_err(|_| FrameError::InvalidDate(text.to_string()))
}

/// `periods` consecutive dates starting at `start`.
pub fn date_range(start: NaiveDate, periods: usize, freq: Frequency) -> Result<Vec<NaiveDate>, FrameError> {
    (0..periods)
        .map(|k| {
            u32::try_from(k)
                .ok()
                .and_then(|k| freq.offset(start, k))
                .ok_or_else(|| FrameError::DateOutOfRange(format!("{} + {} x {}", start, k, freq)))
        })
        .collect()
}

/// `count` integers drawn uniformly from `[low, high)`.
pub fn random_integers<R: Rng + ?Sized>(
    rng: &mut R,
    low: i64,
    high: i64,
    count: usize,
) -> Result<Vec<i64>, FrameError> {
    if high <= low {
        return Err(FrameError::InvalidRange { low, high });
    }
    Ok((0..count).map(|_| rng.random_range(low..high)).collect())
}

/// Series indexed by a date range, one date per value.
pub fn time_series(
    name: impl Into<String>,
    start: &str,
    freq: Frequency,
    values: impl Into<Column>,
) -> Result<Series, FrameError> {
    let values = values.into();
    let dates = date_range(parse_date(start)?, values.len(), freq)?;
    Series::new(name, dates.into_iter().map(Label::Date).collect(), values)
}
