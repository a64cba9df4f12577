//! Row-wise classification of numeric values into labelled bands.

use std::fmt;

use tracing::debug;

use crate::error::FrameError;
use crate::frame::{Column, Series, Table};

/// One side of a band interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Unbounded,
    Inclusive(f64),
    Exclusive(f64),
}

impl Bound {
    fn admits_above(&self, x: f64) -> bool {
        match *self {
            Bound::Unbounded => true,
            Bound::Inclusive(b) => x >= b,
            Bound::Exclusive(b) => x > b,
        }
    }

    fn admits_below(&self, x: f64) -> bool {
        match *self {
            Bound::Unbounded => true,
            Bound::Inclusive(b) => x <= b,
            Bound::Exclusive(b) => x < b,
        }
    }
}

/// True when some value satisfies both `lower` and `upper`.
fn admits(lower: Bound, upper: Bound) -> bool {
    match (lower, upper) {
        (Bound::Unbounded, _) | (_, Bound::Unbounded) => true,
        (Bound::Inclusive(l), Bound::Inclusive(u)) => l <= u,
        (Bound::Inclusive(l) | Bound::Exclusive(l), Bound::Inclusive(u) | Bound::Exclusive(u)) => l < u,
    }
}

/// A labelled interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub label: String,
    pub lower: Bound,
    pub upper: Bound,
}

impl Band {
    pub fn new(label: impl Into<String>, lower: Bound, upper: Bound) -> Self {
        Self {
            label: label.into(),
            lower,
            upper,
        }
    }

    /// `x > threshold`
    pub fn above(label: impl Into<String>, threshold: f64) -> Self {
        Self::new(label, Bound::Exclusive(threshold), Bound::Unbounded)
    }

    /// `low <= x <= high`
    pub fn between(label: impl Into<String>, low: f64, high: f64) -> Self {
        Self::new(label, Bound::Inclusive(low), Bound::Inclusive(high))
    }

    /// `x < threshold`
    pub fn below(label: impl Into<String>, threshold: f64) -> Self {
        Self::new(label, Bound::Unbounded, Bound::Exclusive(threshold))
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lower.admits_above(x) && self.upper.admits_below(x)
    }

    fn overlaps(&self, other: &Band) -> bool {
        admits(self.lower, other.upper) && admits(other.lower, self.upper)
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lower = match self.lower {
            Bound::Unbounded => "(-inf".to_string(),
            Bound::Inclusive(b) => format!("[{}", b),
            Bound::Exclusive(b) => format!("({}", b),
        };
        let upper = match self.upper {
            Bound::Unbounded => "inf)".to_string(),
            Bound::Inclusive(b) => format!("{}]", b),
            Bound::Exclusive(b) => format!("{})", b),
        };
        write!(f, "{}: {}, {}", self.label, lower, upper)
    }
}

/// Disjoint bands plus a catch-all label, so every number has exactly one
/// class.
#[derive(Debug, Clone, PartialEq)]
pub struct Bands {
    bands: Vec<Band>,
    otherwise: String,
}

impl Bands {
    pub fn new(bands: Vec<Band>, otherwise: impl Into<String>) -> Result<Self, FrameError> {
        for band in &bands {
            if !admits(band.lower, band.upper) {
                return Err(FrameError::EmptyBand(band.label.clone()));
            }
        }
        for (i, first) in bands.iter().enumerate() {
            if let Some(second) = bands[i + 1..].iter().find(|b| first.overlaps(b)) {
                return Err(FrameError::OverlappingBands {
                    first: first.label.clone(),
                    second: second.label.clone(),
                });
            }
        }
        Ok(Self {
            bands,
            otherwise: otherwise.into(),
        })
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn otherwise(&self) -> &str {
        &self.otherwise
    }

    /// Label of the band holding `x`. NaN falls through to the catch-all.
    pub fn classify(&self, x: f64) -> &str {
        self.bands
            .iter()
            .find(|b| b.contains(x))
            .map_or(self.otherwise.as_str(), |b| b.label.as_str())
    }

    /// Classify every value of a numeric series; missing stays missing.
    pub fn classify_series(&self, series: &Series) -> Result<Series, FrameError> {
        let labels = series
            .values_f64()?
            .into_iter()
            .map(|v| v.map(|x| self.classify(x).to_string()))
            .collect();
        Ok(series.with_data(Column::Text(labels)))
    }
}

impl Table {
    /// Add (or replace) `target` with the band label of each `source` value.
    pub fn classify_column(&mut self, source: &str, target: &str, bands: &Bands) -> Result<(), FrameError> {
        let classified = bands.classify_series(&self.series(source)?)?;
        debug!(source, target, rows = self.nrows(), "classified column");
        self.set_column(target, classified.data().clone())
    }
}
