//! Missing-value imputation.
//!
//! Every strategy returns a new series; the input is never modified.
//! Boundary gaps that forward/backward fill cannot reach stay missing, and
//! mean-fill over a series with no present values is a no-op.

use tracing::{debug, warn};

use crate::error::FrameError;
use crate::frame::{Column, Series, Table};

/// How to replace missing values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillStrategy {
    /// Mean of the present values, computed once before substitution
    Mean,
    /// Literal zero
    Zero,
    /// A given constant
    Value(f64),
    /// Nearest preceding present value
    Forward,
    /// Nearest following present value
    Backward,
}

impl FillStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            FillStrategy::Mean => "mean",
            FillStrategy::Zero => "zero",
            FillStrategy::Value(_) => "value",
            FillStrategy::Forward => "forward",
            FillStrategy::Backward => "backward",
        }
    }
}

impl Series {
    /// Replace missing values according to `strategy`.
    pub fn fill_missing(&self, strategy: FillStrategy) -> Result<Series, FrameError> {
        let before = self.data().missing_count();
        let filled = match strategy {
            FillStrategy::Mean => match self.mean()? {
                Some(mean) => fill_constant(self, mean)?,
                None => {
                    warn!(series = %self.name(), "mean is undefined, leaving missing values in place");
                    self.clone()
                }
            },
            FillStrategy::Zero => fill_constant(self, 0.0)?,
            FillStrategy::Value(value) => fill_constant(self, value)?,
            FillStrategy::Forward => self.ffill(),
            FillStrategy::Backward => self.bfill(),
        };
        debug!(
            series = %self.name(),
            strategy = strategy.name(),
            before,
            after = filled.data().missing_count(),
            "filled missing values"
        );
        Ok(filled)
    }

    /// Fill with the mean of the present values.
    pub fn fill_mean(&self) -> Result<Series, FrameError> {
        self.fill_missing(FillStrategy::Mean)
    }

    /// Fill with a constant.
    pub fn fill_value(&self, value: f64) -> Result<Series, FrameError> {
        self.fill_missing(FillStrategy::Value(value))
    }

    /// Forward fill.
    pub fn ffill(&self) -> Series {
        self.with_data(self.data().take_opt(&forward_sources(self.data())))
    }

    /// Backward fill.
    pub fn bfill(&self) -> Series {
        self.with_data(self.data().take_opt(&backward_sources(self.data())))
    }

    /// Remove missing entries; survivors keep their labels.
    pub fn drop_missing(&self) -> Series {
        self.take(&self.data().present_positions())
    }
}

/// Replace missing cells of a numeric series with `value`. Integer columns
/// stay integer when the fill value is integral.
fn fill_constant(series: &Series, value: f64) -> Result<Series, FrameError> {
    let data = match series.data() {
        Column::Int(values) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            let fill = value as i64;
            Column::Int(values.iter().map(|v| Some(v.unwrap_or(fill))).collect())
        }
        _ => Column::Float(
            series
                .values_f64()?
                .into_iter()
                .map(|v| Some(v.unwrap_or(value)))
                .collect(),
        ),
    };
    Ok(series.with_data(data))
}

fn forward_sources(column: &Column) -> Vec<Option<usize>> {
    let mut last = None;
    (0..column.len())
        .map(|i| {
            if !column.is_missing(i) {
                last = Some(i);
            }
            last
        })
        .collect()
}

fn backward_sources(column: &Column) -> Vec<Option<usize>> {
    let mut next = None;
    let mut sources: Vec<Option<usize>> = (0..column.len())
        .rev()
        .map(|i| {
            if !column.is_missing(i) {
                next = Some(i);
            }
            next
        })
        .collect();
    sources.reverse();
    sources
}

impl Table {
    /// Replace the column `name` with its imputed version.
    pub fn fill_column(&mut self, name: &str, strategy: FillStrategy) -> Result<(), FrameError> {
        let filled = self.series(name)?.fill_missing(strategy)?;
        self.set_column(name, filled.data().clone())
    }

    /// Drop rows with a missing value in any of `subset`, or in any column
    /// when `subset` is empty.
    pub fn drop_missing_rows(&self, subset: &[&str]) -> Result<Table, FrameError> {
        let columns: Vec<&Column> = if subset.is_empty() {
            self.columns().map(|(_, c)| c).collect()
        } else {
            subset
                .iter()
                .map(|name| self.column(name))
                .collect::<Result<_, _>>()?
        };
        let keep: Vec<usize> = (0..self.nrows())
            .filter(|&row| columns.iter().all(|c| !c.is_missing(row)))
            .collect();
        Ok(self.take_rows(&keep))
    }
}

/// Series-to-series imputation function.
pub type Imputer = fn(&Series) -> Result<Series, FrameError>;

fn impute_mean(series: &Series) -> Result<Series, FrameError> {
    series.fill_missing(FillStrategy::Mean)
}

fn impute_drop(series: &Series) -> Result<Series, FrameError> {
    Ok(series.drop_missing())
}

fn impute_zero(series: &Series) -> Result<Series, FrameError> {
    series.fill_missing(FillStrategy::Zero)
}

fn impute_forward(series: &Series) -> Result<Series, FrameError> {
    Ok(series.ffill())
}

fn impute_backward(series: &Series) -> Result<Series, FrameError> {
    Ok(series.bfill())
}

/// All imputation variants with display captions, in presentation order.
pub fn all_imputers() -> Vec<(&'static str, Imputer)> {
    vec![
        ("Fill Missing with Average", impute_mean as Imputer),
        ("Drop Missing", impute_drop as Imputer),
        ("Fill Missing with 0", impute_zero as Imputer),
        (
            "Forward Fill Missing (fills with previous valid observation)",
            impute_forward as Imputer,
        ),
        (
            "Backward Fill Missing (fills with next valid observation)",
            impute_backward as Imputer,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Label, Scalar};

    fn sample() -> Series {
        Series::with_labels(
            "Sample Data",
            ["P1", "P2", "P3", "P4", "P5", "P6", "P7"],
            vec![Some(25.0), None, Some(30.0), None, Some(40.0), Some(50.0), None],
        )
        .unwrap()
    }

    fn values(series: &Series) -> Vec<Option<f64>> {
        series.values_f64().unwrap()
    }

    #[test]
    fn test_fill_mean() {
        let filled = sample().fill_mean().unwrap();
        assert_eq!(filled.data().missing_count(), 0);
        assert_eq!(filled.get("P2"), Some(Scalar::Float(36.25)));
        assert_eq!(filled.get("P1"), Some(Scalar::Float(25.0)));
    }

    #[test]
    fn test_fill_mean_idempotent() {
        let once = sample().fill_mean().unwrap();
        let twice = once.fill_mean().unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fill_mean_all_missing_is_noop() {
        let empty = Series::from_column("x", vec![None::<f64>, None]);
        let filled = empty.fill_mean().unwrap();
        assert_eq!(filled, empty);
    }

    #[test]
    fn test_drop_missing_keeps_labels() {
        let dropped = sample().drop_missing();
        assert_eq!(dropped.len(), 4);
        assert_eq!(
            dropped.index(),
            &[Label::from("P1"), Label::from("P3"), Label::from("P5"), Label::from("P6")]
        );
    }

    #[test]
    fn test_fill_zero() {
        let filled = sample().fill_missing(FillStrategy::Zero).unwrap();
        assert_eq!(values(&filled)[3], Some(0.0));
    }

    #[test]
    fn test_fill_value_keeps_int() {
        let ints = Series::from_column("n", vec![Some(1_i64), None]);
        let filled = ints.fill_value(7.0).unwrap();
        assert_eq!(filled.data(), &Column::Int(vec![Some(1), Some(7)]));
    }

    #[test]
    fn test_fill_value_beyond_int_range_widens() {
        let ints = Series::from_column("n", vec![Some(1_i64), None]);
        let filled = ints.fill_value(1e19).unwrap();
        assert_eq!(filled.data(), &Column::Float(vec![Some(1.0), Some(1e19)]));
    }

    #[test]
    fn test_forward_fill() {
        let filled = sample().ffill();
        assert_eq!(
            values(&filled),
            vec![Some(25.0), Some(25.0), Some(30.0), Some(30.0), Some(40.0), Some(50.0), Some(50.0)]
        );
    }

    #[test]
    fn test_backward_fill_leaves_trailing_gap() {
        let filled = sample().bfill();
        assert_eq!(
            values(&filled),
            vec![Some(25.0), Some(30.0), Some(30.0), Some(40.0), Some(40.0), Some(50.0), None]
        );
    }

    #[test]
    fn test_forward_fill_leaves_leading_gap() {
        let s = Series::from_column("x", vec![None, Some(1.0)]);
        assert_eq!(values(&s.ffill()), vec![None, Some(1.0)]);
    }

    #[test]
    fn test_forward_fill_text() {
        let s = Series::from_column("city", vec![Some("Delhi".to_string()), None]);
        assert_eq!(s.ffill().get(1_i64), Some(Scalar::Text("Delhi".into())));
    }

    #[test]
    fn test_numeric_fill_rejects_text() {
        let s = Series::from_column("city", vec![Some("Delhi".to_string()), None]);
        assert!(s.fill_missing(FillStrategy::Zero).is_err());
    }

    #[test]
    fn test_empty_series() {
        let s = Series::from_column("e", Vec::<f64>::new());
        for (_, imputer) in all_imputers() {
            assert!(imputer(&s).unwrap().is_empty());
        }
    }

    #[test]
    fn test_table_fill_and_drop() {
        let mut table = Table::from_columns(vec![
            ("Sales", Column::from(vec![Some(200.0), None, Some(250.0)])),
            ("City", Column::from(vec!["Delhi", "Mumbai", "Bangalore"])),
        ])
        .unwrap();
        assert_eq!(table.drop_missing_rows(&[]).unwrap().nrows(), 2);
        assert_eq!(table.drop_missing_rows(&["City"]).unwrap().nrows(), 3);

        table.fill_column("Sales", FillStrategy::Mean).unwrap();
        assert_eq!(table.get("Sales", 1).unwrap(), Some(Scalar::Float(225.0)));
        assert!(table.fill_column("Region", FillStrategy::Mean).is_err());
    }
}
