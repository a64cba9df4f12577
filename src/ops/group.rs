//! Group-and-aggregate.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::FrameError;
use crate::frame::{Column, DType, Label, Table};

/// Reduction applied to each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregation {
    Sum,
    Mean,
    Count,
    Max,
}

impl Aggregation {
    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Mean => "mean",
            Aggregation::Count => "count",
            Aggregation::Max => "max",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Rows of a table partitioned by the distinct values of one column.
///
/// Groups are kept in first-appearance order unless `sorted` is requested.
/// Rows whose key is missing belong to no group.
#[derive(Debug)]
pub struct GroupBy<'a> {
    table: &'a Table,
    key: String,
    /// (group label, member rows), member rows in table order
    groups: Vec<(Label, Vec<usize>)>,
}

impl<'a> GroupBy<'a> {
    fn new(table: &'a Table, key: &str) -> Result<Self, FrameError> {
        let column = table.column(key)?;
        if column.dtype() == DType::Float {
            return Err(FrameError::TypeMismatch {
                column: key.to_string(),
                expected: "int, text or date",
                actual: DType::Float,
            });
        }

        let mut slots: HashMap<Label, usize> = HashMap::new();
        let mut groups: Vec<(Label, Vec<usize>)> = Vec::new();
        for row in 0..column.len() {
            let Some(label) = column.label_at(row) else {
                continue;
            };
            match slots.get(&label) {
                Some(&slot) => groups[slot].1.push(row),
                None => {
                    slots.insert(label.clone(), groups.len());
                    groups.push((label, vec![row]));
                }
            }
        }

        Ok(Self {
            table,
            key: key.to_string(),
            groups,
        })
    }

    /// Order groups by key ascending instead of first appearance.
    pub fn sorted(mut self) -> Self {
        self.groups.sort_by(|a, b| a.0.cmp(&b.0));
        self
    }

    pub fn ngroups(&self) -> usize {
        self.groups.len()
    }

    /// Group labels in output order.
    pub fn keys(&self) -> Vec<&Label> {
        self.groups.iter().map(|(label, _)| label).collect()
    }

    /// Reduce `target` within each group.
    ///
    /// Returns a table `{key, target}` with one row per group and a fresh
    /// positional index. Missing target values are skipped: the sum or
    /// count of nothing is zero, the mean or max of nothing is missing.
    pub fn aggregate(&self, target: &str, agg: Aggregation) -> Result<Table, FrameError> {
        let column = self.table.column(target)?;
        let key_column = self.table.column(&self.key)?;

        let first_rows: Vec<usize> = self.groups.iter().map(|(_, rows)| rows[0]).collect();
        let keys = key_column.take(&first_rows);

        let values = match agg {
            Aggregation::Count => Column::Int(
                self.groups
                    .iter()
                    .map(|(_, rows)| Some(rows.iter().filter(|&&r| !column.is_missing(r)).count() as i64))
                    .collect(),
            ),
            _ => aggregate_numeric(column, target, &self.groups, agg)?,
        };

        debug!(
            key = %self.key,
            target,
            agg = %agg,
            groups = self.groups.len(),
            "aggregated groups"
        );

        let mut result = Table::new();
        result.push_column(self.key.clone(), keys)?;
        if target == self.key {
            // Aggregating the key itself still yields two columns.
            result.push_column(format!("{}_{}", target, agg), values)?;
        } else {
            result.push_column(target, values)?;
        }
        Ok(result)
    }
}

fn aggregate_numeric(
    column: &Column,
    target: &str,
    groups: &[(Label, Vec<usize>)],
    agg: Aggregation,
) -> Result<Column, FrameError> {
    match column {
        Column::Int(values) if agg != Aggregation::Mean => Ok(Column::Int(
            groups
                .iter()
                .map(|(_, rows)| {
                    let mut present = rows.iter().filter_map(|&r| values[r]);
                    match agg {
                        Aggregation::Max => present.max(),
                        // Overflow gives a missing sum.
                        _ => present.try_fold(0_i64, |acc, v| acc.checked_add(v)),
                    }
                })
                .collect(),
        )),
        _ => {
            let values = column.to_f64().ok_or_else(|| FrameError::TypeMismatch {
                column: target.to_string(),
                expected: "numeric",
                actual: column.dtype(),
            })?;
            Ok(Column::Float(
                groups
                    .iter()
                    .map(|(_, rows)| {
                        let present: Vec<f64> = rows.iter().filter_map(|&r| values[r]).collect();
                        match agg {
                            Aggregation::Sum => Some(present.iter().sum()),
                            Aggregation::Mean if present.is_empty() => None,
                            Aggregation::Mean => Some(present.iter().sum::<f64>() / present.len() as f64),
                            Aggregation::Max => present.into_iter().reduce(f64::max),
                            Aggregation::Count => Some(present.len() as f64),
                        }
                    })
                    .collect(),
            ))
        }
    }
}

impl Table {
    /// Partition rows by the distinct values of `key`.
    pub fn group_by(&self, key: &str) -> Result<GroupBy<'_>, FrameError> {
        GroupBy::new(self, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Scalar;

    fn sales() -> Table {
        Table::from_columns(vec![
            ("City", Column::from(vec!["Delhi", "Mumbai", "Delhi", "Pune", "Mumbai"])),
            ("Region", Column::from(vec!["North", "West", "North", "West", "West"])),
            ("Sales", Column::from(vec![Some(200.0), None, Some(300.0), Some(250.0), Some(100.0)])),
            ("Units", Column::from(vec![2_i64, 4, 6, 1, 3])),
        ])
        .unwrap()
    }

    fn text(value: &str) -> Option<Scalar> {
        Some(Scalar::Text(value.to_string()))
    }

    #[test]
    fn test_sum_in_first_appearance_order() {
        let table = sales();
        let result = table.group_by("City").unwrap().aggregate("Sales", Aggregation::Sum).unwrap();
        assert_eq!(result.nrows(), 3);
        assert_eq!(result.column_names(), &["City".to_string(), "Sales".to_string()]);
        assert_eq!(result.get("City", 0).unwrap(), text("Delhi"));
        assert_eq!(result.get("City", 1).unwrap(), text("Mumbai"));
        assert_eq!(result.get("Sales", 0).unwrap(), Some(Scalar::Float(500.0)));
        assert_eq!(result.get("Sales", 1).unwrap(), Some(Scalar::Float(100.0)));
        assert_eq!(result.index()[2], Label::Int(2));
    }

    #[test]
    fn test_sorted_groups() {
        let table = sales();
        let result = table
            .group_by("City")
            .unwrap()
            .sorted()
            .aggregate("Sales", Aggregation::Sum)
            .unwrap();
        assert_eq!(result.get("City", 0).unwrap(), text("Delhi"));
        assert_eq!(result.get("City", 1).unwrap(), text("Mumbai"));
        assert_eq!(result.get("City", 2).unwrap(), text("Pune"));
    }

    #[test]
    fn test_mean_skips_missing() {
        let table = sales();
        let result = table.group_by("Region").unwrap().aggregate("Sales", Aggregation::Mean).unwrap();
        assert_eq!(result.get("Sales", 0).unwrap(), Some(Scalar::Float(250.0)));
        assert_eq!(result.get("Sales", 1).unwrap(), Some(Scalar::Float(175.0)));
    }

    #[test]
    fn test_count_and_max() {
        let table = sales();
        let groups = table.group_by("City").unwrap();
        let count = groups.aggregate("Sales", Aggregation::Count).unwrap();
        assert_eq!(count.get("Sales", 1).unwrap(), Some(Scalar::Int(1)));
        let max = groups.aggregate("Units", Aggregation::Max).unwrap();
        assert_eq!(max.get("Units", 0).unwrap(), Some(Scalar::Int(6)));
    }

    #[test]
    fn test_int_sum_overflow_is_missing() {
        let table = Table::from_columns(vec![
            ("k", Column::from(vec!["a", "a", "b"])),
            ("v", Column::from(vec![i64::MAX, 1, 5])),
        ])
        .unwrap();
        let result = table.group_by("k").unwrap().aggregate("v", Aggregation::Sum).unwrap();
        assert_eq!(result.get("v", 0).unwrap(), None);
        assert_eq!(result.get("v", 1).unwrap(), Some(Scalar::Int(5)));
    }

    #[test]
    fn test_group_sums_add_up_to_total() {
        let table = sales();
        let total = table.series("Sales").unwrap().sum().unwrap();
        for key in ["City", "Region"] {
            let grouped = table.group_by(key).unwrap().aggregate("Sales", Aggregation::Sum).unwrap();
            let grouped_total = grouped.series("Sales").unwrap().sum().unwrap();
            assert_eq!(grouped_total, total);
        }
    }

    #[test]
    fn test_all_missing_group() {
        let table = Table::from_columns(vec![
            ("k", Column::from(vec!["a", "b"])),
            ("v", Column::from(vec![Some(1.0), None])),
        ])
        .unwrap();
        let groups = table.group_by("k").unwrap();
        let sum = groups.aggregate("v", Aggregation::Sum).unwrap();
        assert_eq!(sum.get("v", 1).unwrap(), Some(Scalar::Float(0.0)));
        let mean = groups.aggregate("v", Aggregation::Mean).unwrap();
        assert_eq!(mean.get("v", 1).unwrap(), None);
    }

    #[test]
    fn test_missing_keys_excluded() {
        let table = Table::from_columns(vec![
            ("k", Column::from(vec![Some("a".to_string()), None])),
            ("v", Column::from(vec![1.0, 2.0])),
        ])
        .unwrap();
        assert_eq!(table.group_by("k").unwrap().ngroups(), 1);
    }

    #[test]
    fn test_empty_table() {
        let table = sales().take_rows(&[]);
        let result = table.group_by("City").unwrap().aggregate("Sales", Aggregation::Sum).unwrap();
        assert_eq!(result.nrows(), 0);
        assert_eq!(result.ncols(), 2);
    }

    #[test]
    fn test_errors() {
        let table = sales();
        assert!(matches!(table.group_by("Nope"), Err(FrameError::ColumnNotFound(_))));
        assert!(matches!(table.group_by("Sales"), Err(FrameError::TypeMismatch { .. })));
        let groups = table.group_by("City").unwrap();
        assert!(matches!(
            groups.aggregate("Region", Aggregation::Sum),
            Err(FrameError::TypeMismatch { .. })
        ));
    }
}
