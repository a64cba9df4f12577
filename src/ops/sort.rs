//! Stable multi-key sort.

use std::cmp::Ordering;

use tracing::debug;

use crate::error::FrameError;
use crate::frame::{Column, Table};

/// A column and its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: String,
    pub descending: bool,
}

impl SortKey {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: false,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            descending: true,
        }
    }
}

/// Order rows `a` and `b` by one column. Missing cells go last whatever
/// the direction.
fn compare_rows(column: &Column, descending: bool, a: usize, b: usize) -> Ordering {
    match (column.is_missing(a), column.is_missing(b)) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = column.cmp_present(a, b);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
    }
}

impl Table {
    /// Rows reordered by `keys`, first key most significant. Ties keep their
    /// original relative order, and index labels move with their rows.
    pub fn sort_by(&self, keys: &[SortKey]) -> Result<Table, FrameError> {
        if keys.is_empty() {
            return Err(FrameError::NoSortKeys);
        }
        let columns: Vec<(&Column, bool)> = keys
            .iter()
            .map(|k| self.column(&k.column).map(|c| (c, k.descending)))
            .collect::<Result<_, _>>()?;

        let mut order: Vec<usize> = (0..self.nrows()).collect();
        order.sort_by(|&a, &b| {
            columns
                .iter()
                .map(|(column, descending)| compare_rows(column, *descending, a, b))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        });

        debug!(keys = keys.len(), rows = order.len(), "sorted table");
        Ok(self.take_rows(&order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Label, Scalar};

    fn weekly() -> Table {
        Table::from_columns(vec![
            ("Region", Column::from(vec!["North", "West", "South", "South", "East", "North"])),
            (
                "Sales",
                Column::from(vec![Some(200.0), None, Some(250.0), Some(300.0), None, Some(320.0)]),
            ),
        ])
        .unwrap()
    }

    fn column_values(table: &Table, name: &str) -> Vec<Option<Scalar>> {
        (0..table.nrows()).map(|r| table.get(name, r).unwrap()).collect()
    }

    #[test]
    fn test_region_then_sales_desc() {
        let sorted = weekly()
            .sort_by(&[SortKey::asc("Region"), SortKey::desc("Sales")])
            .unwrap();
        let regions: Vec<String> = column_values(&sorted, "Region")
            .into_iter()
            .map(|s| s.map(|v| v.to_string()).unwrap_or_default())
            .collect();
        assert_eq!(regions, vec!["East", "North", "North", "South", "South", "West"]);
        assert_eq!(sorted.get("Sales", 1).unwrap(), Some(Scalar::Float(320.0)));
        assert_eq!(sorted.get("Sales", 3).unwrap(), Some(Scalar::Float(300.0)));
        assert_eq!(sorted.index()[1], Label::Int(5));
    }

    #[test]
    fn test_missing_last_in_both_directions() {
        let asc = weekly().sort_by(&[SortKey::asc("Sales")]).unwrap();
        let desc = weekly().sort_by(&[SortKey::desc("Sales")]).unwrap();
        for table in [asc, desc] {
            let values = column_values(&table, "Sales");
            assert_eq!(values[4], None);
            assert_eq!(values[5], None);
        }
    }

    #[test]
    fn test_stable_on_ties() {
        let sorted = weekly().sort_by(&[SortKey::asc("Region")]).unwrap();
        // North rows 0 and 5 keep their relative order.
        assert_eq!(sorted.index()[1], Label::Int(0));
        assert_eq!(sorted.index()[2], Label::Int(5));
    }

    #[test]
    fn test_errors() {
        assert_eq!(weekly().sort_by(&[]).unwrap_err(), FrameError::NoSortKeys);
        assert_eq!(
            weekly().sort_by(&[SortKey::asc("Nope")]).unwrap_err(),
            FrameError::ColumnNotFound("Nope".to_string())
        );
    }

    #[test]
    fn test_empty_table() {
        let empty = weekly().take_rows(&[]);
        let sorted = empty.sort_by(&[SortKey::asc("Sales")]).unwrap();
        assert_eq!(sorted.nrows(), 0);
        assert_eq!(sorted.ncols(), 2);
    }
}
