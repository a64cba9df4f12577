//! SQL-style joins on a shared key column.
//!
//! Keys must be unique within each table; fan-out on duplicate keys is not
//! supported and reported as `FrameError::DuplicateKey`. Missing keys never
//! match anything.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::debug;

use crate::error::FrameError;
use crate::frame::{Column, DType, Label, Table};

/// Join policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// Keys present in both tables
    Inner,
    /// Every left row
    Left,
    /// Every right row
    Right,
    /// Union of keys
    Outer,
}

impl JoinKind {
    pub fn name(&self) -> &'static str {
        match self {
            JoinKind::Inner => "inner",
            JoinKind::Left => "left",
            JoinKind::Right => "right",
            JoinKind::Outer => "outer",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Suffixes appended to non-key columns present on both sides.
pub const LEFT_SUFFIX: &str = "_x";
pub const RIGHT_SUFFIX: &str = "_y";

/// Map each present key to its row, rejecting duplicates.
fn key_positions(column: &Column, name: &str) -> Result<HashMap<Label, usize>, FrameError> {
    let mut positions = HashMap::with_capacity(column.len());
    for row in 0..column.len() {
        if let Some(key) = column.label_at(row) {
            if positions.insert(key.clone(), row).is_some() {
                return Err(FrameError::DuplicateKey {
                    column: name.to_string(),
                    key: key.to_string(),
                });
            }
        }
    }
    Ok(positions)
}

/// Pairs of (left row, right row) in output order.
fn plan_rows(
    left_keys: &Column,
    right_keys: &Column,
    left_map: &HashMap<Label, usize>,
    right_map: &HashMap<Label, usize>,
    how: JoinKind,
) -> Vec<(Option<usize>, Option<usize>)> {
    let lookup_right = |i: usize| left_keys.label_at(i).and_then(|k| right_map.get(&k).copied());
    let lookup_left = |j: usize| right_keys.label_at(j).and_then(|k| left_map.get(&k).copied());

    match how {
        JoinKind::Inner => (0..left_keys.len())
            .filter_map(|i| lookup_right(i).map(|j| (Some(i), Some(j))))
            .collect(),
        JoinKind::Left => (0..left_keys.len()).map(|i| (Some(i), lookup_right(i))).collect(),
        JoinKind::Right => (0..right_keys.len()).map(|j| (lookup_left(j), Some(j))).collect(),
        JoinKind::Outer => {
            let mut rows: Vec<(Option<usize>, Option<usize>)> =
                (0..left_keys.len()).map(|i| (Some(i), lookup_right(i))).collect();
            let matched: HashSet<usize> = rows.iter().filter_map(|(_, j)| *j).collect();
            rows.extend(
                (0..right_keys.len())
                    .filter(|j| !matched.contains(j))
                    .map(|j| (None, Some(j))),
            );
            rows
        }
    }
}

/// Join `left` and `right` on the column `on`.
///
/// Output columns are the key first, then the left non-key columns, then
/// the right non-key columns. Rows follow left order; an outer join
/// appends unmatched right rows in right order, and a right join follows
/// right order. The result gets a fresh positional index.
pub fn merge(left: &Table, right: &Table, on: &str, how: JoinKind) -> Result<Table, FrameError> {
    let left_keys = left.column(on)?;
    let right_keys = right.column(on)?;
    if left_keys.dtype() != right_keys.dtype() {
        return Err(FrameError::KeyTypeMismatch {
            column: on.to_string(),
            left: left_keys.dtype(),
            right: right_keys.dtype(),
        });
    }
    if left_keys.dtype() == DType::Float {
        return Err(FrameError::TypeMismatch {
            column: on.to_string(),
            expected: "int, text or date",
            actual: DType::Float,
        });
    }

    let left_map = key_positions(left_keys, on)?;
    let right_map = key_positions(right_keys, on)?;
    let rows = plan_rows(left_keys, right_keys, &left_map, &right_map, how);
    let left_rows: Vec<Option<usize>> = rows.iter().map(|(l, _)| *l).collect();
    let right_rows: Vec<Option<usize>> = rows.iter().map(|(_, r)| *r).collect();

    let key_cells = rows
        .iter()
        .map(|(l, r)| {
            l.and_then(|i| left_keys.get(i))
                .or_else(|| r.and_then(|j| right_keys.get(j)))
        })
        .collect();
    let mut key_column = Column::from_scalars(key_cells)?;
    if key_column.dtype() != left_keys.dtype() {
        // Only reachable when every output key is missing.
        key_column = Column::missing(left_keys.dtype(), rows.len());
    }

    let left_names: HashSet<&str> = left.columns().map(|(n, _)| n).filter(|n| *n != on).collect();
    let right_names: HashSet<&str> = right.columns().map(|(n, _)| n).filter(|n| *n != on).collect();

    let mut result = Table::new();
    result.push_column(on, key_column)?;
    for (name, column) in left.columns().filter(|(n, _)| *n != on) {
        let out_name = if right_names.contains(name) {
            format!("{}{}", name, LEFT_SUFFIX)
        } else {
            name.to_string()
        };
        result.push_column(out_name, column.take_opt(&left_rows))?;
    }
    for (name, column) in right.columns().filter(|(n, _)| *n != on) {
        let out_name = if left_names.contains(name) {
            format!("{}{}", name, RIGHT_SUFFIX)
        } else {
            name.to_string()
        };
        result.push_column(out_name, column.take_opt(&right_rows))?;
    }

    debug!(
        how = %how,
        on,
        left = left.nrows(),
        right = right.nrows(),
        rows = result.nrows(),
        "merged tables"
    );
    Ok(result)
}

impl Table {
    /// Join with `other` on the column `on`.
    pub fn merge(&self, other: &Table, on: &str, how: JoinKind) -> Result<Table, FrameError> {
        merge(self, other, on, how)
    }
}
