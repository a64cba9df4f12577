//! Row labels.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// A row key of a series or table.
///
/// Labels of different kinds order as `Int < Text < Date`; within a kind the
/// natural order applies, so a union of label sets always has one
/// deterministic sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Label {
    Int(i64),
    Text(String),
    Date(NaiveDate),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Int(i) => write!(f, "{}", i),
            Label::Text(s) => write!(f, "{}", s),
            Label::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::Int(value)
    }
}

impl From<usize> for Label {
    fn from(value: usize) -> Self {
        Label::Int(value as i64)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_string())
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::Text(value)
    }
}

impl From<NaiveDate> for Label {
    fn from(value: NaiveDate) -> Self {
        Label::Date(value)
    }
}

/// Default positional index `0..len`.
pub fn range_index(len: usize) -> Vec<Label> {
    (0..len).map(Label::from).collect()
}
