//! Label-aligned arithmetic.
//!
//! Binary operations between two series match values by label rather than
//! by position. The result carries the union of both label sets in sorted
//! order; a label present on one side only yields a missing value.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use tracing::debug;

use crate::error::FrameError;
use crate::frame::{Column, Label, Series};

/// Element-wise arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    /// Float arithmetic; division by zero is missing.
    fn apply_f64(self, a: f64, b: f64) -> Option<f64> {
        match self {
            BinaryOp::Add => Some(a + b),
            BinaryOp::Sub => Some(a - b),
            BinaryOp::Mul => Some(a * b),
            BinaryOp::Div if b == 0.0 => None,
            BinaryOp::Div => Some(a / b),
        }
    }

    /// Integer arithmetic; overflow is missing. Division never reaches here.
    fn apply_i64(self, a: i64, b: i64) -> Option<i64> {
        match self {
            BinaryOp::Add => a.checked_add(b),
            BinaryOp::Sub => a.checked_sub(b),
            BinaryOp::Mul => a.checked_mul(b),
            BinaryOp::Div => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Combine two series label by label.
///
/// Both operands must be numeric with unique labels. Integer operands stay
/// integer except under division.
pub fn align_binary(left: &Series, right: &Series, op: BinaryOp) -> Result<Series, FrameError> {
    left.ensure_unique_index()?;
    right.ensure_unique_index()?;
    let left_values = left.values_f64()?;
    let right_values = right.values_f64()?;

    let labels: Vec<Label> = left
        .index()
        .iter()
        .chain(right.index().iter())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect();

    let left_pos: HashMap<&Label, usize> = left.index().iter().enumerate().map(|(i, l)| (l, i)).collect();
    let right_pos: HashMap<&Label, usize> = right.index().iter().enumerate().map(|(i, l)| (l, i)).collect();
    let pairs: Vec<(Option<usize>, Option<usize>)> = labels
        .iter()
        .map(|l| (left_pos.get(l).copied(), right_pos.get(l).copied()))
        .collect();

    let data = match (left.data(), right.data()) {
        (Column::Int(a), Column::Int(b)) if op != BinaryOp::Div => Column::Int(
            pairs
                .iter()
                .map(|pair| match *pair {
                    (Some(i), Some(j)) => a[i].zip(b[j]).and_then(|(x, y)| op.apply_i64(x, y)),
                    _ => None,
                })
                .collect(),
        ),
        _ => Column::Float(
            pairs
                .iter()
                .map(|pair| match *pair {
                    (Some(i), Some(j)) => left_values[i]
                        .zip(right_values[j])
                        .and_then(|(x, y)| op.apply_f64(x, y)),
                    _ => None,
                })
                .collect(),
        ),
    };

    let name = if left.name() == right.name() { left.name() } else { "" };
    debug!(
        op = %op,
        left = left.len(),
        right = right.len(),
        result = labels.len(),
        "aligned binary operation"
    );
    Series::new(name, labels, data)
}

impl Series {
    /// Label-aligned sum.
    pub fn add(&self, other: &Series) -> Result<Series, FrameError> {
        align_binary(self, other, BinaryOp::Add)
    }

    /// Label-aligned difference.
    pub fn sub(&self, other: &Series) -> Result<Series, FrameError> {
        align_binary(self, other, BinaryOp::Sub)
    }

    /// Label-aligned product.
    pub fn mul(&self, other: &Series) -> Result<Series, FrameError> {
        align_binary(self, other, BinaryOp::Mul)
    }

    /// Label-aligned quotient.
    pub fn div(&self, other: &Series) -> Result<Series, FrameError> {
        align_binary(self, other, BinaryOp::Div)
    }

    /// Apply `op` with a constant right operand to every present value.
    /// Index and name are kept.
    pub fn apply_scalar(&self, op: BinaryOp, value: f64) -> Result<Series, FrameError> {
        let integral = value.fract() == 0.0 && value.abs() < i64::MAX as f64;
        let data = match self.data() {
            Column::Int(values) if integral && op != BinaryOp::Div => {
                let rhs = value as i64;
                Column::Int(
                    values
                        .iter()
                        .map(|v| v.and_then(|x| op.apply_i64(x, rhs)))
                        .collect(),
                )
            }
            _ => Column::Float(
                self.values_f64()?
                    .into_iter()
                    .map(|v| v.and_then(|x| op.apply_f64(x, value)))
                    .collect(),
            ),
        };
        Ok(self.with_data(data))
    }

    /// Add a constant to every present value.
    pub fn add_scalar(&self, value: f64) -> Result<Series, FrameError> {
        self.apply_scalar(BinaryOp::Add, value)
    }
}
