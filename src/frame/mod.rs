//! Strongly typed in-memory tabular data.
//!
//! - `Label` - row keys (integer, text or date)
//! - `Column` - typed vector with `Option` cells for missing values
//! - `Series` - named column with a label index
//! - `Table` - ordered named columns sharing one index

mod column;
mod display;
mod label;
mod series;
mod table;

pub use column::{Column, DType, Scalar};
pub use display::{cell_text, format_float, missing_marker};
pub use label::{range_index, Label};
pub use series::Series;
pub use table::Table;
