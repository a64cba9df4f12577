//! Transforms over series and tables.

pub mod align;
pub mod classify;
pub mod group;
pub mod impute;
pub mod join;
pub mod sort;
pub mod timeseries;

pub use align::{align_binary, BinaryOp};
pub use classify::{Band, Bands, Bound};
pub use group::{Aggregation, GroupBy};
pub use impute::{all_imputers, FillStrategy, Imputer};
pub use join::{merge, JoinKind};
pub use sort::SortKey;
pub use timeseries::{date_range, parse_date, random_integers, time_series, Frequency};
