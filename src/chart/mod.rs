//! Static bar and line charts rendered to SVG.

pub mod base;
mod spec;
mod svg;

pub use base::Rgb;
pub use spec::{ChartKind, ChartSpec};
pub use svg::render_svg;
