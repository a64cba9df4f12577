//! Base constants and utility functions for the chart module.

use serde::{Deserialize, Serialize};

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` form used by the HTML sink.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

// Named colours
pub const WHITE_COLOR: Rgb = Rgb(255, 255, 255);
pub const BLACK_COLOR: Rgb = Rgb(0, 0, 0);
pub const GRID_COLOR: Rgb = Rgb(200, 200, 200);
pub const SKYBLUE_COLOR: Rgb = Rgb(135, 206, 235);
pub const PURPLE_COLOR: Rgb = Rgb(128, 0, 128);
pub const TEAL_COLOR: Rgb = Rgb(0, 128, 128);
pub const LIGHTCORAL_COLOR: Rgb = Rgb(240, 128, 128);
pub const MEDIUMSEAGREEN_COLOR: Rgb = Rgb(60, 179, 113);

// Figure size is given in inches and rendered at this density
pub const DPI: u32 = 100;

// Layout constants, in pixels
pub const MARGIN: u32 = 12;
pub const AXIS_X_HEIGHT: u32 = 48;
pub const AXIS_Y_WIDTH: u32 = 64;
pub const TITLE_FONT_SIZE: f64 = 22.0;
pub const LABEL_FONT_SIZE: f64 = 16.0;
pub const MARKER_RADIUS: u32 = 4;
pub const LINE_WIDTH: u32 = 2;

/// Fraction of a category slot filled by its bar
pub const BAR_WIDTH: f64 = 0.6;
pub const MAX_Y_TICKS: usize = 6;

/// Format an axis value with units (K, M, B)
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude >= 1_000_000_000.0 {
        format!("{:.1}B", value / 1_000_000_000.0)
    } else if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 10_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Nice step size for roughly `max_ticks` intervals over `range`.
fn nice_step(range: f64, max_ticks: usize) -> f64 {
    let rough_step = range / max_ticks.max(1) as f64;
    let magnitude = 10.0_f64.powf(rough_step.log10().floor());
    let residual = rough_step / magnitude;

    if residual <= 1.5 {
        magnitude
    } else if residual <= 3.0 {
        2.0 * magnitude
    } else if residual <= 7.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    }
}

/// Calculate nice axis tick values
pub fn calculate_axis_ticks(min_val: f64, max_val: f64, max_ticks: usize) -> Vec<f64> {
    if min_val >= max_val {
        return vec![min_val];
    }

    let step = nice_step(max_val - min_val, max_ticks);
    let start = (min_val / step).ceil() * step;
    let count = ((max_val - start) / step).floor() as usize + 1;
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Axis range covering `values`, widened outward to nice step boundaries.
///
/// Bars need a zero baseline, so `include_zero` pulls the range down (or up)
/// to zero. A degenerate range is padded to keep the axis drawable.
pub fn axis_range(values: &[f64], include_zero: bool) -> (f64, f64) {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (mut low, mut high) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if low > high {
        return (0.0, 1.0);
    }
    if include_zero {
        low = low.min(0.0);
        high = high.max(0.0);
    }
    if low == high {
        let pad = if low == 0.0 { 1.0 } else { low.abs() * 0.1 };
        return (low - pad, high + pad);
    }

    let step = nice_step(high - low, MAX_Y_TICKS);
    ((low / step).floor() * step, (high / step).ceil() * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex() {
        assert_eq!(SKYBLUE_COLOR.to_hex(), "#87ceeb");
        assert_eq!(MEDIUMSEAGREEN_COLOR.to_hex(), "#3cb371");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(250.0), "250");
        assert_eq!(format_value(302.5), "302.50");
        assert_eq!(format_value(15000.0), "15.0K");
        assert_eq!(format_value(1500000.0), "1.5M");
        assert_eq!(format_value(-2500000000.0), "-2.5B");
    }

    #[test]
    fn test_calculate_axis_ticks() {
        let ticks = calculate_axis_ticks(0.0, 100.0, 5);
        assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        for tick in &ticks {
            assert!(*tick >= 0.0 && *tick <= 100.0);
        }
        assert_eq!(calculate_axis_ticks(3.0, 3.0, 5), vec![3.0]);
    }

    #[test]
    fn test_axis_range() {
        assert_eq!(axis_range(&[250.0], true), (0.0, 250.0));
        assert_eq!(axis_range(&[101.0, 199.0], false), (100.0, 200.0));
        assert_eq!(axis_range(&[], false), (0.0, 1.0));
        assert_eq!(axis_range(&[0.0], false), (-1.0, 1.0));
    }

    #[test]
    fn test_ticks_span_axis_range() {
        let (low, high) = axis_range(&[101.0, 199.0], false);
        let ticks = calculate_axis_ticks(low, high, MAX_Y_TICKS);
        assert_eq!(ticks, vec![100.0, 120.0, 140.0, 160.0, 180.0, 200.0]);
    }
}
