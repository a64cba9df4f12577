//! SVG rendering of chart specs with plotters.

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use super::base::{
    axis_range, calculate_axis_ticks, format_value, Rgb, AXIS_X_HEIGHT, AXIS_Y_WIDTH, BAR_WIDTH, BLACK_COLOR, GRID_COLOR,
    LABEL_FONT_SIZE, LINE_WIDTH, MARGIN, MARKER_RADIUS, MAX_Y_TICKS, TITLE_FONT_SIZE, WHITE_COLOR,
};
use super::spec::{ChartKind, ChartSpec};
use crate::error::ChartError;

const FONT: &str = "sans-serif";

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

fn draw_error(err: impl std::fmt::Display) -> ChartError {
    ChartError::Draw(err.to_string())
}

/// Maximal runs of consecutive present values as (x, y) points.
fn present_runs(values: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (i, value) in values.iter().enumerate() {
        match value {
            Some(y) => current.push((i as f64, *y)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Render `spec` to a standalone SVG document.
///
/// The drawing area lives only for the duration of this call.
pub fn render_svg(spec: &ChartSpec) -> Result<String, ChartError> {
    spec.validate()?;
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, spec.size).into_drawing_area();
        draw(&root, spec)?;
        root.present().map_err(draw_error)?;
    }
    debug!(title = %spec.title, kind = %spec.kind, points = spec.points(), bytes = svg.len(), "rendered chart");
    Ok(svg)
}

fn draw(root: &DrawingArea<SVGBackend<'_>, Shift>, spec: &ChartSpec) -> Result<(), ChartError> {
    root.fill(&rgb(WHITE_COLOR)).map_err(draw_error)?;

    let slots = spec.values.len().max(1);
    let present: Vec<f64> = spec.values.iter().flatten().copied().collect();
    let (y_low, y_high) = axis_range(&present, spec.kind == ChartKind::Bar);
    let y_ticks = calculate_axis_ticks(y_low, y_high, MAX_Y_TICKS).len();

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, (FONT, TITLE_FONT_SIZE))
        .margin(MARGIN)
        .x_label_area_size(AXIS_X_HEIGHT)
        .y_label_area_size(AXIS_Y_WIDTH)
        .build_cartesian_2d(-0.5..(slots as f64 - 0.5), y_low..y_high)
        .map_err(draw_error)?;

    let labels = &spec.labels;
    let x_formatter = |x: &f64| {
        let slot = x.round();
        if (x - slot).abs() > 1e-6 || slot < 0.0 {
            return String::new();
        }
        labels.get(slot as usize).cloned().unwrap_or_default()
    };
    let y_formatter = |y: &f64| format_value(*y);

    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(spec.x_label.as_str())
            .y_desc(spec.y_label.as_str())
            .x_labels(slots)
            .y_labels(y_ticks)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .label_style((FONT, LABEL_FONT_SIZE))
            .axis_desc_style((FONT, LABEL_FONT_SIZE))
            .axis_style(rgb(BLACK_COLOR));
        if spec.grid {
            mesh.bold_line_style(rgb(GRID_COLOR)).light_line_style(rgb(WHITE_COLOR));
        } else {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(draw_error)?;
    }

    let color = rgb(spec.color);
    match spec.kind {
        ChartKind::Bar => {
            let base = 0.0_f64.clamp(y_low, y_high);
            chart
                .draw_series(spec.values.iter().enumerate().filter_map(|(i, value)| {
                    value.map(|y| {
                        let x = i as f64;
                        Rectangle::new(
                            [(x - BAR_WIDTH / 2.0, base), (x + BAR_WIDTH / 2.0, y)],
                            color.filled(),
                        )
                    })
                }))
                .map_err(draw_error)?;
        }
        ChartKind::Line => {
            for run in present_runs(&spec.values) {
                chart
                    .draw_series(LineSeries::new(run.iter().copied(), color.stroke_width(LINE_WIDTH)))
                    .map_err(draw_error)?;
            }
        }
    }

    if spec.markers {
        chart
            .draw_series(
                present_runs(&spec.values)
                    .into_iter()
                    .flatten()
                    .map(|point| Circle::new(point, MARKER_RADIUS, color.filled())),
            )
            .map_err(draw_error)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::base::{LIGHTCORAL_COLOR, TEAL_COLOR};

    fn city_labels() -> Vec<String> {
        ["Bangalore", "Chennai", "Delhi"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_present_runs_split_on_gaps() {
        let runs = present_runs(&[Some(1.0), None, Some(2.0), Some(3.0), None]);
        assert_eq!(runs, vec![vec![(0.0, 1.0)], vec![(2.0, 2.0), (3.0, 3.0)]]);
        assert!(present_runs(&[None, None]).is_empty());
    }

    #[test]
    fn test_render_bar_chart() {
        let spec = ChartSpec::bar("Total Sales by City")
            .axis_labels("City", "Total Sales")
            .color(LIGHTCORAL_COLOR)
            .figsize(8, 5)
            .data(city_labels(), vec![Some(587.5), Some(650.0), Some(520.0)]);
        let svg = render_svg(&spec).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Total Sales by City"));
        assert!(svg.contains("800"));
        assert!(svg.to_lowercase().contains("#f08080"));
    }

    #[test]
    fn test_render_line_chart_with_gap() {
        let spec = ChartSpec::line("Sales Over Time")
            .color(TEAL_COLOR)
            .markers(true)
            .grid(true)
            .figsize(10, 5)
            .data(city_labels(), vec![Some(200.0), None, Some(250.0)]);
        let svg = render_svg(&spec).unwrap();
        assert!(svg.contains("Sales Over Time"));
        assert!(svg.contains("<circle"));
    }

    #[test]
    fn test_render_empty_chart() {
        let spec = ChartSpec::bar("Empty");
        assert!(render_svg(&spec).is_ok());
    }

    #[test]
    fn test_render_rejects_mismatched_data() {
        let spec = ChartSpec::bar("Bad").data(city_labels(), vec![Some(1.0)]);
        assert!(matches!(render_svg(&spec), Err(ChartError::ShapeMismatch { .. })));
    }
}
