use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use super::RenderSink;
use crate::chart::{render_svg, ChartSpec};
use crate::error::RenderError;
use crate::frame::{missing_marker, DType, Scalar, Series, Table};
use crate::utility::write_file;

const RULE_WIDTH: usize = 60;

/// Plain-text report written to any `Write`.
///
/// Charts are summarised on one line. With a chart directory set, each
/// chart is also rendered to an `.svg` file there.
pub struct TextSink<W: Write> {
    out: W,
    chart_dir: Option<PathBuf>,
    charts: Vec<PathBuf>,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            chart_dir: None,
            charts: Vec::new(),
        }
    }

    pub fn with_chart_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.chart_dir = Some(dir.into());
        self
    }

    /// Chart files written so far.
    pub fn chart_files(&self) -> &[PathBuf] {
        &self.charts
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TextSink<W> {
    fn heading(&mut self, text: &str) -> Result<(), RenderError> {
        let underline = "=".repeat(text.chars().count());
        writeln!(self.out, "\n{}\n{}", text, underline)?;
        Ok(())
    }

    fn note(&mut self, text: &str) -> Result<(), RenderError> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    fn rule(&mut self) -> Result<(), RenderError> {
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))?;
        Ok(())
    }

    fn series(&mut self, caption: &str, series: &Series) -> Result<(), RenderError> {
        writeln!(self.out, "{}\n{}\n", caption, series)?;
        Ok(())
    }

    fn table(&mut self, caption: &str, table: &Table) -> Result<(), RenderError> {
        writeln!(self.out, "{}\n{}\n", caption, table)?;
        Ok(())
    }

    fn scalar(&mut self, caption: &str, value: Option<Scalar>) -> Result<(), RenderError> {
        match value {
            Some(value) => writeln!(self.out, "{} {}", caption, value)?,
            None => writeln!(self.out, "{} {}", caption, missing_marker(DType::Float))?,
        }
        Ok(())
    }

    fn chart(&mut self, spec: &ChartSpec) -> Result<(), RenderError> {
        spec.validate()?;
        let summary = format!(
            "[{} chart] {} ({} points, {}x{})",
            spec.kind,
            spec.title,
            spec.points(),
            spec.width(),
            spec.height()
        );
        match &self.chart_dir {
            Some(dir) => {
                let path = dir.join(spec.file_name());
                write_file(&path, &render_svg(spec)?)?;
                debug!(path = %path.display(), "wrote chart");
                writeln!(self.out, "{} -> {}\n", summary, path.display())?;
                self.charts.push(path);
            }
            None => writeln!(self.out, "{}\n", summary)?,
        }
        Ok(())
    }
}
