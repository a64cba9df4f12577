//! Frame Lab - command line entry point
//!
//! Runs every pipeline stage and writes the report in the format chosen by
//! `report.format` (text, html or json).

use std::error::Error;
use std::io::{self, Write};

use tracing::{info, warn};

use frame_lab::logger::init_logger;
use frame_lab::utility::{get_file_path, write_file};
use frame_lab::{
    HtmlSink, JsonSink, Pipeline, PipelineConfig, ReportFormat, TextSink, SETTINGS, VERSION,
};

fn run_text(pipeline: &mut Pipeline) -> Result<(), Box<dyn Error>> {
    let chart_dir = SETTINGS.chart_dir();
    match SETTINGS.report_path() {
        Some(path) => {
            let mut sink = TextSink::new(Vec::new());
            if let Some(dir) = chart_dir {
                sink = sink.with_chart_dir(dir);
            }
            pipeline.run(&mut sink)?;
            let charts = sink.chart_files().len();
            let report = String::from_utf8(sink.into_inner())?;
            write_file(&path, &report)?;
            info!(path = %path.display(), charts, "text report written");
        }
        None => {
            let stdout = io::stdout();
            let mut sink = TextSink::new(stdout.lock());
            if let Some(dir) = chart_dir {
                sink = sink.with_chart_dir(dir);
            }
            pipeline.run(&mut sink)?;
            sink.into_inner().flush()?;
        }
    }
    Ok(())
}

fn run_html(pipeline: &mut Pipeline) -> Result<(), Box<dyn Error>> {
    let path = SETTINGS
        .report_path()
        .unwrap_or_else(|| get_file_path(&format!("report.{}", ReportFormat::Html.extension())));
    let mut sink = HtmlSink::new("Frame Lab Report");
    pipeline.run(&mut sink)?;
    write_file(&path, &sink.finish())?;
    info!(path = %path.display(), "html report written");
    println!("Report written to {}", path.display());
    Ok(())
}

fn run_json(pipeline: &mut Pipeline) -> Result<(), Box<dyn Error>> {
    let mut sink = JsonSink::new();
    pipeline.run(&mut sink)?;
    let json = sink.finish()?;
    match SETTINGS.report_path() {
        Some(path) => {
            write_file(&path, &json)?;
            info!(path = %path.display(), "json report written");
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logger()?;
    info!(version = VERSION, "frame_lab starting");

    let format = SETTINGS.report_format().unwrap_or_else(|| {
        warn!("unknown report.format setting, falling back to text");
        ReportFormat::Text
    });

    let mut pipeline = Pipeline::new(PipelineConfig::from_settings(&SETTINGS));
    match format {
        ReportFormat::Text => run_text(&mut pipeline)?,
        ReportFormat::Html => run_html(&mut pipeline)?,
        ReportFormat::Json => run_json(&mut pipeline)?,
    }

    info!("frame_lab finished");
    Ok(())
}
