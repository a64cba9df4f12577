//! Logging setup for the report pipeline.
//!
//! Levels are configured as integers in the Python `logging` convention
//! (10 debug, 20 info, 30 warning, 40 error, 50 critical). `RUST_LOG`
//! directives still apply on top of the configured level.

use chrono::{Local, NaiveDate};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::setting::{Settings, SETTINGS};
use crate::utility::get_folder_path;

pub const DEBUG: i32 = 10;
pub const INFO: i32 = 20;
pub const WARNING: i32 = 30;
pub const ERROR: i32 = 40;
pub const CRITICAL: i32 = 50;

/// Most verbose tracing level admitted by an integer level.
pub fn level_from_int(level: i32) -> Level {
    match level {
        l if l <= DEBUG => Level::DEBUG,
        l if l <= INFO => Level::INFO,
        l if l <= WARNING => Level::WARN,
        _ => Level::ERROR,
    }
}

/// Display name of an integer level.
pub fn level_name(level: i32) -> &'static str {
    match level {
        l if l <= DEBUG => "DEBUG",
        l if l <= INFO => "INFO",
        l if l <= WARNING => "WARNING",
        l if l <= ERROR => "ERROR",
        _ => "CRITICAL",
    }
}

/// Where log records go and how verbose they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: i32,
    pub console: bool,
    pub file: bool,
}

impl LogConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            level: settings.log_level(),
            console: settings.log_console(),
            file: settings.log_file(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: INFO,
            console: true,
            file: false,
        }
    }
}

/// Install the global subscriber from the `log.*` settings.
pub fn init_logger() -> io::Result<()> {
    init_logger_with(LogConfig::from_settings(&SETTINGS))
}

/// Install the global subscriber.
///
/// Console output goes to stderr so that a report written to stdout stays
/// clean. A second call keeps the first subscriber.
pub fn init_logger_with(config: LogConfig) -> io::Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(level_from_int(config.level).into());

    let console_layer = config.console.then(|| {
        fmt::layer()
            .with_target(true)
            .with_ansi(true)
            .with_writer(io::stderr)
    });

    let file_layer = if config.file {
        let file = open_log_file(log_file_path(Local::now().date_naive()))?;
        Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
    } else {
        None
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_ok();
    if installed {
        debug!(level = level_name(config.level), file = config.file, "logger initialised");
    }
    Ok(())
}

fn open_log_file(path: PathBuf) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// `frame_lab_YYYYMMDD.log`
pub fn log_file_name(day: NaiveDate) -> String {
    format!("frame_lab_{}.log", day.format("%Y%m%d"))
}

/// Log file for `day` inside the application's `log` folder.
pub fn log_file_path(day: NaiveDate) -> PathBuf {
    log_file_in(&get_folder_path("log"), day)
}

fn log_file_in(folder: &Path, day: NaiveDate) -> PathBuf {
    folder.join(log_file_name(day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_int() {
        assert_eq!(level_from_int(DEBUG), Level::DEBUG);
        assert_eq!(level_from_int(0), Level::DEBUG);
        assert_eq!(level_from_int(INFO), Level::INFO);
        assert_eq!(level_from_int(25), Level::WARN);
        assert_eq!(level_from_int(CRITICAL), Level::ERROR);
    }

    #[test]
    fn test_level_name() {
        let names: Vec<&str> = [DEBUG, INFO, WARNING, ERROR, CRITICAL].map(level_name).to_vec();
        assert_eq!(names, vec!["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]);
    }

    #[test]
    fn test_log_file_name() {
        let day = NaiveDate::from_ymd_opt(2023, 1, 8).unwrap();
        assert_eq!(log_file_name(day), "frame_lab_20230108.log");
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(log_file_in(dir.path(), day), dir.path().join("frame_lab_20230108.log"));
    }

    #[test]
    fn test_config_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("none.json"));
        assert_eq!(LogConfig::from_settings(&settings), LogConfig::default());
    }

    #[test]
    fn test_init_twice_is_harmless() {
        let quiet = LogConfig {
            level: ERROR,
            console: false,
            file: false,
        };
        assert!(init_logger_with(quiet).is_ok());
        assert!(init_logger_with(quiet).is_ok());
    }
}
