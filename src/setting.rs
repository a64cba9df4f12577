//! Global settings of the report pipeline.
//!
//! Built-in defaults overlaid by `frame_lab_setting.json` from the
//! application folder. Unknown keys in the file are kept and reachable
//! through `get`; the keys the binary reads have typed accessors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, RwLock};

use tracing::warn;

use crate::render::ReportFormat;
use crate::utility::get_file_path;

/// Setting filename
pub const SETTING_FILENAME: &str = "frame_lab_setting.json";

pub const LOG_LEVEL: &str = "log.level";
pub const LOG_CONSOLE: &str = "log.console";
pub const LOG_FILE: &str = "log.file";
pub const REPORT_FORMAT: &str = "report.format";
pub const REPORT_PATH: &str = "report.path";
pub const CHART_DIR: &str = "chart.dir";
pub const RANDOM_SEED: &str = "random.seed";

fn default_settings() -> HashMap<String, SettingValue> {
    [
        (LOG_LEVEL, SettingValue::Int(20)), // INFO
        (LOG_CONSOLE, SettingValue::Bool(true)),
        (LOG_FILE, SettingValue::Bool(false)),
        (REPORT_FORMAT, SettingValue::String("text".to_string())),
        (REPORT_PATH, SettingValue::String(String::new())),
        (CHART_DIR, SettingValue::String(String::new())),
        (RANDOM_SEED, SettingValue::Int(-1)),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect()
}

/// A JSON scalar setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl SettingValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Floats, or integers widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(f) => Some(*f),
            SettingValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Read the overlay file. A missing file is not an error; a malformed one
/// is logged and ignored.
fn read_overlay(path: &Path) -> HashMap<String, SettingValue> {
    let Ok(content) = fs::read_to_string(path) else {
        return HashMap::new();
    };
    serde_json::from_str(&content).unwrap_or_else(|err| {
        warn!(path = %path.display(), %err, "ignoring malformed settings file");
        HashMap::new()
    })
}

/// Thread-safe key/value settings.
pub struct Settings {
    values: RwLock<HashMap<String, SettingValue>>,
}

impl Settings {
    /// Defaults overlaid by the application folder's settings file.
    pub fn new() -> Self {
        Self::load(&get_file_path(SETTING_FILENAME))
    }

    /// Defaults overlaid by the settings file at `path`.
    pub fn load(path: &Path) -> Self {
        let mut values = default_settings();
        values.extend(read_overlay(path));
        Self {
            values: RwLock::new(values),
        }
    }

    pub fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.read().ok()?.get(key).cloned()
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str().map(str::to_string))
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_int())
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.as_float())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    pub fn set(&self, key: impl Into<String>, value: SettingValue) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.into(), value);
        }
    }

    /// Snapshot of every setting.
    pub fn get_all(&self) -> HashMap<String, SettingValue> {
        self.values.read().map(|v| v.clone()).unwrap_or_default()
    }

    /// Non-empty string setting as a path.
    fn path(&self, key: &str) -> Option<PathBuf> {
        self.get_string(key)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
    }

    /// Integer log level (10 debug .. 50 critical).
    pub fn log_level(&self) -> i32 {
        self.get_int(LOG_LEVEL)
            .and_then(|l| i32::try_from(l).ok())
            .unwrap_or(20)
    }

    pub fn log_console(&self) -> bool {
        self.get_bool(LOG_CONSOLE).unwrap_or(true)
    }

    pub fn log_file(&self) -> bool {
        self.get_bool(LOG_FILE).unwrap_or(false)
    }

    /// Configured report format; `None` when the name is not recognised.
    pub fn report_format(&self) -> Option<ReportFormat> {
        ReportFormat::from_name(&self.get_string(REPORT_FORMAT).unwrap_or_default())
    }

    /// Report destination; `None` means the default for the format.
    pub fn report_path(&self) -> Option<PathBuf> {
        self.path(REPORT_PATH)
    }

    /// Folder for chart files written by the text report.
    pub fn chart_dir(&self) -> Option<PathBuf> {
        self.path(CHART_DIR)
    }

    /// Seed for sample data; negative values mean unseeded.
    pub fn random_seed(&self) -> Option<u64> {
        self.get_int(RANDOM_SEED).and_then(|s| u64::try_from(s).ok())
    }

    /// Write every setting to `path` as pretty JSON.
    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&self.get_all()).map_err(io::Error::other)?;
        fs::write(path, json)
    }

    pub fn save(&self) -> io::Result<()> {
        self.save_to(&get_file_path(SETTING_FILENAME))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Global settings instance
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::new);

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> (tempfile::TempDir, Settings) {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join(SETTING_FILENAME));
        (dir, settings)
    }

    #[test]
    fn test_setting_value_accessors() {
        assert_eq!(SettingValue::String("html".to_string()).as_str(), Some("html"));
        assert_eq!(SettingValue::Int(42).as_float(), Some(42.0));
        assert_eq!(SettingValue::Bool(true).as_bool(), Some(true));
        assert_eq!(SettingValue::Bool(true).as_int(), None);
    }

    #[test]
    fn test_defaults_without_file() {
        let (_dir, settings) = defaults();
        assert_eq!(settings.log_level(), 20);
        assert!(settings.log_console());
        assert!(!settings.log_file());
        assert_eq!(settings.report_format(), Some(ReportFormat::Text));
        assert_eq!(settings.report_path(), None);
        assert_eq!(settings.chart_dir(), None);
        assert_eq!(settings.random_seed(), None);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTING_FILENAME);
        fs::write(
            &path,
            r#"{"report.format": "json", "random.seed": 7, "log.console": false, "chart.dir": "charts"}"#,
        )
        .unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.report_format(), Some(ReportFormat::Json));
        assert_eq!(settings.random_seed(), Some(7));
        assert!(!settings.log_console());
        assert_eq!(settings.chart_dir(), Some(PathBuf::from("charts")));
        assert_eq!(settings.log_level(), 20);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTING_FILENAME);
        fs::write(&path, "not json").unwrap();
        assert_eq!(Settings::load(&path).report_format(), Some(ReportFormat::Text));
    }

    #[test]
    fn test_unknown_format() {
        let (_dir, settings) = defaults();
        settings.set(REPORT_FORMAT, SettingValue::String("pdf".to_string()));
        assert_eq!(settings.report_format(), None);
    }

    #[test]
    fn test_save_round_trip() {
        let (dir, settings) = defaults();
        let path = dir.path().join(SETTING_FILENAME);
        settings.set(CHART_DIR, SettingValue::String("charts".to_string()));
        settings.set(RANDOM_SEED, SettingValue::Int(3));
        settings.save_to(&path).unwrap();

        let reloaded = Settings::load(&path);
        assert_eq!(reloaded.chart_dir(), Some(PathBuf::from("charts")));
        assert_eq!(reloaded.random_seed(), Some(3));
    }
}
