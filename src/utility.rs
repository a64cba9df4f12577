//! General utility functions.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Name of the application folder.
pub const APP_FOLDER: &str = ".framelab";

/// Locate the application folder.
///
/// A `.framelab` folder in the current working directory wins; otherwise the
/// folder lives under the home directory and is created on demand.
fn get_app_dir(folder_name: &str) -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    resolve_app_dir(&cwd, &home, folder_name)
}

fn resolve_app_dir(cwd: &Path, home: &Path, folder_name: &str) -> PathBuf {
    let local = cwd.join(folder_name);
    if local.exists() {
        return local;
    }
    ensure_folder(home, folder_name)
}

/// `base/folder_name`, created if missing.
fn ensure_folder(base: &Path, folder_name: &str) -> PathBuf {
    let folder_path = base.join(folder_name);
    if !folder_path.exists() {
        let _ = fs::create_dir_all(&folder_path);
    }
    folder_path
}

/// The application folder
pub static APP_DIR: LazyLock<PathBuf> = LazyLock::new(|| get_app_dir(APP_FOLDER));

/// Get path for a file in the application folder
pub fn get_file_path(filename: &str) -> PathBuf {
    APP_DIR.join(filename)
}

/// Get path for a sub-folder of the application folder, creating it
pub fn get_folder_path(folder_name: &str) -> PathBuf {
    ensure_folder(&APP_DIR, folder_name)
}

/// Write `content` to `path`, creating missing parent folders.
pub fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)
}
