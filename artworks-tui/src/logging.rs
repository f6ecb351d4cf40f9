//! File logging setup.

use std::fs;
use std::fs::File;
use std::path::PathBuf;

use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::error::AppError;
use crate::paths;

/// Fallback log file when no cache directory can be determined.
const FALLBACK_LOG: &str = "artworks-tui.log";

/// Rotates old logs and installs a file logger.
///
/// The terminal is owned by the UI, so nothing is ever logged to stdout or
/// stderr. Returns the path of the log file for this run.
pub fn init(level: LevelFilter) -> Result<PathBuf, AppError> {
    paths::rotate_logs();

    let path = paths::log_file().unwrap_or_else(|| PathBuf::from(FALLBACK_LOG));
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(&path)?;
    WriteLogger::init(level, Config::default(), file)?;
    Ok(path)
}
