//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use chrono::Local;
use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "artworks";
const APPLICATION: &str = "artworks-tui";

/// File name of the log for the current run.
const LATEST_LOG: &str = "latest.log";

/// Maximum number of old log files to keep.
const MAX_OLD_LOGS: usize = 25;

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for temporary/regenerable data.
///
/// - Linux: `$XDG_CACHE_HOME/artworks-tui` or `~/.cache/artworks-tui`
/// - macOS: `~/Library/Caches/dev.artworks.artworks-tui`
/// - Windows: `C:\Users\<User>\AppData\Local\artworks\artworks-tui\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LATEST_LOG))
}

/// Archive the previous run's log and prune old archives.
///
/// Call this at startup before creating the new log file.
pub fn rotate_logs() {
    let Some(cache) = cache_dir() else { return };
    rotate_logs_in(&cache);
}

/// Renames `latest.log` after the time it was last written to.
fn rotate_logs_in(dir: &Path) {
    let latest = dir.join(LATEST_LOG);
    if let Ok(modified) = fs::metadata(&latest).and_then(|m| m.modified()) {
        let _ = fs::rename(&latest, dir.join(archive_name(modified.into())));
    }
    prune_archives(dir, MAX_OLD_LOGS);
}

fn archive_name(written: DateTime<Local>) -> String {
    written.format("%Y%m%d_%H%M%S.log").to_string()
}

fn is_archive(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "log")
        && path.file_name().is_some_and(|name| name != LATEST_LOG)
}

/// Deletes all but the newest `keep` archives.
///
/// Archive names are timestamps, so name order is age order.
fn prune_archives(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archives: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_archive(path))
        .collect();
    archives.sort();

    let excess = archives.len().saturating_sub(keep);
    for path in archives.drain(..excess) {
        let _ = fs::remove_file(path);
    }
}
