//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "treenav";
const APPLICATION: &str = "treenav-demo";

/// Get the cache directory for temporary/regenerable data.
///
/// - Linux: `$XDG_CACHE_HOME/treenav-demo` or `~/.cache/treenav-demo`
/// - macOS: `~/Library/Caches/dev.treenav.treenav-demo`
fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION).map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path of the log file, creating its directory. Falls back to the working
/// directory when no home directory can be determined.
pub fn log_file() -> PathBuf {
    match cache_dir() {
        Some(dir) if fs::create_dir_all(&dir).is_ok() => dir.join("latest.log"),
        _ => PathBuf::from("treenav-demo.log"),
    }
}
