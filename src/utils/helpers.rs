//! Helpers for dirscope.
//!
//! This module defines constants for the minimum, default, and maximum updated-files result
//! limits used throughout dirscope.
//! It also provides utility functions:
//! - Looking up the home directory and expanding/shortening `~`
//! - Resolving the storage root a session starts in
//! - Parsing RFC 3339 timestamps for the updated-files reference point
//! - Clamping the result count to safe values

use chrono::DateTime;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};
use std::time::SystemTime;

/// The minimum results which is set to if the maximum is overset in the dirscope.toml.
pub const MIN_RESULTS: usize = 15;
/// The default updated-files result limit. Can be overwritten in the dirscope.toml.
pub const DEFAULT_MAX_RESULTS: usize = 2000;
/// The maximum updated-files result limit which is possible.
pub const MAX_RESULTS_LIMIT: usize = 1_000_000;

/// Returns the home directory of the current user, if any.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Expands a leading `~` to the home directory.
pub fn expand_home_path(path: &str) -> PathBuf {
    if path == "~" {
        return get_home().unwrap_or_else(|| PathBuf::from(path));
    }
    if let Some(rest) = path
        .strip_prefix("~/")
        .or_else(|| path.strip_prefix("~\\"))
        && let Some(home) = get_home()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Util function to shorten home directory to ~.
/// Is used by the prompt of the front end.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if let Some(home_dir) = get_home()
        && let Ok(stripped) = path.strip_prefix(&home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        } else {
            let mut short = stripped.display().to_string();
            if short.starts_with(MAIN_SEPARATOR) {
                short.remove(0);
            }
            return format!("~{}{}", MAIN_SEPARATOR, short);
        }
    }
    path.display().to_string()
}

/// Picks the storage root a session starts in.
///
/// Order: the command-line path, the configured root, the home directory, the current directory.
pub fn resolve_initial_dir(cli_path: Option<&str>, configured: Option<&Path>) -> PathBuf {
    let chosen = cli_path
        .map(expand_home_path)
        .or_else(|| configured.map(Path::to_path_buf))
        .or_else(get_home)
        .unwrap_or_else(|| PathBuf::from("."));
    std::path::absolute(&chosen).unwrap_or(chosen)
}

/// Parses an RFC 3339 timestamp (`2024-05-01T12:00:00Z`) into a [SystemTime].
pub fn parse_since(s: &str) -> Result<SystemTime, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s.trim()).map(SystemTime::from)
}

/// Safely clamp the updated-files result limit.
///
/// Values outside [MIN_RESULTS]..=[MAX_RESULTS_LIMIT] are clamped into that range.
pub fn clamp_max_results(value: usize) -> usize {
    let clamped = value.clamp(MIN_RESULTS, MAX_RESULTS_LIMIT);
    if clamped != value {
        eprintln!(
            "[Warning] max_results={} out of range ({}..={}), clamped to {}",
            value, MIN_RESULTS, MAX_RESULTS_LIMIT, clamped
        );
    }
    clamped
}
