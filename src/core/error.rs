//! Error conditions raised by the dirscope core.
//!
//! Filesystem failures are converted into [ListError] at the lister boundary,
//! so nothing above [crate::core::lister] ever sees a raw platform error.
//! Invalid sort requests are rejected with [SortError].

use std::path::PathBuf;

use thiserror::Error;

/// Failure of a directory or updated-files listing.
#[derive(Error, Debug)]
pub enum ListError {
    /// The caller lacks permission to read the listed root.
    /// The boundary is expected to prompt for permission; the core never retries.
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),
}

/// Rejected sort request. Always a caller error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    #[error("Sort index {0} is out of range (expected 0..=7)")]
    InvalidIndex(usize),

    #[error("Unknown sort key '{0}'")]
    UnknownKey(String),
}
