//! Core runtime logic for dirscope.
//!
//! This module contains the non-UI engine pieces used by the session:
//! - [entry]: the [FileItem] value type and its comparators.
//! - [sort]: sort keys and the [SortEngine].
//! - [fm]: reading directory entries from the filesystem.
//! - [lister]: the [DirectoryLister] seam with filesystem and in-memory implementations.
//! - [worker]: the background listing thread and its message protocol.
//! - [error]: typed error conditions.
//! - [formatter]: formatting helpers for sizes, times and names.
//! - [terminal]: the line-driven command loop of the `ds` front end.

pub mod entry;
pub mod error;
pub mod fm;
pub mod formatter;
pub mod lister;
pub mod sort;
pub mod terminal;
pub mod worker;

pub use entry::{CompareRules, FileItem};
pub use error::{ListError, SortError};
pub use lister::{DirectoryLister, FsLister, MemoryLister, UpdateBaseline};
pub use sort::{SortAttr, SortDirection, SortEngine, SortKey, SortPass};
