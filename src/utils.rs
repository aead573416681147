//! Miscellaneous utility functions for dirscope.
//!
//! This module holds the [helpers] submodule, which provides commonly used utilities such as:
//! - Home directory lookup and `~` expansion/shortening
//! - Resolving the initial storage root
//! - Parsing the `--since` timestamp
//! - Clamping the updated-files result limit
//!
//! and the [cli] submodule with the argument parsing of the `ds` binary.

pub mod cli;
pub mod helpers;

pub use helpers::{
    DEFAULT_MAX_RESULTS, MAX_RESULTS_LIMIT, MIN_RESULTS, clamp_max_results, expand_home_path,
    get_home, parse_since, resolve_initial_dir, shorten_home_path,
};
