//! Settings of the updated-files view.
//!
//! The window decides the reference point when no explicit `--since` is given.
//! Depth and result count bound the recursive walk below the storage root.

use crate::utils::{DEFAULT_MAX_RESULTS, clamp_max_results};

use serde::Deserialize;

use std::time::Duration;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Updated {
    window_hours: u64,
    max_depth: usize,
    #[serde(default = "default_max_results")]
    max_results: usize,
}

impl Default for Updated {
    fn default() -> Self {
        Updated {
            window_hours: 24,
            max_depth: 8,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[derive(Debug)]
pub struct InternalUpdated {
    window: Duration,
    max_depth: usize,
    max_results: usize,
}

impl From<Updated> for InternalUpdated {
    fn from(u: Updated) -> Self {
        Self {
            window: Duration::from_secs(u.window_hours.saturating_mul(3600)),
            max_depth: u.max_depth.max(1),
            max_results: clamp_max_results(u.max_results),
        }
    }
}

impl InternalUpdated {
    #[inline]
    pub fn window(&self) -> Duration {
        self.window
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[inline]
    pub fn max_results(&self) -> usize {
        self.max_results
    }
}

/// Helper function for default max_results
fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}
