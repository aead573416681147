//! Configuration for dirscope.
//!
//! Settings are read from `dirscope.toml` (see [load::Config::default_path]):
//! - [general]: storage root, ordering rules and hidden-entry handling.
//! - [updated]: bounds of the updated-files walk.
//! - [logging]: log level and log file.
//!
//! Every section falls back to internal defaults when missing.

pub mod general;
pub mod load;
pub mod logging;
pub mod updated;

pub use general::{General, InternalGeneral};
pub use load::{Config, RawConfig};
pub use logging::Logging;
pub use updated::{InternalUpdated, Updated};
