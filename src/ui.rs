//! Text rendering of a session for the dirscope front end.
//!
//! - [render]: header and listing lines printed after each command.

pub mod render;

pub use render::{render_header, render_listing, render_session};
