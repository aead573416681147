//! Application state and navigation for dirscope.
//!
//! - [nav]: browsed directory, back stack, view mode and snapshots ([NavState]).
//! - [state]: the [BrowserSession] controller tying navigation, sorting and the worker together.
//! - [keymap]: parsing of the line commands the `ds` front end accepts.

pub mod keymap;
pub mod nav;
pub mod state;

pub use keymap::Command;
pub use nav::NavState;
pub use state::{BrowserSession, SessionEvent, SessionOptions};
