//! Library crate for dirscope.
//!
//! The shipped application is the `ds` binary (`src/main.rs`).
//!
//! The library holds the browsing engine: listings, sorting, navigation and the
//! session that ties them together. The binary is a thin line-driven front end over it.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
pub mod utils;
