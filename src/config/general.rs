//! The general configuration settings for dirscope.
//!
//! This module defines the [General] struct for deserializing
//! general settings from the dirscope.toml configuration file
//! and the [InternalGeneral] struct for internal use within dirscope.

use crate::utils::expand_home_path;

use serde::Deserialize;

use std::path::PathBuf;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    root: Option<String>,
    dirs_first: bool,
    case_insensitive: bool,
    show_hidden: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            root: None,
            dirs_first: false,
            case_insensitive: false,
            show_hidden: true,
        }
    }
}

#[derive(Debug)]
pub struct InternalGeneral {
    root: Option<PathBuf>,
    dirs_first: bool,
    case_insensitive: bool,
    show_hidden: bool,
}

impl From<General> for InternalGeneral {
    fn from(g: General) -> Self {
        Self {
            root: g.root.as_deref().map(expand_home_path),
            dirs_first: g.dirs_first,
            case_insensitive: g.case_insensitive,
            show_hidden: g.show_hidden,
        }
    }
}

impl InternalGeneral {
    #[inline]
    pub fn root(&self) -> Option<&PathBuf> {
        self.root.as_ref()
    }

    #[inline]
    pub fn dirs_first(&self) -> bool {
        self.dirs_first
    }

    #[inline]
    pub fn case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }
}
