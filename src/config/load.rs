//! The main config loading module for dirscope.
//!
//! Handles loading and deserializing settings from `dirscope.toml`.
//!
//! Provides and manages the main [Config] struct, as well as the internal [RawConfig] used for parsing and processing.

use crate::config::{General, InternalGeneral, InternalUpdated, Logging, Updated};
use crate::utils::get_home;

use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

/// Raw configuration as read from the toml file
/// This struct is deserialized directly from the toml file.
/// It uses owned types and is then converted into the main [Config] struct.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct RawConfig {
    general: General,
    updated: Updated,
    log: Logging,
}

/// Main configuration struct for dirscope
/// This struct holds the processed configuration options used by dirscope.
#[derive(Debug)]
pub struct Config {
    general: InternalGeneral,
    updated: InternalUpdated,
    log: Logging,
}

/// Conversion from RawConfig to Config
/// This handles any necessary processing of the raw values
impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            general: InternalGeneral::from(raw.general),
            updated: InternalUpdated::from(raw.updated),
            log: raw.log,
        }
    }
}

impl Config {
    /// Load configuration from the default path
    /// If the file does not exist or fails to parse, returns the default configuration.
    ///
    /// Called by entry point to load config at startup, before logging is set up.
    pub fn load() -> Self {
        let path = Self::default_path();

        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path)
    }

    /// Load configuration from `path`, falling back to defaults on any error.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error parsing config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawConfig>(content).map(Config::from)
    }

    // Getters

    #[inline]
    pub fn general(&self) -> &InternalGeneral {
        &self.general
    }

    #[inline]
    pub fn updated(&self) -> &InternalUpdated {
        &self.updated
    }

    #[inline]
    pub fn log(&self) -> &Logging {
        &self.log
    }

    /// Determine the default configuration file path.
    /// Checks the DIRSCOPE_CONFIG environment variable first,
    /// Checks for XDG_CONFIG_HOME after,
    /// then defaults to ~/.config/dirscope/dirscope.toml,
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("DIRSCOPE_CONFIG") {
            return PathBuf::from(path);
        }

        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg_config).join("dirscope/dirscope.toml");
        }

        if let Some(home) = get_home() {
            return home.join(".config/dirscope/dirscope.toml");
        }
        PathBuf::from("dirscope.toml")
    }
}

/// Default configuration options
impl Default for Config {
    fn default() -> Self {
        Config::from(RawConfig::default())
    }
}
