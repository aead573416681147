//! Logging settings for dirscope.

use serde::Deserialize;
use simplelog::LevelFilter;

use std::path::PathBuf;

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Logging {
    level: String,
    file: Option<PathBuf>,
}

impl Default for Logging {
    fn default() -> Self {
        Logging {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Logging {
    /// Parsed level. Unknown names fall back to `info`.
    pub fn level(&self) -> LevelFilter {
        match self.level.to_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" | "warning" => LevelFilter::Warn,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        }
    }

    /// Configured log file, else `<cache dir>/dirscope/dirscope.log`.
    pub fn file(&self) -> Option<PathBuf> {
        self.file
            .clone()
            .or_else(|| dirs::cache_dir().map(|d| d.join("dirscope").join("dirscope.log")))
    }
}
