//! Run configuration, optionally loaded from a RON file.
//!
//! ```ron
//! (
//!     dispatch: worker,
//!     worker_threads: Some(2),
//!     output_dir: Some("decoded"),
//!     log: terminal,
//!     log_level: "info",
//! )
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use sii_engine::{DispatchMode, EngineSettings};
use thiserror::Error;

use super::logging::LogDestination;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DispatchSetting {
    InProcess,
    #[default]
    Worker,
}

impl From<DispatchSetting> for DispatchMode {
    fn from(setting: DispatchSetting) -> Self {
        match setting {
            DispatchSetting::InProcess => DispatchMode::InProcess,
            DispatchSetting::Worker => DispatchMode::Worker,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dispatch: DispatchSetting,
    pub worker_threads: Option<usize>,
    /// Where successful downloads are saved. `None` keeps them in memory only.
    pub output_dir: Option<PathBuf>,
    pub log: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dispatch: DispatchSetting::Worker,
            worker_threads: None,
            output_dir: None,
            log: LogDestination::Terminal,
            log_level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::from_ron(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_ron(content: &str) -> Result<Self, String> {
        ron::from_str(content).map_err(|err| err.to_string())
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
            .map_err(|err| ConfigError::Serialize(err.to_string()))
    }

    /// Parsed `log_level`; unknown names fall back to `Warn`.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Warn)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            dispatch_mode: self.dispatch.into(),
            worker_threads: self.worker_threads,
        }
    }
}
