use crate::due::DateStyle;
use crate::render::OutputFormat;
use crate::report::{DEFAULT_WINDOW_DAYS, ReportOptions, TaskFilter};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV_VAR: &str = "TOD_REPORT_CONFIG";

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("unknown log level '{0}'")]
    LogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default)]
    pub date_style: DateStyle,
    #[serde(default)]
    pub format: OutputFormat,
    /// Program and arguments that print, or write to `{out}`, the task export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_command: Option<Vec<String>>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            date_style: DateStyle::default(),
            format: OutputFormat::default(),
            export_command: None,
            log_level: default_log_level(),
        }
    }
}

impl ReportConfig {
    pub fn from_toml_str(input: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Defaults when no path is given. A given path must exist and parse.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn report_options(&self, filter: TaskFilter) -> ReportOptions {
        ReportOptions {
            window_days: self.window_days,
            date_style: self.date_style,
            filter,
        }
    }
}
