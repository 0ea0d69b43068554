//! tickmark configuration file handling

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tickmark_theme::{Palette, DEFAULT_POLL_INTERVAL};

pub const CONFIG_FILE_NAME: &str = "tickmark.toml";
const PREFERENCES_FILE_NAME: &str = "preferences.toml";

/// Top-level configuration (tickmark.toml)
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Palette entries, CSS names or `#rrggbb`
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    /// How often the OS theme is polled, in milliseconds; 0 disables polling
    #[serde(default = "default_theme_poll_ms")]
    pub theme_poll_ms: u64,
    /// Preference file; defaults to the user config directory
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
    /// Where the file host writes the icon
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_palette() -> Vec<String> {
    Palette::default().iter().map(|c| c.name.clone()).collect()
}

fn default_theme_poll_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            theme_poll_ms: default_theme_poll_ms(),
            preferences_path: None,
            output_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Load `path` if given, else the default location if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => {
                tracing::debug!("loading config from {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette::from_specs(self.palette.as_slice())?)
    }

    /// Theme poll interval, `None` when polling is disabled
    pub fn theme_poll_interval(&self) -> Option<Duration> {
        (self.theme_poll_ms > 0).then(|| Duration::from_millis(self.theme_poll_ms))
    }

    /// Configured preference file, else `<config dir>/tickmark/preferences.toml`
    pub fn preferences_path(&self) -> Option<PathBuf> {
        self.preferences_path
            .clone()
            .or_else(|| config_dir().map(|dir| dir.join(PREFERENCES_FILE_NAME)))
    }
}

/// `<config dir>/tickmark`
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tickmark"))
}

pub fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}
