//! Application error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tickmark_theme::ThemeError;

/// Preference backend failures
#[derive(Error, Debug)]
pub enum PrefsError {
    /// Reading or writing the backing file failed
    #[error("Preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Preferences could not be encoded
    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),

    /// Backend-specific failure
    #[error("Preference backend error: {0}")]
    Backend(String),
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML for [`crate::AppConfig`]
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The configured palette is unusable
    #[error("Invalid palette: {0}")]
    Palette(#[from] ThemeError),
}

/// Icon host failures
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Icon host I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Bitmap could not be encoded for the host
    #[error("Icon encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// Host is gone or not accepting updates
    #[error("Icon host unavailable: {0}")]
    Unavailable(String),
}
