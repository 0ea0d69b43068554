//! Theme error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    /// The palette has no entries
    #[error("palette must contain at least one color")]
    EmptyPalette,

    /// A palette entry could not be parsed
    #[error("invalid palette color `{entry}`: {source}")]
    InvalidColor {
        entry: String,
        #[source]
        source: tickmark_core::ColorParseError,
    },

    /// A scheme name other than `light`/`dark`
    #[error("unknown color scheme `{0}` (expected `light` or `dark`)")]
    UnknownScheme(String),

    /// Platform tooling could not report a preference
    #[error("color scheme detection failed: {0}")]
    Detection(String),

    /// Platform not supported on this OS
    #[error("color scheme detection not supported on {0}")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, ThemeError>;
