//! Rendering error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The font has no glyph for this character
    #[error("no glyph for character {0:?}")]
    MissingGlyph(char),

    /// No usable font face was found
    #[error("no usable font face found")]
    FontUnavailable,

    /// Font data could not be read or parsed
    #[error("invalid font: {0}")]
    InvalidFont(String),

    /// Text would extend past the bitmap edge
    #[error("text `{text}` does not fit in a {size}px icon at scale {scale}")]
    Overflow {
        text: String,
        size: u32,
        scale: u32,
    },
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;
