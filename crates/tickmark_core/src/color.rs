//! Color type
//!
//! Colors are stored as linear `f32` RGBA and converted to 8-bit channels when
//! written into a bitmap.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a color string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    #[error("invalid hex color `{0}` (expected #rrggbb or #rgb)")]
    InvalidHex(String),

    #[error("unknown color name `{0}`")]
    UnknownName(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// Convert to 8-bit RGBA channels, clamping out-of-range components
    pub fn to_rgba8(&self) -> [u8; 4] {
        fn channel(v: f32) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }

    /// Look up one of the CSS named colors tickmark understands
    pub fn from_css_name(name: &str) -> Option<Self> {
        let hex = match name.to_ascii_lowercase().as_str() {
            "white" => 0xFFFFFF,
            "whitesmoke" => 0xF5F5F5,
            "gainsboro" => 0xDCDCDC,
            "lightgrey" | "lightgray" => 0xD3D3D3,
            "silver" => 0xC0C0C0,
            "darkgrey" | "darkgray" => 0xA9A9A9,
            "grey" | "gray" => 0x808080,
            "dimgrey" | "dimgray" => 0x696969,
            "black" => 0x000000,
            "red" => 0xFF0000,
            "orange" => 0xFFA500,
            "yellow" => 0xFFFF00,
            "green" => 0x008000,
            "blue" => 0x0000FF,
            "navy" => 0x000080,
            "purple" => 0x800080,
            _ => return None,
        };
        Some(Self::from_hex(hex))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }

        let Some(digits) = s.strip_prefix('#') else {
            return Self::from_css_name(s).ok_or_else(|| ColorParseError::UnknownName(s.into()));
        };

        let invalid = || ColorParseError::InvalidHex(s.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16)
                .map(Self::from_hex)
                .map_err(|_| invalid()),
            3 => {
                // #rgb expands each nibble: #abc == #aabbcc
                let short = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
                let r = (short >> 8) & 0xF;
                let g = (short >> 4) & 0xF;
                let b = short & 0xF;
                Ok(Self::from_hex(((r * 0x11) << 16) | ((g * 0x11) << 8) | (b * 0x11)))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "rgba({r},{g},{b},{})", self.a)
        }
    }
}
