//! tickmark icon rendering
//!
//! Turns a wall-clock reading into the 128×128 RGBA bitmap shown on the
//! toolbar icon.
//!
//! - [`ClockFace`]: the formatted hour/minute/marker text for one reading
//! - [`font`]: system font discovery (fontdb)
//! - [`glyphs`]: the built-in 5×7 pixel font, used when no font loads
//! - [`IconRasterizer`]: draws a face onto a transparent bitmap in one color

pub mod error;
pub mod face;
pub mod font;
pub mod glyphs;
mod outline;
pub mod raster;

pub use error::{RenderError, Result};
pub use face::{title_for, ClockFace, Meridiem};
pub use font::FontFace;
pub use raster::{FaceRasterizer, IconRasterizer, ICON_SIZE};

/// Re-exported so callers can name the bitmap type without importing `image`
pub use image::RgbaImage;
