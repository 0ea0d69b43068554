//! Icon rasterization
//!
//! With an outline font the 128×128 icon follows the classic toolbar clock:
//! bold 72px hours on a baseline at y=64, minutes on the bottom edge, and
//! the AM/PM initial at 36px in the bottom-right corner.
//!
//! Without one, the built-in 5×7 font is drawn at 8× (digits) and 4×
//! (marker) in the same places.

use crate::error::{RenderError, Result};
use crate::face::ClockFace;
use crate::font::{self, FontFace};
use crate::glyphs::{self, Glyph, GLYPH_HEIGHT, GLYPH_SPACING, GLYPH_WIDTH};
use crate::outline;
use image::{Rgba, RgbaImage};
use swash::scale::ScaleContext;
use tickmark_core::Color;

/// Edge length of the icon bitmap in pixels
pub const ICON_SIZE: u32 = 128;

const DIGIT_SIZE: f32 = 72.0;
const MARKER_SIZE: f32 = 36.0;
const TEXT_X: f32 = 8.0;
const MARKER_X: f32 = 100.0;

const DIGIT_SCALE: u32 = 8;
const MARKER_SCALE: u32 = 4;
const MARGIN_X: u32 = 8;
const MARGIN_Y: u32 = 4;

/// Turns a clock face into an icon bitmap
pub trait FaceRasterizer: Send + Sync {
    /// Render `face` in `color` onto a fresh transparent bitmap
    fn rasterize(&self, face: &ClockFace, color: Color) -> Result<RgbaImage>;
}

/// Draws clock faces with an outline font, or the built-in bitmap font
#[derive(Clone, Debug, Default)]
pub struct IconRasterizer {
    font: Option<FontFace>,
}

impl IconRasterizer {
    /// Rasterizer using the built-in bitmap font
    pub fn new() -> Self {
        Self { font: None }
    }

    pub fn with_font(font: FontFace) -> Self {
        Self { font: Some(font) }
    }

    /// Outline rasterizer over the best system face, else the bitmap font.
    ///
    /// Scans the font directories, so call it off the async runtime.
    pub fn system() -> Self {
        match font::load_system_face() {
            Ok(face) => {
                tracing::info!("icon font: {}", face.family());
                Self::with_font(face)
            }
            Err(err) => {
                tracing::warn!("{err}, using the built-in bitmap font");
                Self::new()
            }
        }
    }

    pub fn font(&self) -> Option<&FontFace> {
        self.font.as_ref()
    }

    /// Render `face` in `color` onto a fresh transparent bitmap
    pub fn rasterize(&self, face: &ClockFace, color: Color) -> Result<RgbaImage> {
        let ink = Rgba(color.to_rgba8());
        match &self.font {
            Some(font) => self.rasterize_outline(font, face, ink),
            None => self.rasterize_bitmap(face, ink),
        }
    }

    fn rasterize_outline(
        &self,
        font: &FontFace,
        face: &ClockFace,
        ink: Rgba<u8>,
    ) -> Result<RgbaImage> {
        let mut image = RgbaImage::new(ICON_SIZE, ICON_SIZE);
        let mut context = ScaleContext::new();
        let half = (ICON_SIZE / 2) as f32;
        let bottom = ICON_SIZE as f32;

        let mut draw = |text: &str, x: f32, baseline: f32, size: f32| {
            outline::draw_text(&mut image, &mut context, font, text, x, baseline, size, ink)
        };
        draw(&face.hour, TEXT_X, half, DIGIT_SIZE)?;
        draw(&face.minute, TEXT_X, bottom, DIGIT_SIZE)?;
        if let Some(marker) = face.marker {
            let mut buf = [0u8; 4];
            draw(marker.initial().encode_utf8(&mut buf), MARKER_X, bottom, MARKER_SIZE)?;
        }
        Ok(image)
    }

    fn rasterize_bitmap(&self, face: &ClockFace, ink: Rgba<u8>) -> Result<RgbaImage> {
        let mut image = RgbaImage::new(ICON_SIZE, ICON_SIZE);

        let digit_height = GLYPH_HEIGHT * DIGIT_SCALE;
        let half = ICON_SIZE / 2;
        self.draw_text(
            &mut image,
            &face.hour,
            MARGIN_X,
            half - digit_height - MARGIN_Y,
            DIGIT_SCALE,
            ink,
        )?;
        self.draw_text(
            &mut image,
            &face.minute,
            MARGIN_X,
            ICON_SIZE - digit_height - MARGIN_Y,
            DIGIT_SCALE,
            ink,
        )?;

        if let Some(marker) = face.marker {
            let mut buf = [0u8; 4];
            let initial: &str = marker.initial().encode_utf8(&mut buf);
            self.draw_text(
                &mut image,
                initial,
                ICON_SIZE - GLYPH_WIDTH * MARKER_SCALE - MARGIN_X,
                ICON_SIZE - GLYPH_HEIGHT * MARKER_SCALE - MARGIN_Y,
                MARKER_SCALE,
                ink,
            )?;
        }

        Ok(image)
    }

    /// Draw `text` in the bitmap font with its top-left corner at (`x`, `y`),
    /// each font pixel becoming a `scale`×`scale` block.
    ///
    /// Nothing is drawn if any character is missing or the text would leave
    /// the bitmap.
    pub fn draw_text(
        &self,
        image: &mut RgbaImage,
        text: &str,
        x: u32,
        y: u32,
        scale: u32,
        ink: Rgba<u8>,
    ) -> Result<()> {
        let glyphs = text
            .chars()
            .map(|ch| glyphs::glyph(ch).ok_or(RenderError::MissingGlyph(ch)))
            .collect::<Result<Vec<&Glyph>>>()?;

        let width = glyphs::run_width(glyphs.len() as u32) * scale;
        let height = GLYPH_HEIGHT * scale;
        if x + width > image.width() || y + height > image.height() {
            return Err(RenderError::Overflow {
                text: text.to_string(),
                size: image.width(),
                scale,
            });
        }

        let advance = (GLYPH_WIDTH + GLYPH_SPACING) * scale;
        for (i, glyph) in glyphs.iter().enumerate() {
            let origin_x = x + i as u32 * advance;
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if glyphs::is_set(glyph, col, row) {
                        fill_block(image, origin_x + col * scale, y + row * scale, scale, ink);
                    }
                }
            }
        }
        Ok(())
    }
}

impl FaceRasterizer for IconRasterizer {
    fn rasterize(&self, face: &ClockFace, color: Color) -> Result<RgbaImage> {
        IconRasterizer::rasterize(self, face, color)
    }
}

fn fill_block(image: &mut RgbaImage, x: u32, y: u32, scale: u32, ink: Rgba<u8>) {
    for dy in 0..scale {
        for dx in 0..scale {
            image.put_pixel(x + dx, y + dy, ink);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::face::Meridiem;

    fn face(hour: &str, minute: &str, marker: Option<Meridiem>) -> ClockFace {
        ClockFace {
            hour: hour.into(),
            minute: minute.into(),
            marker,
        }
    }

    fn inked(image: &RgbaImage) -> usize {
        image.pixels().filter(|p| p.0[3] != 0).count()
    }

    #[test]
    fn icon_is_fixed_size_and_uses_requested_color() {
        let image = IconRasterizer::new()
            .rasterize(&face("12", "34", None), Color::from_hex(0x808080))
            .unwrap();

        assert_eq!(image.dimensions(), (ICON_SIZE, ICON_SIZE));
        let mut colors: Vec<[u8; 4]> = image
            .pixels()
            .filter(|p| p.0[3] != 0)
            .map(|p| p.0)
            .collect();
        colors.dedup();
        assert_eq!(colors, vec![[128, 128, 128, 255]]);
    }

    #[test]
    fn hours_sit_above_minutes() {
        let image = IconRasterizer::new()
            .rasterize(&face("88", "11", None), Color::WHITE)
            .unwrap();
        let top = image
            .enumerate_pixels()
            .filter(|(_, y, p)| *y < ICON_SIZE / 2 && p.0[3] != 0)
            .count();
        let bottom = image
            .enumerate_pixels()
            .filter(|(_, y, p)| *y >= ICON_SIZE / 2 && p.0[3] != 0)
            .count();
        assert!(top > 0 && bottom > 0);
        // 8 has more lit pixels than 1 in this font.
        assert!(top > bottom);
    }

    #[test]
    fn marker_adds_ink_in_the_corner() {
        let rasterizer = IconRasterizer::new();
        let plain = rasterizer
            .rasterize(&face("09", "30", None), Color::BLACK)
            .unwrap();
        let marked = rasterizer
            .rasterize(&face("09", "30", Some(Meridiem::Pm)), Color::BLACK)
            .unwrap();

        assert!(inked(&marked) > inked(&plain));
        let corner = marked
            .enumerate_pixels()
            .filter(|(x, y, p)| *x >= 100 && *y >= 96 && p.0[3] != 0)
            .count();
        assert!(corner > 0);
    }

    #[test]
    fn overflow_and_missing_glyphs_are_errors() {
        let rasterizer = IconRasterizer::new();
        let mut image = RgbaImage::new(ICON_SIZE, ICON_SIZE);
        let ink = Rgba([255, 255, 255, 255]);

        assert!(matches!(
            rasterizer.draw_text(&mut image, "123", 8, 0, 8, ink),
            Err(RenderError::Overflow { .. })
        ));
        assert_eq!(
            rasterizer.draw_text(&mut image, "1Z", 0, 0, 1, ink),
            Err(RenderError::MissingGlyph('Z'))
        );
        assert_eq!(inked(&image), 0);
    }

    #[test]
    fn outline_font_draws_antialiased_ink_in_one_color() {
        let Ok(font) = font::load_system_face() else {
            return;
        };
        let rasterizer = IconRasterizer::with_font(font);
        let image = rasterizer
            .rasterize(&face("10", "28", Some(Meridiem::Am)), Color::from_hex(0x808080))
            .unwrap();

        assert_eq!(image.dimensions(), (ICON_SIZE, ICON_SIZE));
        let inked: Vec<[u8; 4]> = image
            .pixels()
            .filter(|p| p.0[3] != 0)
            .map(|p| p.0)
            .collect();
        assert!(!inked.is_empty());
        for pixel in &inked {
            for channel in &pixel[..3] {
                assert!(channel.abs_diff(128) <= 1, "{pixel:?}");
            }
        }
        // Edges are blended, not solid.
        assert!(inked.iter().any(|p| p[3] < 255));
    }

    #[test]
    fn outline_layout_keeps_hours_above_the_midline() {
        let Ok(font) = font::load_system_face() else {
            return;
        };
        let rasterizer = IconRasterizer::with_font(font);
        // Round digits may overshoot the baseline by a pixel or two.
        let hours_only = rasterizer
            .rasterize(&face("88", "", None), Color::WHITE)
            .unwrap();
        let below = hours_only
            .enumerate_pixels()
            .filter(|(_, y, p)| *y > ICON_SIZE / 2 + 2 && p.0[3] != 0)
            .count();
        assert_eq!(below, 0);
        assert!(inked(&hours_only) > 0);
    }

    #[test]
    fn rasterizer_is_usable_as_a_trait_object() {
        let rasterizer: Box<dyn FaceRasterizer> = Box::new(IconRasterizer::new());
        let image = rasterizer
            .rasterize(&face("07", "45", None), Color::WHITE)
            .unwrap();
        assert!(inked(&image) > 0);
    }
}
