//! Anti-aliased text from outline fonts (swash)

use crate::error::{RenderError, Result};
use crate::font::FontFace;
use image::{Rgba, RgbaImage};
use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;
use swash::GlyphId;

/// Draw `text` starting at pen position `x` on `baseline`.
///
/// The size shrinks when the run would otherwise pass the right edge.
/// Glyph pixels outside the bitmap are clipped.
#[allow(clippy::too_many_arguments)]
pub(crate) fn draw_text(
    image: &mut RgbaImage,
    context: &mut ScaleContext,
    font: &FontFace,
    text: &str,
    x: f32,
    baseline: f32,
    size: f32,
    ink: Rgba<u8>,
) -> Result<()> {
    let font_ref = font.as_swash()?;
    let charmap = font_ref.charmap();
    let glyphs = text
        .chars()
        .map(|ch| match charmap.map(ch) {
            0 => Err(RenderError::MissingGlyph(ch)),
            id => Ok(id),
        })
        .collect::<Result<Vec<GlyphId>>>()?;

    let units_per_em = font_ref.metrics(&[]).units_per_em as f32;
    let glyph_metrics = font_ref.glyph_metrics(&[]);
    let run_em: f32 = glyphs
        .iter()
        .map(|id| glyph_metrics.advance_width(*id))
        .sum::<f32>()
        / units_per_em;
    let available = image.width() as f32 - x;
    let size = if run_em * size > available {
        available / run_em
    } else {
        size
    };
    let scale = size / units_per_em;

    let mut scaler = context.builder(font_ref).size(size).build();
    let mut render = Render::new(&[Source::Outline, Source::Bitmap(StrikeWith::BestFit)]);
    render.format(Format::Alpha);

    let mut pen = x;
    for id in glyphs {
        // Blank glyphs render nothing but still advance.
        if let Some(glyph) = render.render(&mut scaler, id) {
            let left = pen.round() as i32 + glyph.placement.left;
            let top = baseline.round() as i32 - glyph.placement.top;
            blit_mask(
                image,
                &glyph.data,
                glyph.placement.width,
                glyph.placement.height,
                left,
                top,
                ink,
            );
        }
        pen += glyph_metrics.advance_width(id) * scale;
    }
    Ok(())
}

/// Composite an 8-bit coverage mask in `ink` over the image
fn blit_mask(
    image: &mut RgbaImage,
    mask: &[u8],
    width: u32,
    height: u32,
    left: i32,
    top: i32,
    ink: Rgba<u8>,
) {
    for row in 0..height {
        let y = top + row as i32;
        if y < 0 || y >= image.height() as i32 {
            continue;
        }
        for col in 0..width {
            let x = left + col as i32;
            if x < 0 || x >= image.width() as i32 {
                continue;
            }
            let Some(&coverage) = mask.get((row * width + col) as usize) else {
                continue;
            };
            if coverage == 0 {
                continue;
            }
            let pixel = image.get_pixel_mut(x as u32, y as u32);
            *pixel = blend(*pixel, ink, coverage);
        }
    }
}

/// Source-over composite of `ink` at `coverage` onto `dst`
fn blend(dst: Rgba<u8>, ink: Rgba<u8>, coverage: u8) -> Rgba<u8> {
    let src_a = (coverage as f32 / 255.0) * (ink.0[3] as f32 / 255.0);
    let dst_a = dst.0[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for channel in 0..3 {
        let src = ink.0[channel] as f32 * src_a;
        let below = dst.0[channel] as f32 * dst_a * (1.0 - src_a);
        out[channel] = ((src + below) / out_a).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    Rgba(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_coverage_replaces_the_pixel() {
        let ink = Rgba([10, 20, 30, 255]);
        assert_eq!(blend(Rgba([0, 0, 0, 0]), ink, 255), ink);
        assert_eq!(blend(Rgba([200, 200, 200, 255]), ink, 255), ink);
    }

    #[test]
    fn partial_coverage_keeps_the_ink_color() {
        let ink = Rgba([128, 128, 128, 255]);
        let edge = blend(Rgba([0, 0, 0, 0]), ink, 64);
        assert_eq!(&edge.0[..3], &[128, 128, 128]);
        assert_eq!(edge.0[3], 64);

        // Overlapping edges accumulate alpha.
        let twice = blend(edge, ink, 64);
        assert_eq!(&twice.0[..3], &[128, 128, 128]);
        assert!(twice.0[3] > 64);
    }

    #[test]
    fn masks_are_clipped_at_the_edges() {
        let mut image = RgbaImage::new(4, 4);
        let ink = Rgba([255, 255, 255, 255]);
        blit_mask(&mut image, &[255; 9], 3, 3, 2, -1, ink);

        let inked: Vec<(u32, u32)> = image
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[3] != 0)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(inked, vec![(2, 0), (3, 0), (2, 1), (3, 1)]);
    }
}
