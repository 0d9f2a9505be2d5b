//! Watermark text rendering.
//!
//! Stamps the fixed `InstaTransform` mark in the bottom-right corner,
//! white at 70% opacity, alpha-blended over the composited pixels. Glyphs
//! come from the `font8x8` basic table and are scaled by integer pixel
//! replication; the nominal size tracks image width with a floor so the
//! mark stays legible on small images.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

/// The watermark text.
pub const WATERMARK_TEXT: &str = "InstaTransform";

/// Distance from the right and bottom edges, in pixels.
const MARGIN: u32 = 20;

/// Watermark color: white at 70% opacity.
const COLOR: Rgba<u8> = Rgba([255, 255, 255, 179]);

/// Minimum nominal glyph height in pixels.
const MIN_SIZE: u32 = 24;

/// Base glyph cell size in the 8x8 font.
const GLYPH_SIZE: u32 = 8;

/// Stamp the watermark onto an image in place.
///
/// The mark is drawn last in the export pipeline, after any filter bake-in,
/// so its pixels are never color-shifted by the active adjustments.
pub fn stamp(image: &mut RgbaImage) {
    let scale = glyph_scale(image.width());
    let advance = GLYPH_SIZE * scale;

    #[allow(clippy::cast_possible_truncation)]
    let text_width = WATERMARK_TEXT.chars().count() as u32 * advance;
    let x0 = image.width().saturating_sub(MARGIN + text_width);
    let y0 = image.height().saturating_sub(MARGIN + advance);

    let mut cursor_x = x0;
    for ch in WATERMARK_TEXT.chars() {
        if let Some(glyph) = BASIC_FONTS.get(ch) {
            draw_glyph(image, cursor_x, y0, &glyph, scale);
        }
        cursor_x += advance;
    }
}

/// Glyph scale for a given image width: nominal size `max(24, width / 40)`
/// divided by the 8px glyph cell.
fn glyph_scale(width: u32) -> u32 {
    (width / 40).max(MIN_SIZE) / GLYPH_SIZE
}

fn draw_glyph(image: &mut RgbaImage, x0: u32, y0: u32, glyph: &[u8; 8], scale: u32) {
    for (row_idx, row) in glyph.iter().enumerate() {
        for col_idx in 0..GLYPH_SIZE {
            if (row >> col_idx) & 1 == 0 {
                continue;
            }
            #[allow(clippy::cast_possible_truncation)]
            let py0 = y0 + row_idx as u32 * scale;
            let px0 = x0 + col_idx * scale;
            for sy in 0..scale {
                for sx in 0..scale {
                    let (tx, ty) = (px0 + sx, py0 + sy);
                    if tx < image.width() && ty < image.height() {
                        let dst = *image.get_pixel(tx, ty);
                        image.put_pixel(tx, ty, blend(dst, COLOR));
                    }
                }
            }
        }
    }
}

/// Source-over alpha blend of `src` onto `dst`.
fn blend(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let a = f32::from(src[3]) / 255.0;
    let inv = 1.0 - a;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mix = |d: u8, s: u8| -> u8 {
        (f32::from(d) * inv + f32::from(s) * a)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    Rgba([
        mix(dst[0], src[0]),
        mix(dst[1], src[1]),
        mix(dst[2], src[2]),
        dst[3].max(src[3]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_scale_has_a_floor_for_small_images() {
        // Below 960px wide the 24px floor wins: scale 3.
        assert_eq!(glyph_scale(100), 3);
        assert_eq!(glyph_scale(400), 3);
        assert_eq!(glyph_scale(960), 3);
    }

    #[test]
    fn glyph_scale_grows_with_width() {
        assert_eq!(glyph_scale(1280), 4);
        assert_eq!(glyph_scale(3200), 10);
    }

    #[test]
    fn stamp_touches_bottom_right_region_only() {
        let mut img = RgbaImage::from_pixel(400, 300, Rgba([0, 0, 0, 255]));
        stamp(&mut img);

        // Nothing above the text band changes.
        for y in 0..200 {
            for x in 0..400 {
                assert_eq!(img.get_pixel(x, y), &Rgba([0, 0, 0, 255]));
            }
        }

        // Something in the bottom-right band changed.
        let changed = (200..300)
            .flat_map(|y| (0..400).map(move |x| (x, y)))
            .any(|(x, y)| img.get_pixel(x, y) != &Rgba([0, 0, 0, 255]));
        assert!(changed, "watermark left no mark");
    }

    #[test]
    fn stamped_pixels_are_translucent_white_over_black() {
        let mut img = RgbaImage::from_pixel(400, 300, Rgba([0, 0, 0, 255]));
        stamp(&mut img);

        // 70% white over black lands at 179 per channel.
        let lit: Vec<_> = img
            .pixels()
            .filter(|px| px.0 != [0, 0, 0, 255])
            .collect();
        assert!(!lit.is_empty());
        for px in lit {
            assert_eq!(px.0, [179, 179, 179, 255]);
        }
    }

    #[test]
    fn stamp_survives_images_smaller_than_the_text() {
        let mut img = RgbaImage::from_pixel(40, 30, Rgba([10, 10, 10, 255]));
        stamp(&mut img);
        // Just must not panic; clipping handles the rest.
    }
}
