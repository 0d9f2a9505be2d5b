//! The compositing core: live comparison preview and export render.
//!
//! Both paths read the same [`Session`] and bake adjustments through the
//! same [`AdjustmentSpec`](crate::filters::AdjustmentSpec) pixel pipeline,
//! so preview and export stay mathematically consistent.
//!
//! - [`preview`] renders the before/after frame: the source image with the
//!   enhanced+filtered layer composited over the left `reveal`% columns.
//! - [`export`] renders the flattened "after" artifact: always the full
//!   enhanced frame (reveal has no effect), filter baked in, watermark
//!   stamped last. Export is best-effort: a decode failure degrades to the
//!   best available encoded image rather than failing the download.

use image::imageops::FilterType;
use image::RgbaImage;

use crate::codec::EncodedImage;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::watermark;

/// Render the live comparison frame at the source's natural size.
///
/// Right of the reveal boundary: the unfiltered original. Left of it: the
/// enhanced image (resized to the source frame if the service returned
/// different dimensions) with the active filter applied. Without an
/// enhanced image the frame is just the source.
///
/// # Errors
///
/// [`Error::NoSource`] if nothing has been ingested, [`Error::Image`] if a
/// layer fails to decode. Preview is not best-effort; the caller keeps
/// showing the last good frame.
pub fn preview(session: &Session) -> Result<RgbaImage> {
    let source = session.source().ok_or(Error::NoSource)?;
    let mut frame = source.decode()?.to_rgba8();

    let Some(enhanced) = session.enhanced() else {
        return Ok(frame);
    };

    let mut layer = enhanced.decode()?.to_rgba8();
    if layer.dimensions() != frame.dimensions() {
        layer = image::imageops::resize(&layer, frame.width(), frame.height(), FilterType::Lanczos3);
    }
    session.preset().adjustments().apply(&mut layer);

    let boundary = reveal_boundary(frame.width(), session.reveal());
    for y in 0..frame.height() {
        for x in 0..boundary {
            frame.put_pixel(x, y, *layer.get_pixel(x, y));
        }
    }

    Ok(frame)
}

/// Render the flattened export artifact as a lossless PNG.
///
/// Always the "after" state: the enhanced image with the active filter
/// baked in, independent of the reveal position. The watermark is stamped
/// after the filter (never color-shifted) and only when both the flag is
/// set and an enhanced image exists. Without an enhanced image the export
/// degrades to the unmodified source.
///
/// On any rendering failure the best available encoded image is returned
/// unmodified instead of aborting the download.
///
/// # Errors
///
/// Only [`Error::NoSource`] when nothing has been ingested; rendering
/// failures are swallowed by the fallback policy.
pub fn export(session: &Session) -> Result<EncodedImage> {
    let source = session.source().ok_or(Error::NoSource)?;
    let best_available = session.enhanced().unwrap_or(source);

    match render_export(session, source) {
        Ok(artifact) => Ok(artifact),
        Err(e) => {
            log::warn!("export render failed ({e}), falling back to encoded image");
            Ok(best_available.clone())
        }
    }
}

fn render_export(session: &Session, source: &EncodedImage) -> Result<EncodedImage> {
    let Some(enhanced) = session.enhanced() else {
        // No enhancement: the artifact is the source, unmodified.
        let pixels = source.decode()?.to_rgba8();
        return EncodedImage::from_pixels(&pixels);
    };

    let mut pixels = enhanced.decode()?.to_rgba8();
    session.preset().adjustments().apply(&mut pixels);

    if session.watermark() {
        watermark::stamp(&mut pixels);
    }

    EncodedImage::from_pixels(&pixels)
}

/// First column owned by the original layer, for a reveal in `[0, 100]`.
fn reveal_boundary(width: u32, reveal: u8) -> u32 {
    #[allow(clippy::cast_possible_truncation)] // reveal <= 100, result <= width
    {
        (u64::from(width) * u64::from(reveal) / 100) as u32
    }
}
