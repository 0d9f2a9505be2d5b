//! Session state: the single source of truth for preview and export.
//!
//! A [`Session`] owns the composition tuple (source, optional enhanced,
//! preset, watermark flag, reveal position). All invariants live in the
//! mutation methods instead of scattered assignments:
//!
//! - a new source always discards the prior enhancement, filter selection
//!   and reveal position, so an enhanced image is only ever derived from
//!   the current source;
//! - the reveal position is clamped to `[0, 100]` and inert while no
//!   enhanced image exists.

use std::path::Path;

use crate::codec::EncodedImage;
use crate::error::Result;
use crate::filters::FilterPreset;

/// Default reveal position: the comparison boundary at midframe.
pub const DEFAULT_REVEAL: u8 = 50;

/// One user's composition state for a single photo.
#[derive(Debug, Clone, Default)]
pub struct Session {
    source: Option<EncodedImage>,
    enhanced: Option<EncodedImage>,
    preset: FilterPreset,
    watermark: bool,
    reveal: u8,
}

impl Session {
    /// An empty session with the watermark enabled, awaiting ingestion.
    #[must_use]
    pub fn new() -> Self {
        Self {
            watermark: true,
            reveal: DEFAULT_REVEAL,
            ..Self::default()
        }
    }

    /// Install a new source image, resetting everything derived from the
    /// previous one: the enhanced image is cleared, the filter returns to
    /// `none` and the reveal position to its midpoint.
    pub fn ingest(&mut self, source: EncodedImage) {
        log::info!("ingested {} byte {} source", source.bytes().len(), source.mime());
        self.source = Some(source);
        self.enhanced = None;
        self.preset = FilterPreset::None;
        self.reveal = DEFAULT_REVEAL;
    }

    /// Read an image file and ingest it.
    ///
    /// On failure the session is left unchanged.
    ///
    /// # Errors
    ///
    /// Propagates codec errors from reading or classifying the file.
    pub fn ingest_path(&mut self, path: &Path) -> Result<()> {
        let source = EncodedImage::from_path(path)?;
        self.ingest(source);
        Ok(())
    }

    /// Install an enhancement result, replacing any prior one.
    ///
    /// Callers must only pass images derived from the current source; on a
    /// failed enhancement call, do not call this at all and the prior
    /// enhanced image (if any) stays visible and exportable.
    pub fn apply_enhanced(&mut self, enhanced: EncodedImage) {
        self.enhanced = Some(enhanced);
    }

    /// Select a filter preset for the enhanced layer.
    pub fn set_preset(&mut self, preset: FilterPreset) {
        self.preset = preset;
    }

    /// Toggle the export watermark.
    pub fn set_watermark(&mut self, enabled: bool) {
        self.watermark = enabled;
    }

    /// Move the comparison boundary, clamped to `[0, 100]`.
    ///
    /// Inert while no enhanced image exists (the comparison view is
    /// disabled without an "after" layer).
    pub fn set_reveal(&mut self, position: i64) {
        if self.enhanced.is_none() {
            return;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.reveal = position.clamp(0, 100) as u8;
        }
    }

    /// The current source image, if one has been ingested.
    #[must_use]
    pub fn source(&self) -> Option<&EncodedImage> {
        self.source.as_ref()
    }

    /// The current enhanced image, if the service has produced one.
    #[must_use]
    pub fn enhanced(&self) -> Option<&EncodedImage> {
        self.enhanced.as_ref()
    }

    /// The selected filter preset.
    #[must_use]
    pub fn preset(&self) -> FilterPreset {
        self.preset
    }

    /// Whether the export watermark is enabled.
    #[must_use]
    pub fn watermark(&self) -> bool {
        self.watermark
    }

    /// The comparison boundary position in `[0, 100]`.
    #[must_use]
    pub fn reveal(&self) -> u8 {
        self.reveal
    }
}
