//! Encoded image handles and the `data:` URI codec.
//!
//! The enhancement service speaks base64 data URIs
//! (`data:<mime>;base64,<payload>`), so images travel through the pipeline
//! as [`EncodedImage`] handles: a MIME type plus the raw encoded bytes.
//! Handles are immutable once built; replacing an image means building a
//! new handle.

use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{Error, Result};

const BASE64_MARKER: &str = ";base64,";

/// A self-describing encoded raster image (format + bytes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime: String,
    bytes: Vec<u8>,
}

impl EncodedImage {
    /// Build a handle from a MIME type and already-encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] if `mime` is not an `image/*` type.
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let mime = mime.into();
        if !mime.starts_with("image/") {
            return Err(Error::UnsupportedFormat(mime));
        }
        Ok(Self { mime, bytes })
    }

    /// Parse a `data:<mime>;base64,<payload>` URI.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDataUri`] if the scheme, base64 marker, or
    /// payload is malformed, and [`Error::UnsupportedFormat`] if the MIME
    /// type is not `image/*`.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| Error::InvalidDataUri("missing data: scheme".to_string()))?;

        let marker = rest
            .find(BASE64_MARKER)
            .ok_or_else(|| Error::InvalidDataUri("missing ;base64, marker".to_string()))?;

        let mime = &rest[..marker];
        let payload = &rest[marker + BASE64_MARKER.len()..];

        let bytes = general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| Error::InvalidDataUri(format!("bad base64 payload: {e}")))?;

        Self::new(mime, bytes)
    }

    /// Read an image file into a handle, inferring MIME from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] for unknown extensions and
    /// [`Error::Io`] if the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mime = mime_for_path(path)?;
        let bytes = std::fs::read(path)?;
        Self::new(mime, bytes)
    }

    /// Encode an RGBA pixel buffer as a lossless PNG handle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if PNG encoding fails.
    pub fn from_pixels(pixels: &RgbaImage) -> Result<Self> {
        let mut bytes = Vec::new();
        pixels.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)?;
        Self::new("image/png", bytes)
    }

    /// Render the handle back into a `data:` URI string.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        let payload = general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{}{}{}", self.mime, BASE64_MARKER, payload)
    }

    /// Decode into pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Image`] if the bytes do not decode as an image.
    pub fn decode(&self) -> Result<DynamicImage> {
        Ok(image::load_from_memory(&self.bytes)?)
    }

    /// The MIME type of the encoded data.
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// The raw encoded bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Map a file extension to its `image/*` MIME type.
fn mime_for_path(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "png" => Ok("image/png"),
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "webp" => Ok("image/webp"),
        "bmp" => Ok("image/bmp"),
        "gif" => Ok("image/gif"),
        _ => Err(Error::UnsupportedFormat(format!(
            "unknown extension: {}",
            path.display()
        ))),
    }
}
