//! Error types for the insta-transform crate.

/// Errors that can occur across the enhancement pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The string is not a well-formed `data:<mime>;base64,<payload>` URI.
    #[error("invalid data URI: {0}")]
    InvalidDataUri(String),

    /// The image format or MIME type is not supported.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error occurred during image processing (decode, encode, draw).
    #[error("image processing error: {0}")]
    Image(#[from] image::ImageError),

    /// The enhancement service call failed (network, status, or response shape).
    #[error("enhancement failed: {0}")]
    Enhancement(String),

    /// An enhancement request is already in flight for this client.
    #[error("an enhancement request is already in flight")]
    EnhancementPending,

    /// The session has no source image for the requested operation.
    #[error("no source image ingested")]
    NoSource,
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
