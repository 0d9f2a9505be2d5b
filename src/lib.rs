//! Photo enhancement pipeline: AI magic-enhance, preset filters,
//! watermarking and before/after compositing.
//!
//! A [`Session`] owns one photo's composition state. Images enter as
//! encoded handles ([`EncodedImage`], transportable as base64 data URIs),
//! optionally pass through a hosted enhancement service
//! ([`EnhanceClient`]), and come out of the [`compositor`] as either a
//! live before/after comparison frame or a flattened PNG artifact.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use insta_transform::{compositor, share, FilterPreset, Session};
//!
//! let mut session = Session::new();
//! session.ingest_path(Path::new("photo.jpg")).unwrap();
//! session.set_preset(FilterPreset::Vintage);
//! let artifact = compositor::export(&session).unwrap();
//! std::fs::write("photo_after.png", artifact.bytes()).unwrap();
//! ```
//!
//! # Enhancement
//!
//! The enhancement service is an opaque boundary: a data URI goes out,
//! an enhanced data URI comes back. A failed call leaves the session
//! untouched, so a prior successful enhancement stays visible.
//!
//! ```no_run
//! use std::time::Duration;
//! use insta_transform::{EnhanceClient, Session};
//!
//! # let mut session = Session::new();
//! let client = EnhanceClient::new("https://example.com/enhance", Duration::from_secs(30))
//!     .expect("failed to build client");
//! match client.enhance(session.source().unwrap()) {
//!     Ok(enhanced) => session.apply_enhanced(enhanced),
//!     Err(e) => eprintln!("enhancement failed: {e}"),
//! }
//! ```

#![deny(missing_docs)]

mod codec;
pub mod compositor;
mod enhance;
pub mod error;
pub mod filters;
mod session;
pub mod share;
mod watermark;

pub use codec::EncodedImage;
pub use enhance::{EnhanceClient, DEFAULT_TIMEOUT_SECS};
pub use error::{Error, Result};
pub use filters::{AdjustmentSpec, FilterPreset};
pub use session::{Session, DEFAULT_REVEAL};
pub use share::Platform;
pub use watermark::WATERMARK_TEXT;
