//! Download and social-share dispatch.
//!
//! `download` writes the compositor's export artifact under a fixed
//! filename; `share_url` builds the platform deep link. The share link
//! carries no image data, only the pre-filled text and app URL — a known
//! limitation of web share intents.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use reqwest::Url;

use crate::compositor;
use crate::error::{Error, Result};
use crate::session::Session;

/// Fixed filename for downloaded artifacts.
pub const DOWNLOAD_FILENAME: &str = "InstaTransform_enhanced.png";

/// Pre-filled share text.
const SHARE_TEXT: &str = "Check out my enhanced photo! #InstaTransform";

/// The app link carried by share intents.
const APP_URL: &str = "https://insta-transform.app";

/// Social platforms offered by the share surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Twitter / X tweet intent.
    Twitter,
    /// Facebook sharer dialog.
    Facebook,
    /// Declared but unimplemented: no share intent exists.
    Instagram,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::Instagram => "instagram",
        };
        f.write_str(name)
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twitter" => Ok(Self::Twitter),
            "facebook" => Ok(Self::Facebook),
            "instagram" => Ok(Self::Instagram),
            other => Err(Error::UnsupportedFormat(format!(
                "unknown share platform: {other}"
            ))),
        }
    }
}

/// Write the export artifact into `dir` as [`DOWNLOAD_FILENAME`].
///
/// A no-op returning `Ok(None)` when the session has no enhanced image,
/// matching a disabled download button. The artifact is regenerated on
/// every call; nothing is cached.
///
/// # Errors
///
/// Propagates compositor and filesystem errors.
pub fn download(session: &Session, dir: &Path) -> Result<Option<PathBuf>> {
    if session.enhanced().is_none() {
        log::debug!("download skipped: no enhanced image");
        return Ok(None);
    }

    let artifact = compositor::export(session)?;
    let path = dir.join(DOWNLOAD_FILENAME);
    std::fs::write(&path, artifact.bytes())?;
    log::info!("wrote {} ({} bytes)", path.display(), artifact.bytes().len());
    Ok(Some(path))
}

/// Build the share URL for a platform.
///
/// Returns `None` for platforms without a share intent (Instagram).
#[must_use]
pub fn share_url(platform: Platform) -> Option<Url> {
    let url = match platform {
        Platform::Twitter => Url::parse_with_params(
            "https://twitter.com/intent/tweet",
            &[("text", SHARE_TEXT), ("url", APP_URL)],
        ),
        Platform::Facebook => Url::parse_with_params(
            "https://www.facebook.com/sharer/sharer.php",
            &[("u", APP_URL), ("quote", SHARE_TEXT)],
        ),
        Platform::Instagram => return None,
    };

    // The bases are static and well-formed; parse cannot fail.
    url.ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::EncodedImage;
    use image::{Rgba, RgbaImage};

    fn solid_png(w: u32, h: u32) -> EncodedImage {
        EncodedImage::from_pixels(&RgbaImage::from_pixel(w, h, Rgba([9, 9, 9, 255]))).unwrap()
    }

    #[test]
    fn download_is_a_no_op_without_enhancement() {
        let mut s = Session::new();
        s.ingest(solid_png(4, 4));

        let dir = tempfile::tempdir().unwrap();
        let written = download(&s, dir.path()).unwrap();
        assert!(written.is_none());
        assert!(!dir.path().join(DOWNLOAD_FILENAME).exists());
    }

    #[test]
    fn download_writes_fixed_filename() {
        let mut s = Session::new();
        s.ingest(solid_png(4, 4));
        s.apply_enhanced(solid_png(4, 4));
        s.set_watermark(false);

        let dir = tempfile::tempdir().unwrap();
        let written = download(&s, dir.path()).unwrap().unwrap();
        assert_eq!(written.file_name().unwrap(), DOWNLOAD_FILENAME);

        let bytes = std::fs::read(&written).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.to_rgba8().dimensions(), (4, 4));
    }

    #[test]
    fn twitter_url_carries_text_and_app_link() {
        let url = share_url(Platform::Twitter).unwrap();
        assert_eq!(url.host_str(), Some("twitter.com"));
        assert_eq!(url.path(), "/intent/tweet");
        let query = url.query().unwrap();
        assert!(query.contains("text="));
        assert!(query.contains("%23InstaTransform"));
    }

    #[test]
    fn facebook_url_uses_sharer_endpoint() {
        let url = share_url(Platform::Facebook).unwrap();
        assert_eq!(url.host_str(), Some("www.facebook.com"));
        assert_eq!(url.path(), "/sharer/sharer.php");
        assert!(url.query().unwrap().starts_with("u="));
    }

    #[test]
    fn instagram_has_no_share_intent() {
        assert!(share_url(Platform::Instagram).is_none());
    }

    #[test]
    fn platform_round_trips_through_strings() {
        for p in [Platform::Twitter, Platform::Facebook, Platform::Instagram] {
            assert_eq!(p.to_string().parse::<Platform>().unwrap(), p);
        }
        assert!("myspace".parse::<Platform>().is_err());
    }
}
