//! Client boundary for the hosted enhancement service.
//!
//! The service is opaque: it takes a photo as a base64 data URI and returns
//! an enhanced photo in the same encoding. Everything that can go wrong on
//! the wire (connect failure, non-2xx status, malformed response body,
//! invalid returned data URI) collapses into [`Error::Enhancement`] so the
//! caller has a single "enhancement failed" condition to surface.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::codec::EncodedImage;
use crate::error::{Error, Result};

/// Default wire timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct EnhanceRequest<'a> {
    #[serde(rename = "photoDataUri")]
    photo_data_uri: &'a str,
}

#[derive(Deserialize)]
struct EnhanceResponse {
    #[serde(rename = "enhancedPhotoDataUri")]
    enhanced_photo_data_uri: String,
}

/// Client for a single enhancement endpoint.
///
/// Holds an in-flight guard: only one request may be pending at a time,
/// mirroring a UI that disables its trigger while the spinner runs. A
/// second call during a pending one fails fast with
/// [`Error::EnhancementPending`] without touching the wire.
pub struct EnhanceClient {
    endpoint: String,
    http: reqwest::blocking::Client,
    in_flight: AtomicBool,
}

impl EnhanceClient {
    /// Build a client for `endpoint` with the given wire timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Enhancement`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Enhancement(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint: endpoint.into(),
            http,
            in_flight: AtomicBool::new(false),
        })
    }

    /// Whether a request is currently pending.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Send `source` to the service and return the enhanced replacement.
    ///
    /// One request/response, no retries; the caller decides whether and
    /// when to try again. On failure the caller should leave its current
    /// enhanced image untouched so a prior success stays usable.
    ///
    /// # Errors
    ///
    /// [`Error::EnhancementPending`] if a request is already in flight,
    /// otherwise [`Error::Enhancement`] for any wire or response-shape
    /// failure.
    pub fn enhance(&self, source: &EncodedImage) -> Result<EncodedImage> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::EnhancementPending);
        }
        let _guard = InFlightGuard(&self.in_flight);

        log::info!("enhancing {} byte {} image", source.bytes().len(), source.mime());

        let uri = source.to_data_uri();
        let request = EnhanceRequest {
            photo_data_uri: &uri,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(|e| Error::Enhancement(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Enhancement(format!("service returned {status}")));
        }

        let body: EnhanceResponse = response
            .json()
            .map_err(|e| Error::Enhancement(format!("malformed response: {e}")))?;

        let enhanced = EncodedImage::from_data_uri(&body.enhanced_photo_data_uri)
            .map_err(|e| Error::Enhancement(format!("invalid enhanced image: {e}")))?;

        log::info!("received {} byte enhanced image", enhanced.bytes().len());
        Ok(enhanced)
    }
}

/// Clears the in-flight flag on every exit path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_service_shape() {
        let request = EnhanceRequest {
            photo_data_uri: "data:image/png;base64,AAAA",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["photoDataUri"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn response_parses_from_service_shape() {
        let body = r#"{"enhancedPhotoDataUri":"data:image/png;base64,AAAA"}"#;
        let parsed: EnhanceResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.enhanced_photo_data_uri, "data:image/png;base64,AAAA");
    }

    #[test]
    fn unexpected_response_shape_is_an_error() {
        let body = r#"{"somethingElse":"nope"}"#;
        assert!(serde_json::from_str::<EnhanceResponse>(body).is_err());
    }

    #[test]
    fn in_flight_flag_blocks_reentry() {
        let client =
            EnhanceClient::new("http://localhost:0/enhance", Duration::from_secs(1)).unwrap();
        assert!(!client.is_in_flight());

        client.in_flight.store(true, Ordering::SeqCst);
        let img = EncodedImage::new("image/png", vec![0]).unwrap();
        assert!(matches!(
            client.enhance(&img),
            Err(Error::EnhancementPending)
        ));
        assert!(client.is_in_flight(), "guard must not clear a foreign flag");
    }

    #[test]
    fn guard_clears_flag_after_wire_failure() {
        // Port 1 is not connectable; the call fails on the wire but the
        // in-flight flag must be released for the next attempt.
        let client =
            EnhanceClient::new("http://127.0.0.1:1/enhance", Duration::from_secs(1)).unwrap();
        let img = EncodedImage::new("image/png", vec![0]).unwrap();
        assert!(matches!(client.enhance(&img), Err(Error::Enhancement(_))));
        assert!(!client.is_in_flight());
    }
}
