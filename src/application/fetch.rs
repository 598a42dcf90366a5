// SPDX-License-Identifier: MPL-2.0
//! Request/response boundary of a thumbnail fetch.
//!
//! [`FetchRequest`] is the wire shape accepted from callers; [`fetch`]
//! resolves it and returns either the encoded bytes or a [`FetchError`].

use crate::application::resolver::ThumbnailResolver;
use crate::domain::thumbnail::{first_line, RotationAngle, ThumbnailFailure, ThumbnailRequest};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code reported for every failed fetch.
pub const FETCH_ERROR_CODE: &str = "getThumbnail-null";

/// Thumbnail request as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    pub source_reference: String,
    pub mime_type: String,
    #[serde(default)]
    pub modified_at_seconds: i64,
    #[serde(default)]
    pub rotation_degrees: i32,
    #[serde(default)]
    pub is_flipped: bool,
    #[serde(default)]
    pub requested_width: Option<i64>,
    #[serde(default)]
    pub requested_height: Option<i64>,
    pub default_size: u32,
}

impl FetchRequest {
    /// Normalizes the wire request into a resolver request.
    #[must_use]
    pub fn to_request(&self) -> ThumbnailRequest {
        ThumbnailRequest::new(
            self.source_reference.as_str(),
            self.mime_type.as_str(),
            self.default_size,
        )
        .with_modified_at(self.modified_at_seconds)
        .with_rotation(RotationAngle::new(self.rotation_degrees))
        .with_flip(self.is_flipped)
        .with_requested_size(self.requested_width, self.requested_height)
    }
}

/// Structured failure reported to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl From<ThumbnailFailure> for FetchError {
    fn from(failure: ThumbnailFailure) -> Self {
        Self {
            code: FETCH_ERROR_CODE.to_string(),
            message: failure.message(),
            details: failure.detail().map(str::to_string),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, ": {details}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FetchError {}

/// Resolves and encodes the thumbnail for `request`.
///
/// # Errors
///
/// Returns a [`FetchError`] with code [`FETCH_ERROR_CODE`] when no bitmap
/// could be produced or encoded.
pub fn fetch(resolver: &ThumbnailResolver, request: &FetchRequest) -> Result<Vec<u8>, FetchError> {
    let thumbnail_request = request.to_request();
    let resolved = resolver.resolve(&thumbnail_request)?;
    resolved
        .encode(thumbnail_request.mime_type())
        .map_err(|e| FetchError {
            code: FETCH_ERROR_CODE.to_string(),
            message: ThumbnailFailure::new(thumbnail_request.source().clone(), None).message(),
            details: first_line(&e.message()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{DecodeHandle, DecodePipeline, DecodeRequest};
    use crate::domain::media::RawImage;
    use crate::error::{Error, Result};
    use crate::media::orientation::RotationTable;
    use std::sync::Arc;

    struct StaticPipeline(std::result::Result<RawImage, String>);

    impl DecodePipeline for StaticPipeline {
        fn submit(&self, _request: DecodeRequest) -> DecodeHandle {
            DecodeHandle::new(1)
        }

        fn wait(&self, _handle: &DecodeHandle) -> Result<Arc<RawImage>> {
            self.0
                .clone()
                .map(Arc::new)
                .map_err(Error::Decode)
        }

        fn release(&self, _handle: DecodeHandle) {}
    }

    fn resolver(outcome: std::result::Result<RawImage, String>) -> ThumbnailResolver {
        ThumbnailResolver::new(None, Arc::new(StaticPipeline(outcome)), RotationTable::empty())
    }

    #[test]
    fn request_deserializes_from_camel_case() {
        let json = r#"{
            "sourceReference": "file:///a.jpg",
            "mimeType": "image/jpeg",
            "modifiedAtSeconds": 12,
            "rotationDegrees": 90,
            "isFlipped": true,
            "requestedWidth": 0,
            "defaultSize": 256
        }"#;
        let request: FetchRequest = serde_json::from_str(json).unwrap();
        let normalized = request.to_request();

        assert_eq!(normalized.width(), 256);
        assert_eq!(normalized.height(), 256);
        assert_eq!(normalized.rotation().degrees(), 90);
        assert!(normalized.is_flipped());
        assert_eq!(normalized.modified_at_secs(), 12);
    }

    #[test]
    fn success_returns_encoded_bytes() {
        let request = FetchRequest {
            source_reference: "file:///a.png".to_string(),
            mime_type: "image/png".to_string(),
            modified_at_seconds: 0,
            rotation_degrees: 0,
            is_flipped: false,
            requested_width: None,
            requested_height: None,
            default_size: 64,
        };
        let bytes = fetch(&resolver(Ok(RawImage::from_rgba(1, 1, vec![1, 2, 3, 4]))), &request)
            .unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn failure_is_structured() {
        let request = FetchRequest {
            source_reference: "file:///broken.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            modified_at_seconds: 0,
            rotation_degrees: 0,
            is_flipped: false,
            requested_width: Some(512),
            requested_height: Some(512),
            default_size: 256,
        };
        let error = fetch(&resolver(Err("bad header\nat byte 3".to_string())), &request).unwrap_err();

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["code"], "getThumbnail-null");
        assert_eq!(error.code, FETCH_ERROR_CODE);
        assert_eq!(error.message, "failed to get thumbnail for uri=file:///broken.jpg");
        assert_eq!(error.details.as_deref(), Some("bad header"));
    }
}
