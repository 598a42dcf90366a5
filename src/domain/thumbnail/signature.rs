// SPDX-License-Identifier: MPL-2.0
//! Cache-busting signatures for the decode pipeline.

use super::request::ThumbnailRequest;
use crate::domain::media::ContentRef;
use std::fmt;

/// Signature mixed into the decode cache key.
///
/// It covers every input that changes the decoded output for a stable
/// reference: modification time, rotation, flip and target width. The target
/// height is not part of it, so two requests differing only in height share
/// a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheSignature(String);

impl CacheSignature {
    #[must_use]
    pub fn for_request(request: &ThumbnailRequest) -> Self {
        Self(format!(
            "{}-{}-{}-{}",
            request.modified_at_secs(),
            request.rotation().degrees(),
            request.is_flipped(),
            request.width()
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Full cache key: the reference plus its signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub source: ContentRef,
    pub signature: CacheSignature,
}

impl CacheKey {
    #[must_use]
    pub fn new(source: ContentRef, signature: CacheSignature) -> Self {
        Self { source, signature }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::thumbnail::RotationAngle;

    fn base() -> ThumbnailRequest {
        ThumbnailRequest::new("content://media/external/images/media/9", "image/jpeg", 256)
            .with_modified_at(1_700_000_000)
            .with_rotation(RotationAngle::new(90))
    }

    #[test]
    fn signature_lists_the_four_inputs() {
        let signature = CacheSignature::for_request(&base());
        assert_eq!(signature.as_str(), "1700000000-90-false-256");
    }

    #[test]
    fn height_does_not_change_signature() {
        let a = base().with_requested_size(Some(300), Some(100));
        let b = base().with_requested_size(Some(300), Some(900));
        assert_eq!(CacheSignature::for_request(&a), CacheSignature::for_request(&b));
    }

    #[test]
    fn visual_inputs_change_signature() {
        let reference = CacheSignature::for_request(&base());
        let variants = [
            base().with_modified_at(1),
            base().with_rotation(RotationAngle::new(180)),
            base().with_flip(true),
            base().with_requested_size(Some(128), None),
        ];
        for variant in variants {
            assert_ne!(CacheSignature::for_request(&variant), reference);
        }
    }
}
