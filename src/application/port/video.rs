// SPDX-License-Identifier: MPL-2.0
//! Video frame extraction port definition.
//!
//! # Design Notes
//!
//! - Extraction is one-shot: open, decode one representative frame, close
//! - Frames are returned as stored in the stream; display rotation is not applied
//! - Uses domain types only (`RawImage`, `VideoError`)

use crate::domain::media::RawImage;
use crate::error::VideoError;
use std::path::Path;

/// Port for extracting a representative frame from a video file.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; each call opens its own decoder.
pub trait FrameExtractor: Send + Sync {
    /// Decodes a representative frame of the video at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`VideoError`] if:
    /// - The file cannot be read
    /// - No video stream is found
    /// - No frame could be decoded
    fn extract_frame(&self, path: &Path) -> Result<RawImage, VideoError>;
}
