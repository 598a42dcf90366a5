// SPDX-License-Identifier: MPL-2.0
//! MIME type classification.
//!
//! Maps MIME strings to the small set of classes that matter for thumbnail
//! decisions: whether the item is a video, whether its encoded form may carry
//! transparency, and which row of the rotation table applies.

use super::types::MediaKind;

pub const BMP: &str = "image/bmp";
pub const GIF: &str = "image/gif";
pub const HEIC: &str = "image/heic";
pub const HEIF: &str = "image/heif";
pub const ICO: &str = "image/x-icon";
pub const JPEG: &str = "image/jpeg";
pub const PNG: &str = "image/png";
pub const SVG: &str = "image/svg+xml";
pub const TIFF: &str = "image/tiff";
pub const WEBP: &str = "image/webp";
pub const DNG: &str = "image/x-adobe-dng";

/// MIME types whose encoded thumbnails keep an alpha channel.
pub const ALPHA_CAPABLE: &[&str] = &[BMP, GIF, ICO, PNG, SVG, TIFF, WEBP];

/// Coarse MIME classes used as rows of the rotation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeClass {
    Jpeg,
    Png,
    Webp,
    Heif,
    Dng,
    Tiff,
    Gif,
    Bmp,
    Ico,
    Svg,
    Video,
    Other,
}

impl MimeClass {
    /// Classifies a MIME string. Matching ignores ASCII case and parameters.
    #[must_use]
    pub fn of(mime_type: &str) -> Self {
        let essence = essence(mime_type);
        if is_video(&essence) {
            return MimeClass::Video;
        }
        match essence.as_str() {
            JPEG | "image/jpg" => MimeClass::Jpeg,
            PNG => MimeClass::Png,
            WEBP => MimeClass::Webp,
            HEIC | HEIF => MimeClass::Heif,
            DNG | "image/dng" => MimeClass::Dng,
            TIFF => MimeClass::Tiff,
            GIF => MimeClass::Gif,
            BMP | "image/x-ms-bmp" => MimeClass::Bmp,
            ICO | "image/vnd.microsoft.icon" => MimeClass::Ico,
            SVG => MimeClass::Svg,
            _ => MimeClass::Other,
        }
    }
}

/// Lowercased MIME type without parameters (`image/png; q=1` → `image/png`).
fn essence(mime_type: &str) -> String {
    mime_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Returns `true` for any `video/*` type.
#[must_use]
pub fn is_video(mime_type: &str) -> bool {
    essence(mime_type).starts_with("video")
}

/// Returns whether thumbnails of this type must be encoded with alpha.
#[must_use]
pub fn can_have_alpha(mime_type: &str) -> bool {
    ALPHA_CAPABLE.contains(&essence(mime_type).as_str())
}

/// Derives the media kind of a MIME type.
#[must_use]
pub fn media_kind(mime_type: &str) -> MediaKind {
    let essence = essence(mime_type);
    if essence.starts_with("video") {
        MediaKind::Video
    } else if essence.starts_with("image") {
        MediaKind::Image
    } else {
        MediaKind::Other
    }
}
