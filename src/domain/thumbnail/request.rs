// SPDX-License-Identifier: MPL-2.0
//! Thumbnail request value objects.

use crate::domain::media::{mime, ContentRef, MediaKind, MimeClass};

// =============================================================================
// RotationAngle
// =============================================================================

/// Rotation angle in 90° increments.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always one of: 0°, 90°, 180°, or 270°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationAngle(u16);

impl RotationAngle {
    /// No rotation (0°).
    pub const ZERO: Self = Self(0);

    /// Creates a new rotation angle, normalizing to valid 90° increments.
    ///
    /// Negative values wrap around (-90° is 270°), then the value is rounded
    /// down to the nearest 90° increment.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // rem_euclid keeps it in 0..360
    pub fn new(degrees: i32) -> Self {
        let wrapped = degrees.rem_euclid(360) as u16;
        Self((wrapped / 90) * 90)
    }

    /// Returns the angle in degrees.
    #[must_use]
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Returns true if the angle is not zero.
    #[must_use]
    pub fn is_rotated(self) -> bool {
        self.0 != 0
    }
}

// =============================================================================
// ThumbnailRequest
// =============================================================================

/// One thumbnail fetch, immutable once built.
///
/// Requested dimensions that are absent or non-positive are replaced by the
/// default size at construction, so `width()`/`height()` are always the
/// resolved target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailRequest {
    source: ContentRef,
    mime_type: String,
    kind: MediaKind,
    modified_at_secs: i64,
    rotation: RotationAngle,
    is_flipped: bool,
    width: u32,
    height: u32,
    default_size: u32,
}

impl ThumbnailRequest {
    /// Creates a request at the default size with no orientation metadata.
    #[must_use]
    pub fn new(source: impl Into<ContentRef>, mime_type: impl Into<String>, default_size: u32) -> Self {
        let mime_type = mime_type.into();
        let default_size = default_size.max(1);
        Self {
            source: source.into(),
            kind: mime::media_kind(&mime_type),
            mime_type,
            modified_at_secs: 0,
            rotation: RotationAngle::ZERO,
            is_flipped: false,
            width: default_size,
            height: default_size,
            default_size,
        }
    }

    #[must_use]
    pub fn with_modified_at(mut self, secs: i64) -> Self {
        self.modified_at_secs = secs;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: RotationAngle) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_flip(mut self, is_flipped: bool) -> Self {
        self.is_flipped = is_flipped;
        self
    }

    /// Sets the requested dimensions. `None` or non-positive values fall back
    /// to the default size.
    #[must_use]
    pub fn with_requested_size(mut self, width: Option<i64>, height: Option<i64>) -> Self {
        self.width = resolve_dimension(width, self.default_size);
        self.height = resolve_dimension(height, self.default_size);
        self
    }

    #[must_use]
    pub fn source(&self) -> &ContentRef {
        &self.source
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    #[must_use]
    pub fn mime_class(&self) -> MimeClass {
        MimeClass::of(&self.mime_type)
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    #[must_use]
    pub fn modified_at_secs(&self) -> i64 {
        self.modified_at_secs
    }

    #[must_use]
    pub fn rotation(&self) -> RotationAngle {
        self.rotation
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn default_size(&self) -> u32 {
        self.default_size
    }

    /// Both dimensions at the default size and no flip to apply.
    ///
    /// Only unconstrained requests may be served by the fast path: native
    /// thumbnails come at fixed sizes and ignore flips.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.width == self.default_size && self.height == self.default_size && !self.is_flipped
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn resolve_dimension(requested: Option<i64>, default_size: u32) -> u32 {
    match requested {
        Some(value) if value > 0 => value.min(i64::from(u32::MAX)) as u32,
        _ => default_size,
    }
}
