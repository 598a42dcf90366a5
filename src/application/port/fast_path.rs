// SPDX-License-Identifier: MPL-2.0
//! Fast-path port definitions.
//!
//! The fast path asks the platform media index for a thumbnail it already
//! has. Which primitive the platform offers is a capability tier detected
//! once; each tier is one [`FastPathProvider`] implementation.
//!
//! # Tiers
//!
//! - Sized: a direct "load thumbnail at size" primitive ([`ThumbnailLoader`])
//! - Legacy: a low-resolution store keyed by numeric row id ([`LegacyThumbnailSource`])

use crate::domain::media::{ContentRef, MediaKind, RawImage};
use crate::domain::thumbnail::ThumbnailRequest;
use crate::error::Result;
use crate::media::orientation::PathVariant;

// =============================================================================
// FastPathProvider Trait
// =============================================================================

/// Strategy serving the fast path for one platform capability tier.
///
/// Providers return bitmaps exactly as the platform produced them; the
/// resolver decides whether orientation correction is still needed, based
/// on [`FastPathProvider::variant`].
pub trait FastPathProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Path variant used to look up the rotation table.
    fn variant(&self) -> PathVariant;

    /// Fetches a platform thumbnail for the request.
    ///
    /// `Ok(None)` means the platform has no thumbnail for this item.
    ///
    /// # Errors
    ///
    /// Returns an error when the platform lookup or decode fails.
    fn fetch(&self, request: &ThumbnailRequest) -> Result<Option<RawImage>>;
}

// =============================================================================
// Platform primitives
// =============================================================================

/// Platform primitive returning a thumbnail at (about) a given size.
pub trait ThumbnailLoader: Send + Sync {
    /// Loads a thumbnail of a `kind` item fitting within `width` x `height`.
    ///
    /// # Errors
    ///
    /// Returns an error when the item cannot be read or decoded.
    fn load_thumbnail(
        &self,
        source: &ContentRef,
        kind: MediaKind,
        width: u32,
        height: u32,
    ) -> Result<Option<RawImage>>;
}

/// Kind of entry in the legacy thumbnail store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyKind {
    Image,
    Video,
}

impl LegacyKind {
    /// Directory name used by on-disk stores.
    #[must_use]
    pub fn directory_name(self) -> &'static str {
        match self {
            LegacyKind::Image => "images",
            LegacyKind::Video => "videos",
        }
    }
}

/// Legacy low-resolution thumbnail store, addressed by numeric row id.
pub trait LegacyThumbnailSource: Send + Sync {
    /// Loads the mini thumbnail stored for `id`.
    ///
    /// # Errors
    ///
    /// Returns an error when a stored thumbnail exists but cannot be read.
    fn load_thumbnail(&self, id: u64, kind: LegacyKind) -> Result<Option<RawImage>>;
}
