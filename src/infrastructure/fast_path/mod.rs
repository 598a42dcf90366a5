// SPDX-License-Identifier: MPL-2.0
//! Fast-path providers, one per platform capability tier.

pub mod legacy;
pub mod sized;

pub use legacy::{DirectoryThumbnailStore, LegacyThumbnailProvider};
pub use sized::{ExifThumbnailLoader, SizedThumbnailProvider};

use crate::application::port::{FastPathProvider, SourceReader};
use crate::config::Config;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Fast-path capability of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformTier {
    /// A "thumbnail at size" primitive is available.
    Sized,
    /// Only the legacy low-resolution store is available.
    Legacy,
    /// No fast path at all.
    None,
}

impl PlatformTier {
    /// Detects the tier once, honoring an explicit override in `config`.
    ///
    /// Without an override a configured legacy store selects the legacy
    /// tier, otherwise the sized tier backed by embedded EXIF thumbnails.
    #[must_use]
    pub fn detect(config: &Config) -> Self {
        config.platform_tier.unwrap_or_else(|| {
            if config.legacy_store_dir.is_some() {
                PlatformTier::Legacy
            } else {
                PlatformTier::Sized
            }
        })
    }
}

impl fmt::Display for PlatformTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformTier::Sized => write!(f, "sized"),
            PlatformTier::Legacy => write!(f, "legacy"),
            PlatformTier::None => write!(f, "none"),
        }
    }
}

/// Builds the fast-path provider for `tier`.
///
/// Returns `None` for [`PlatformTier::None`] and for the legacy tier when no
/// store directory is configured.
#[must_use]
pub fn select(
    tier: PlatformTier,
    config: &Config,
    reader: Arc<dyn SourceReader>,
) -> Option<Box<dyn FastPathProvider>> {
    let provider: Box<dyn FastPathProvider> = match tier {
        PlatformTier::Sized => Box::new(SizedThumbnailProvider::new(ExifThumbnailLoader::new(
            reader,
        ))),
        PlatformTier::Legacy => {
            let Some(dir) = &config.legacy_store_dir else {
                warn!("Legacy platform tier selected without legacy_store_dir, fast path disabled");
                return None;
            };
            Box::new(LegacyThumbnailProvider::new(DirectoryThumbnailStore::new(
                dir.clone(),
            )))
        }
        PlatformTier::None => return None,
    };
    info!("Fast path provider: {}", provider.name());
    Some(provider)
}
