// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like `FFmpeg`,
//! EXIF parsing, and system I/O.
//!
//! # Available Adapters
//!
//! - [`fast_path`]: Platform tiers (implement [`FastPathProvider`])
//! - [`decode`]: Caching decode pipeline (implements [`DecodePipeline`])
//! - [`ffmpeg`]: Video frame extraction via `FFmpeg` (implements [`FrameExtractor`])
//!
//! [`FastPathProvider`]: crate::application::port::FastPathProvider
//! [`DecodePipeline`]: crate::application::port::DecodePipeline
//! [`FrameExtractor`]: crate::application::port::FrameExtractor

pub mod decode;
pub mod fast_path;
pub mod ffmpeg;

// Re-export main types for convenience
pub use decode::{CachingDecodePipeline, DiskSourceCache, FsSourceReader, ResourceCacheConfig};
pub use fast_path::PlatformTier;
pub use ffmpeg::FfmpegFrameExtractor;

use crate::application::port::SourceReader;
use crate::application::resolver::ThumbnailResolver;
use crate::config::Config;
use crate::error::Result;
use crate::media::orientation::{PathVariant, RotationTable};
use log::info;
use std::sync::Arc;

/// Wires a resolver from the bundled adapters.
///
/// The platform tier is detected once, here.
///
/// # Errors
///
/// Returns an error if the disk cache directory cannot be created.
pub fn build_resolver(config: &Config) -> Result<ThumbnailResolver> {
    let reader: Arc<dyn SourceReader> = Arc::new(FsSourceReader::new());
    let tier = PlatformTier::detect(config);
    info!("Platform tier: {tier}");

    let mut pipeline = CachingDecodePipeline::new(
        Arc::clone(&reader),
        Arc::new(FfmpegFrameExtractor::new()),
        ResourceCacheConfig::new(config.cache_max_bytes, config.cache_max_entries),
    );
    if let Some(dir) = &config.disk_cache_dir {
        pipeline = pipeline.with_disk_cache(DiskSourceCache::open(
            dir.clone(),
            config.disk_cache_max_bytes(),
        )?);
    }

    let mut rotation = RotationTable::default();
    if config.legacy_store_pre_rotated {
        rotation = rotation.self_correcting(PathVariant::LegacyStore);
    }

    Ok(ThumbnailResolver::new(
        fast_path::select(tier, config, reader),
        Arc::new(pipeline),
        rotation,
    ))
}
