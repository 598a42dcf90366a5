// SPDX-License-Identifier: MPL-2.0
//! General-path port definition.
//!
//! This module defines the [`DecodePipeline`] trait: a caching decoder able
//! to read arbitrary sources (including frames synthesized from videos) at
//! any target size.
//!
//! # Lifecycle
//!
//! 1. `submit()` registers a decode and returns a [`DecodeHandle`]
//! 2. `wait()` blocks until the bitmap is available or decoding failed
//! 3. `release()` frees whatever the pipeline holds for that handle
//!
//! Callers must release every handle they obtained, whatever `wait()` returned.

use crate::domain::media::{ContentRef, PixelFormat, RawImage};
use crate::domain::thumbnail::CacheKey;
use crate::error::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Preferred pixel format of decoded bitmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFormat {
    /// Reduced color depth, no alpha channel.
    PreferRgb565,
    /// Full depth with alpha.
    PreferArgb8888,
}

impl DecodeFormat {
    #[must_use]
    pub fn pixel_format(self) -> PixelFormat {
        match self {
            DecodeFormat::PreferRgb565 => PixelFormat::Rgb565,
            DecodeFormat::PreferArgb8888 => PixelFormat::Rgba8888,
        }
    }
}

/// What the pipeline may persist on disk for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiskCachePolicy {
    /// Decoded source data and the final resource may both be cached.
    Automatic,
    /// Only the final resource is cached; decoded source data never is.
    ResourceOnly,
}

impl DiskCachePolicy {
    #[must_use]
    pub fn caches_source(self) -> bool {
        matches!(self, DiskCachePolicy::Automatic)
    }
}

/// Synthetic decodable source producing a representative frame of a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrameSource {
    pub reference: ContentRef,
}

/// What the pipeline decodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeSource {
    /// Encoded image bytes behind the reference.
    Reference(ContentRef),
    /// A frame extracted from the video behind the reference.
    VideoFrame(VideoFrameSource),
}

/// A single decode submitted to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeRequest {
    pub source: DecodeSource,
    pub key: CacheKey,
    pub format: DecodeFormat,
    pub disk_cache: DiskCachePolicy,
    pub width: u32,
    pub height: u32,
}

/// Pending decode registered with a pipeline.
///
/// Deliberately not `Clone`: a handle is released exactly once.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct DecodeHandle(u64);

impl DecodeHandle {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.0
    }
}

// =============================================================================
// DecodePipeline Trait
// =============================================================================

/// Port for the general-path decode-and-cache pipeline.
///
/// Returned bitmaps may be shared with the pipeline's cache, hence `Arc`.
pub trait DecodePipeline: Send + Sync {
    /// Registers a decode and returns its handle.
    fn submit(&self, request: DecodeRequest) -> DecodeHandle;

    /// Blocks until the decode for `handle` completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or decoded, or if the
    /// handle is unknown.
    fn wait(&self, handle: &DecodeHandle) -> Result<Arc<RawImage>>;

    /// Releases everything held for `handle`.
    fn release(&self, handle: DecodeHandle);
}

// =============================================================================
// SourceReader Trait
// =============================================================================

/// Reads the bytes behind content references.
pub trait SourceReader: Send + Sync {
    /// Reads the full encoded content of `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference cannot be resolved or read.
    fn read(&self, source: &ContentRef) -> Result<Vec<u8>>;

    /// Resolves `source` to a local file, for decoders that need a path.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference has no local file.
    fn local_path(&self, source: &ContentRef) -> Result<PathBuf>;
}
