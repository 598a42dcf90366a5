// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the resolver remains
//! independent of concrete platforms and decoders.
//!
//! # Available Ports
//!
//! - [`fast_path`]: Platform-native thumbnails (sized or legacy tier)
//! - [`decode`]: The caching decode pipeline and the source reader it uses
//! - [`video`]: Representative frame extraction
//!
//! # Design Notes
//!
//! - All traits are `Send + Sync`: one resolver serves concurrent requests
//! - Methods return `Result` with crate error types
//! - No `async fn` - callers offload blocking work themselves

pub mod decode;
pub mod fast_path;
pub mod video;

// Re-export main types for convenience
pub use decode::{
    DecodeFormat, DecodeHandle, DecodePipeline, DecodeRequest, DecodeSource, DiskCachePolicy,
    SourceReader, VideoFrameSource,
};
pub use fast_path::{FastPathProvider, LegacyKind, LegacyThumbnailSource, ThumbnailLoader};
pub use video::FrameExtractor;
