// SPDX-License-Identifier: MPL-2.0
//! Caching decode pipeline serving the general path.
//!
//! # Pipeline
//!
//! 1. Look the [`CacheKey`] up in the in-memory resource cache
//! 2. Otherwise obtain the full-size source: a video frame through the
//!    [`FrameExtractor`], or image bytes through the [`SourceReader`]
//!    (consulting the disk source cache when the policy allows it)
//! 3. Scale down to cover the target size and convert the pixel format
//! 4. Store the result in the resource cache and share it
//!
//! Decodes run synchronously inside [`DecodePipeline::wait`]; `submit` only
//! registers the request.

pub mod cache;
pub mod disk;
pub mod source;

pub use cache::{CacheStats, ResourceCache, ResourceCacheConfig};
pub use disk::DiskSourceCache;
pub use source::FsSourceReader;

use crate::application::port::{
    DecodeHandle, DecodePipeline, DecodeRequest, DecodeSource, FrameExtractor, SourceReader,
};
use crate::domain::media::RawImage;
use crate::error::{Error, Result};
use crate::media::image::{convert_format, decode_bytes, downsample_to_cover, from_dynamic, to_dynamic};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Decode pipeline with a memory resource cache and an optional disk
/// source cache.
pub struct CachingDecodePipeline {
    reader: Arc<dyn SourceReader>,
    frames: Arc<dyn FrameExtractor>,
    resources: Mutex<ResourceCache>,
    disk: Option<DiskSourceCache>,
    pending: Mutex<HashMap<u64, DecodeRequest>>,
    next_id: AtomicU64,
}

impl CachingDecodePipeline {
    #[must_use]
    pub fn new(
        reader: Arc<dyn SourceReader>,
        frames: Arc<dyn FrameExtractor>,
        cache_config: ResourceCacheConfig,
    ) -> Self {
        Self {
            reader,
            frames,
            resources: Mutex::new(ResourceCache::new(cache_config)),
            disk: None,
            pending: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Enables the disk source cache.
    #[must_use]
    pub fn with_disk_cache(mut self, disk: DiskSourceCache) -> Self {
        self.disk = Some(disk);
        self
    }

    /// Number of submitted handles not yet released.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        lock(&self.pending).len()
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        lock(&self.resources).stats()
    }

    fn load_source(&self, request: &DecodeRequest) -> Result<RawImage> {
        match &request.source {
            DecodeSource::VideoFrame(video) => {
                let path = self.reader.local_path(&video.reference)?;
                Ok(self.frames.extract_frame(&path)?)
            }
            DecodeSource::Reference(reference) => {
                let disk = self
                    .disk
                    .as_ref()
                    .filter(|_| request.disk_cache.caches_source());
                if let Some(image) = disk.and_then(|disk| disk.get(&request.key)) {
                    debug!("Disk source cache hit for {reference}");
                    return Ok(image);
                }

                let bytes = self.reader.read(reference)?;
                let image = decode_bytes(&bytes)?;
                if let Some(disk) = disk {
                    if let Err(e) = disk.put(&request.key, &image) {
                        warn!("Failed to store {reference} in disk source cache: {e}");
                    }
                }
                Ok(image)
            }
        }
    }

    fn decode(&self, request: &DecodeRequest) -> Result<RawImage> {
        let source = self.load_source(request)?;
        let scaled = downsample_to_cover(&to_dynamic(&source)?, request.width, request.height);
        Ok(convert_format(
            from_dynamic(&scaled),
            request.format.pixel_format(),
        ))
    }
}

impl DecodePipeline for CachingDecodePipeline {
    fn submit(&self, request: DecodeRequest) -> DecodeHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        lock(&self.pending).insert(id, request);
        DecodeHandle::new(id)
    }

    fn wait(&self, handle: &DecodeHandle) -> Result<Arc<RawImage>> {
        let request = lock(&self.pending)
            .get(&handle.id())
            .cloned()
            .ok_or_else(|| Error::Decode(format!("Unknown decode handle {}", handle.id())))?;

        if let Some(hit) = lock(&self.resources).get(&request.key) {
            return Ok(hit);
        }

        let image = Arc::new(self.decode(&request)?);
        let mut resources = lock(&self.resources);
        resources.insert(request.key.clone(), Arc::clone(&image));
        let stats = resources.stats();
        debug!(
            "Decoded {}, resource cache holds {} bitmaps ({} bytes)",
            request.key.source, stats.entry_count, stats.total_bytes
        );
        Ok(image)
    }

    fn release(&self, handle: DecodeHandle) {
        lock(&self.pending).remove(&handle.id());
    }
}

impl std::fmt::Debug for CachingDecodePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingDecodePipeline")
            .field("cache", &self.cache_stats())
            .field("disk", &self.disk)
            .field("pending", &self.pending_count())
            .finish_non_exhaustive()
    }
}

/// Locks a mutex, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
