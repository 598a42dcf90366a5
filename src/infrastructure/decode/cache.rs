// SPDX-License-Identifier: MPL-2.0
//! In-memory resource cache of the decode pipeline.
//!
//! # Design
//!
//! - **LRU eviction**: Least recently used bitmaps are evicted first
//! - **Memory-bounded**: Total cache size limited by configurable byte limit
//! - **Signature-keyed**: Bitmaps indexed by reference plus cache signature
//! - **Shared results**: Entries are handed out as `Arc`, never copied

use crate::config::defaults::{
    DEFAULT_CACHE_MAX_BYTES, DEFAULT_CACHE_MAX_ENTRIES, MAX_CACHE_MAX_BYTES,
    MAX_CACHE_MAX_ENTRIES, MIN_CACHE_MAX_BYTES, MIN_CACHE_MAX_ENTRIES,
};
use crate::domain::media::RawImage;
use crate::domain::thumbnail::CacheKey;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Configuration for the resource cache.
#[derive(Debug, Clone, Copy)]
pub struct ResourceCacheConfig {
    /// Maximum cache size in bytes.
    pub max_bytes: usize,

    /// Maximum number of bitmaps to cache.
    pub max_entries: usize,
}

impl Default for ResourceCacheConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_CACHE_MAX_BYTES,
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

impl ResourceCacheConfig {
    /// Creates a new cache configuration with clamped limits.
    #[must_use]
    pub fn new(max_bytes: usize, max_entries: usize) -> Self {
        Self {
            max_bytes: max_bytes.clamp(MIN_CACHE_MAX_BYTES, MAX_CACHE_MAX_BYTES),
            max_entries: max_entries.clamp(MIN_CACHE_MAX_ENTRIES, MAX_CACHE_MAX_ENTRIES),
        }
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheStats {
    /// Number of bitmaps currently in cache.
    pub entry_count: usize,

    /// Total bytes currently used by cached bitmaps.
    pub total_bytes: usize,

    /// Number of cache hits.
    pub hits: u64,

    /// Number of cache misses.
    pub misses: u64,

    /// Number of bitmaps evicted due to limits.
    pub evictions: u64,

    /// Number of bitmaps inserted.
    pub insertions: u64,
}

/// LRU cache of decoded, scaled bitmaps.
pub struct ResourceCache {
    cache: LruCache<CacheKey, Arc<RawImage>>,
    config: ResourceCacheConfig,
    current_bytes: usize,
    stats: CacheStats,
}

impl ResourceCache {
    /// Creates a new cache with the given configuration.
    #[must_use]
    pub fn new(config: ResourceCacheConfig) -> Self {
        let capacity = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: LruCache::new(capacity),
            config,
            current_bytes: 0,
            stats: CacheStats::default(),
        }
    }

    /// Inserts a bitmap.
    ///
    /// Returns `false` when the bitmap is too large to be cached.
    pub fn insert(&mut self, key: CacheKey, image: Arc<RawImage>) -> bool {
        let image_size = image.byte_size();

        // Don't cache bitmaps larger than half the cache size
        if image_size > self.config.max_bytes / 2 {
            return false;
        }

        if let Some(existing) = self.cache.pop(&key) {
            self.current_bytes = self.current_bytes.saturating_sub(existing.byte_size());
        }

        while self.current_bytes + image_size > self.config.max_bytes && !self.cache.is_empty() {
            if let Some((_, evicted)) = self.cache.pop_lru() {
                self.current_bytes = self.current_bytes.saturating_sub(evicted.byte_size());
                self.stats.evictions += 1;
            }
        }

        // Entry-count eviction done by `push` still has to be accounted for
        if let Some((_, evicted)) = self.cache.push(key, image) {
            self.current_bytes = self.current_bytes.saturating_sub(evicted.byte_size());
            self.stats.evictions += 1;
        }
        self.current_bytes += image_size;
        self.stats.insertions += 1;
        self.stats.entry_count = self.cache.len();
        self.stats.total_bytes = self.current_bytes;

        true
    }

    /// Gets a bitmap, updating LRU order on access.
    pub fn get(&mut self, key: &CacheKey) -> Option<Arc<RawImage>> {
        if let Some(image) = self.cache.get(key) {
            self.stats.hits += 1;
            Some(Arc::clone(image))
        } else {
            self.stats.misses += 1;
            None
        }
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl std::fmt::Debug for ResourceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceCache")
            .field("entry_count", &self.cache.len())
            .field("memory_usage", &self.current_bytes)
            .field("max_bytes", &self.config.max_bytes)
            .field("max_entries", &self.config.max_entries)
            .field("stats", &self.stats)
            .finish()
    }
}
