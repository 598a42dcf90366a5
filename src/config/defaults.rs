// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Thumbnail Size**: Default edge length of unconstrained thumbnails
//! - **Resource Cache**: In-memory cache of decoded bitmaps
//! - **Disk Source Cache**: On-disk cache of full-size decodes

// ==========================================================================
// Thumbnail Size Defaults
// ==========================================================================

/// Default thumbnail edge length in pixels when the caller requests none.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 256;

/// Minimum allowed default thumbnail size.
pub const MIN_THUMBNAIL_SIZE: u32 = 16;

/// Maximum allowed default thumbnail size.
pub const MAX_THUMBNAIL_SIZE: u32 = 4096;

// ==========================================================================
// Resource Cache Defaults
// ==========================================================================

/// Default memory budget of the resource cache (64 MB).
pub const DEFAULT_CACHE_MAX_BYTES: usize = 64 * 1024 * 1024;

/// Minimum memory budget of the resource cache (1 MB).
pub const MIN_CACHE_MAX_BYTES: usize = 1024 * 1024;

/// Maximum memory budget of the resource cache (1 GB).
pub const MAX_CACHE_MAX_BYTES: usize = 1024 * 1024 * 1024;

/// Default number of bitmaps kept in the resource cache.
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 256;

/// Minimum number of cached bitmaps.
pub const MIN_CACHE_MAX_ENTRIES: usize = 1;

/// Maximum number of cached bitmaps.
pub const MAX_CACHE_MAX_ENTRIES: usize = 16_384;

// ==========================================================================
// Disk Source Cache Defaults
// ==========================================================================

/// Default size budget of the disk source cache (512 MB).
pub const DEFAULT_DISK_CACHE_MAX_BYTES: u64 = 512 * 1024 * 1024;

/// Minimum size budget of the disk source cache (4 MB).
pub const MIN_DISK_CACHE_MAX_BYTES: u64 = 4 * 1024 * 1024;

/// Maximum size budget of the disk source cache (64 GB).
pub const MAX_DISK_CACHE_MAX_BYTES: u64 = 64 * 1024 * 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_size_defaults_are_valid() {
        assert!(MIN_THUMBNAIL_SIZE <= DEFAULT_THUMBNAIL_SIZE);
        assert!(DEFAULT_THUMBNAIL_SIZE <= MAX_THUMBNAIL_SIZE);
    }

    #[test]
    fn cache_defaults_are_valid() {
        assert!(MIN_CACHE_MAX_BYTES <= DEFAULT_CACHE_MAX_BYTES);
        assert!(DEFAULT_CACHE_MAX_BYTES <= MAX_CACHE_MAX_BYTES);
        assert!(MIN_CACHE_MAX_ENTRIES <= DEFAULT_CACHE_MAX_ENTRIES);
        assert!(DEFAULT_CACHE_MAX_ENTRIES <= MAX_CACHE_MAX_ENTRIES);
    }

    #[test]
    fn disk_cache_defaults_are_valid() {
        assert!(MIN_DISK_CACHE_MAX_BYTES <= DEFAULT_DISK_CACHE_MAX_BYTES);
        assert!(DEFAULT_DISK_CACHE_MAX_BYTES <= MAX_DISK_CACHE_MAX_BYTES);
    }
}
