// SPDX-License-Identifier: MPL-2.0
//! On-disk cache of decoded source images.
//!
//! Entries are full-resolution decodes stored as PNG, named after a BLAKE3
//! digest of the cache key. Keys carry the modification time, so an edited
//! item never hits a stale entry.
//!
//! The directory is kept under a byte budget. Hits refresh an entry's
//! modification time and eviction removes the least recently touched
//! entries first.

use crate::domain::media::RawImage;
use crate::domain::thumbnail::CacheKey;
use crate::error::{Error, Result};
use crate::media::image::{load_image, to_dynamic};
use image_rs::ImageFormat;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const ENTRY_EXTENSION: &str = "png";

#[derive(Debug, Clone)]
pub struct DiskSourceCache {
    dir: PathBuf,
    max_bytes: u64,
}

impl DiskSourceCache {
    /// Opens (and creates if needed) a cache rooted at `dir`, holding at
    /// most `max_bytes` of entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::error::Error::Io) if the directory
    /// cannot be created.
    pub fn open(dir: impl Into<PathBuf>, max_bytes: u64) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, max_bytes })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name of the entry for `key`.
    #[must_use]
    pub fn entry_path(&self, key: &CacheKey) -> PathBuf {
        let mut hasher = blake3::Hasher::new();
        hasher.update(key.source.as_str().as_bytes());
        hasher.update(b"\0");
        hasher.update(key.signature.as_str().as_bytes());
        let digest = hasher.finalize().to_hex();
        self.dir.join(format!("{digest}.{ENTRY_EXTENSION}"))
    }

    /// Returns the cached decode for `key`, if any.
    ///
    /// Unreadable entries are treated as misses and removed.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<RawImage> {
        let path = self.entry_path(key);
        if !path.is_file() {
            return None;
        }
        match load_image(&path) {
            Ok(image) => {
                touch(&path);
                Some(image)
            }
            Err(e) => {
                warn!("Dropping unreadable disk cache entry {}: {e}", path.display());
                let _ = fs::remove_file(&path);
                None
            }
        }
    }

    /// Stores the decode for `key`, then evicts old entries beyond the
    /// byte budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be encoded or written. No
    /// temporary file is left behind in that case.
    pub fn put(&self, key: &CacheKey, image: &RawImage) -> Result<()> {
        let path = self.entry_path(key);
        let tmp = path.with_extension("tmp");
        let written = to_dynamic(image)
            .and_then(|dynamic| {
                dynamic
                    .save_with_format(&tmp, ImageFormat::Png)
                    .map_err(Error::from)
            })
            .and_then(|()| fs::rename(&tmp, &path).map_err(Error::from));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        self.evict()
    }

    /// Removes the least recently used entries until the directory fits
    /// the byte budget.
    fn evict(&self) -> Result<()> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            let Ok(metadata) = fs::metadata(&path) else {
                continue;
            };
            if metadata.is_file() {
                let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
                entries.push((modified, metadata.len(), path));
            }
        }

        let mut total: u64 = entries.iter().map(|(_, len, _)| len).sum();
        if total <= self.max_bytes {
            return Ok(());
        }

        entries.sort_by_key(|(modified, _, _)| *modified);
        for (_, len, path) in entries {
            if total <= self.max_bytes {
                break;
            }
            match fs::remove_file(&path) {
                Ok(()) => {
                    debug!("Evicted disk cache entry {}", path.display());
                    total = total.saturating_sub(len);
                }
                Err(e) => warn!("Failed to evict {}: {e}", path.display()),
            }
        }
        Ok(())
    }
}

/// Marks an entry as recently used.
fn touch(path: &Path) {
    let refreshed = fs::File::options()
        .append(true)
        .open(path)
        .and_then(|file| file.set_modified(SystemTime::now()));
    if let Err(e) = refreshed {
        debug!("Failed to refresh {}: {e}", path.display());
    }
}
