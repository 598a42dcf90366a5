// SPDX-License-Identifier: MPL-2.0
//! Legacy tier: a low-resolution store addressed by numeric row id.

use crate::application::port::{FastPathProvider, LegacyKind, LegacyThumbnailSource};
use crate::domain::media::RawImage;
use crate::domain::thumbnail::ThumbnailRequest;
use crate::error::Result;
use crate::media::image::load_image;
use crate::media::orientation::PathVariant;
use std::path::{Path, PathBuf};

/// Extensions probed for a stored mini thumbnail, in order.
const STORED_EXTENSIONS: &[&str] = &["jpg", "png"];

/// Fast-path provider for platforms that only keep legacy mini thumbnails.
///
/// The row id is the last path segment of the reference, so references
/// without a numeric id fail with an error rather than yielding `Ok(None)`.
#[derive(Debug)]
pub struct LegacyThumbnailProvider<S> {
    store: S,
}

impl<S: LegacyThumbnailSource> LegacyThumbnailProvider<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: LegacyThumbnailSource> FastPathProvider for LegacyThumbnailProvider<S> {
    fn name(&self) -> &'static str {
        "legacy"
    }

    fn variant(&self) -> PathVariant {
        PathVariant::LegacyStore
    }

    fn fetch(&self, request: &ThumbnailRequest) -> Result<Option<RawImage>> {
        let id = request.source().numeric_id()?;
        let kind = if request.kind().is_video() {
            LegacyKind::Video
        } else {
            LegacyKind::Image
        };
        self.store.load_thumbnail(id, kind)
    }
}

/// Legacy store laid out as `<root>/images/<id>.jpg` and `<root>/videos/<id>.jpg`.
#[derive(Debug, Clone)]
pub struct DirectoryThumbnailStore {
    root: PathBuf,
}

impl DirectoryThumbnailStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LegacyThumbnailSource for DirectoryThumbnailStore {
    fn load_thumbnail(&self, id: u64, kind: LegacyKind) -> Result<Option<RawImage>> {
        let dir = self.root.join(kind.directory_name());
        for extension in STORED_EXTENSIONS {
            let path = dir.join(format!("{id}.{extension}"));
            if path.is_file() {
                return load_image(&path).map(Some);
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([1, 2, 3, 255])))
            .save_with_format(path, ImageFormat::Png)
            .unwrap();
    }

    #[test]
    fn store_finds_image_by_id() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        write_png(&temp_dir.path().join("images/42.png"), 6, 3);

        let store = DirectoryThumbnailStore::new(temp_dir.path());
        let image = store.load_thumbnail(42, LegacyKind::Image).unwrap().unwrap();
        assert_eq!((image.width(), image.height()), (6, 3));
        assert!(store.load_thumbnail(42, LegacyKind::Video).unwrap().is_none());
        assert!(store.load_thumbnail(7, LegacyKind::Image).unwrap().is_none());
    }

    #[test]
    fn corrupt_stored_thumbnail_is_an_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        std::fs::create_dir_all(temp_dir.path().join("videos")).unwrap();
        std::fs::write(temp_dir.path().join("videos/9.jpg"), b"garbage").unwrap();

        let store = DirectoryThumbnailStore::new(temp_dir.path());
        assert!(store.load_thumbnail(9, LegacyKind::Video).is_err());
    }

    #[test]
    fn provider_maps_reference_and_kind() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        write_png(&temp_dir.path().join("videos/17.png"), 4, 4);
        let provider = LegacyThumbnailProvider::new(DirectoryThumbnailStore::new(temp_dir.path()));

        let video = ThumbnailRequest::new("content://media/external/video/media/17", "video/mp4", 256);
        assert!(provider.fetch(&video).unwrap().is_some());

        let image = ThumbnailRequest::new("content://media/external/images/media/17", "image/jpeg", 256);
        assert!(provider.fetch(&image).unwrap().is_none());
        assert_eq!(provider.variant(), PathVariant::LegacyStore);
    }

    #[test]
    fn provider_rejects_non_numeric_reference() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let provider = LegacyThumbnailProvider::new(DirectoryThumbnailStore::new(temp_dir.path()));
        let request = ThumbnailRequest::new("file:///photos/cat.jpg", "image/jpeg", 256);
        assert!(provider.fetch(&request).is_err());
    }
}
