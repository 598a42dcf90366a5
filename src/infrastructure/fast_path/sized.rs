// SPDX-License-Identifier: MPL-2.0
//! Sized tier: a "load thumbnail at size" primitive.
//!
//! The bundled primitive reads the thumbnail embedded in the EXIF IFD1 of
//! the item (JPEG, TIFF, HEIF, WebP and PNG containers). Items without an
//! embedded thumbnail yield `Ok(None)`.

use crate::application::port::{FastPathProvider, SourceReader, ThumbnailLoader};
use crate::domain::media::{ContentRef, MediaKind, RawImage};
use crate::domain::thumbnail::ThumbnailRequest;
use crate::error::{Error, Result};
use crate::media::image::{fit_within, from_dynamic};
use crate::media::orientation::PathVariant;
use exif::{In, Tag};
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

/// Fast-path provider for platforms exposing a sized thumbnail primitive.
#[derive(Debug)]
pub struct SizedThumbnailProvider<L> {
    loader: L,
}

impl<L: ThumbnailLoader> SizedThumbnailProvider<L> {
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self { loader }
    }
}

impl<L: ThumbnailLoader> FastPathProvider for SizedThumbnailProvider<L> {
    fn name(&self) -> &'static str {
        "sized"
    }

    fn variant(&self) -> PathVariant {
        PathVariant::SizedThumbnail
    }

    fn fetch(&self, request: &ThumbnailRequest) -> Result<Option<RawImage>> {
        self.loader
            .load_thumbnail(
                request.source(),
                request.kind(),
                request.width(),
                request.height(),
            )
    }
}

/// Loads the JPEG thumbnail embedded in an item's EXIF data.
pub struct ExifThumbnailLoader {
    reader: Arc<dyn SourceReader>,
}

impl ExifThumbnailLoader {
    #[must_use]
    pub fn new(reader: Arc<dyn SourceReader>) -> Self {
        Self { reader }
    }
}

impl std::fmt::Debug for ExifThumbnailLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExifThumbnailLoader").finish_non_exhaustive()
    }
}

impl ThumbnailLoader for ExifThumbnailLoader {
    #[allow(clippy::cast_possible_truncation)]
    fn load_thumbnail(
        &self,
        source: &ContentRef,
        kind: MediaKind,
        width: u32,
        height: u32,
    ) -> Result<Option<RawImage>> {
        if kind.is_video() {
            return Ok(None);
        }

        let path = self.reader.local_path(source)?;
        let file = File::open(&path)?;
        let mut bufreader = BufReader::new(file);

        let exif = match exif::Reader::new().read_from_container(&mut bufreader) {
            Ok(exif) => exif,
            // Containers without EXIF, or that EXIF cannot live in
            Err(exif::Error::NotFound(_) | exif::Error::InvalidFormat(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let offset = exif
            .get_field(Tag::JPEGInterchangeFormat, In::THUMBNAIL)
            .and_then(|field| field.value.get_uint(0));
        let length = exif
            .get_field(Tag::JPEGInterchangeFormatLength, In::THUMBNAIL)
            .and_then(|field| field.value.get_uint(0));
        let (Some(offset), Some(length)) = (offset, length) else {
            return Ok(None);
        };

        let start = offset as usize;
        let end = start
            .checked_add(length as usize)
            .ok_or_else(|| Error::Decode("Embedded thumbnail length overflows".to_string()))?;
        let data = exif.buf().get(start..end).ok_or_else(|| {
            Error::Decode("Embedded thumbnail lies outside the EXIF data".to_string())
        })?;

        let thumbnail = image_rs::load_from_memory(data)?;
        Ok(Some(from_dynamic(&fit_within(&thumbnail, width, height))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::decode::FsSourceReader;
    use image_rs::{DynamicImage, ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use std::sync::Mutex;
    use tempfile::tempdir;

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let rgb = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba([200, 30, 30, 255]),
        ))
        .to_rgb8();
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
            .expect("encode jpeg");
        bytes
    }

    /// Builds a JPEG whose APP1 segment carries an IFD1 thumbnail.
    fn jpeg_with_embedded_thumbnail(thumbnail: &[u8]) -> Vec<u8> {
        let mut tiff = Vec::new();
        tiff.extend_from_slice(b"II\x2A\x00");
        tiff.extend_from_slice(&8u32.to_le_bytes());
        // IFD0: Orientation = 1
        tiff.extend_from_slice(&1u16.to_le_bytes());
        tiff.extend_from_slice(&0x0112u16.to_le_bytes());
        tiff.extend_from_slice(&3u16.to_le_bytes());
        tiff.extend_from_slice(&1u32.to_le_bytes());
        tiff.extend_from_slice(&[1, 0, 0, 0]);
        tiff.extend_from_slice(&26u32.to_le_bytes());
        // IFD1: thumbnail offset and length
        let thumbnail_offset = 26 + 2 + 2 * 12 + 4;
        tiff.extend_from_slice(&2u16.to_le_bytes());
        tiff.extend_from_slice(&0x0201u16.to_le_bytes());
        tiff.extend_from_slice(&4u16.to_le_bytes());
        tiff.extend_from_slice(&1u32.to_le_bytes());
        tiff.extend_from_slice(&(thumbnail_offset as u32).to_le_bytes());
        tiff.extend_from_slice(&0x0202u16.to_le_bytes());
        tiff.extend_from_slice(&4u16.to_le_bytes());
        tiff.extend_from_slice(&1u32.to_le_bytes());
        tiff.extend_from_slice(&(thumbnail.len() as u32).to_le_bytes());
        tiff.extend_from_slice(&0u32.to_le_bytes());
        assert_eq!(tiff.len(), thumbnail_offset);
        tiff.extend_from_slice(thumbnail);

        let main = jpeg_bytes(64, 32);
        let segment_len = (2 + 6 + tiff.len()) as u16;
        let mut out = vec![0xFF, 0xD8, 0xFF, 0xE1];
        out.extend_from_slice(&segment_len.to_be_bytes());
        out.extend_from_slice(b"Exif\0\0");
        out.extend_from_slice(&tiff);
        out.extend_from_slice(&main[2..]);
        out
    }

    fn loader() -> ExifThumbnailLoader {
        ExifThumbnailLoader::new(Arc::new(FsSourceReader::new()))
    }

    #[test]
    fn embedded_thumbnail_is_returned() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("photo.jpg");
        std::fs::write(&path, jpeg_with_embedded_thumbnail(&jpeg_bytes(16, 8))).expect("write");

        let image = loader()
            .load_thumbnail(&ContentRef::new(path.to_string_lossy()), MediaKind::Image, 256, 256)
            .expect("load succeeds")
            .expect("thumbnail present");
        assert_eq!((image.width(), image.height()), (16, 8));
    }

    #[test]
    fn embedded_thumbnail_fits_requested_size() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("photo.jpg");
        std::fs::write(&path, jpeg_with_embedded_thumbnail(&jpeg_bytes(16, 8))).expect("write");

        let image = loader()
            .load_thumbnail(&ContentRef::new(path.to_string_lossy()), MediaKind::Image, 4, 4)
            .expect("load succeeds")
            .expect("thumbnail present");
        assert!(image.width() <= 4 && image.height() <= 4);
    }

    #[test]
    fn file_without_exif_yields_none() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("plain.jpg");
        std::fs::write(&path, jpeg_bytes(8, 8)).expect("write");

        let result = loader()
            .load_thumbnail(&ContentRef::new(path.to_string_lossy()), MediaKind::Image, 256, 256)
            .expect("load succeeds");
        assert!(result.is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("gone.jpg");
        let result = loader().load_thumbnail(
            &ContentRef::new(path.to_string_lossy()),
            MediaKind::Image,
            256,
            256,
        );
        assert!(result.is_err());
    }

    #[test]
    fn video_has_no_embedded_thumbnail() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("clip.mp4");
        std::fs::write(&path, b"not inspected").expect("write");

        let result = loader()
            .load_thumbnail(&ContentRef::new(path.to_string_lossy()), MediaKind::Video, 256, 256)
            .expect("load succeeds");
        assert!(result.is_none());
    }

    struct RecordingLoader {
        calls: Mutex<Vec<(String, u32, u32)>>,
    }

    impl ThumbnailLoader for RecordingLoader {
        fn load_thumbnail(
            &self,
            source: &ContentRef,
            _kind: MediaKind,
            width: u32,
            height: u32,
        ) -> Result<Option<RawImage>> {
            self.calls
                .lock()
                .unwrap()
                .push((source.as_str().to_string(), width, height));
            Ok(Some(RawImage::from_rgba(1, 1, vec![0; 4])))
        }
    }

    #[test]
    fn provider_passes_resolved_size() {
        let provider = SizedThumbnailProvider::new(RecordingLoader {
            calls: Mutex::new(Vec::new()),
        });
        let request = ThumbnailRequest::new("file:///a.jpg", "image/jpeg", 128);

        assert!(provider.fetch(&request).unwrap().is_some());
        assert_eq!(provider.variant(), PathVariant::SizedThumbnail);
        let calls = provider.loader.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[("file:///a.jpg".to_string(), 128, 128)]);
    }
}
