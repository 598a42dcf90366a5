// SPDX-License-Identifier: MPL-2.0
//! Core media types for the domain layer.
//!
//! These types represent pure data without any decoder dependencies.

use std::sync::Arc;

/// Classification of a media item, derived from its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Static image (JPEG, PNG, HEIF, etc.)
    Image,
    /// Video (MP4, MKV, etc.)
    Video,
    /// Anything else. Handled like an image.
    Other,
}

impl MediaKind {
    /// Returns `true` only for [`MediaKind::Video`].
    #[must_use]
    pub fn is_video(self) -> bool {
        self == MediaKind::Video
    }
}

/// Pixel layout a bitmap was produced with.
///
/// Storage is always RGBA; the format records whether the alpha channel
/// carries information and how many bits per channel survived decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// 8 bits per channel, alpha preserved.
    #[default]
    Rgba8888,
    /// 5/6/5 bits for red/green/blue, alpha forced opaque.
    Rgb565,
}

impl PixelFormat {
    /// Returns whether bitmaps in this format can carry transparency.
    #[must_use]
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Rgba8888)
    }
}

/// Raw bitmap data without presentation dependencies.
///
/// # Example
///
/// ```
/// use thumbnail_resolver::domain::media::RawImage;
/// use std::sync::Arc;
///
/// let pixels = vec![255u8; 100 * 100 * 4]; // 100x100 RGBA
/// let image = RawImage::new(100, 100, Arc::new(pixels));
///
/// assert_eq!(image.width(), 100);
/// assert_eq!(image.height(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct RawImage {
    /// Image width in pixels.
    width: u32,
    /// Image height in pixels.
    height: u32,
    /// RGBA pixel data (4 bytes per pixel).
    rgba_bytes: Arc<Vec<u8>>,
    format: PixelFormat,
}

impl RawImage {
    /// Creates a new `RawImage` from dimensions and RGBA pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 4`.
    #[must_use]
    pub fn new(width: u32, height: u32, rgba_bytes: Arc<Vec<u8>>) -> Self {
        let expected_len = (width as usize) * (height as usize) * 4;
        assert_eq!(
            rgba_bytes.len(),
            expected_len,
            "RGBA data length mismatch: expected {expected_len}, got {}",
            rgba_bytes.len()
        );

        Self {
            width,
            height,
            rgba_bytes,
            format: PixelFormat::Rgba8888,
        }
    }

    /// Creates a new `RawImage` from dimensions and owned RGBA pixel data.
    ///
    /// # Panics
    ///
    /// Panics if the pixel data length doesn't match `width * height * 4`.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, rgba_bytes: Vec<u8>) -> Self {
        Self::new(width, height, Arc::new(rgba_bytes))
    }

    /// Returns the same pixels tagged with another pixel format.
    #[must_use]
    pub fn with_format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    /// Returns the image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the pixel format this bitmap was decoded with.
    #[must_use]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns a reference to the RGBA pixel data.
    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Returns the total number of pixels.
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Returns the size of the pixel buffer in bytes.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.rgba_bytes.len()
    }
}

impl PartialEq for RawImage {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.format == other.format
            && self.rgba_bytes == other.rgba_bytes
    }
}

impl Eq for RawImage {}
