// SPDX-License-Identifier: MPL-2.0
//! Bitmap decoding, scaling and pixel-format conversion.

use crate::domain::media::{PixelFormat, RawImage};
use crate::error::{Error, Result};
use image_rs::{imageops::FilterType, DynamicImage, GenericImageView};
use std::fs;
use std::path::Path;

/// Decodes encoded image bytes (PNG, JPEG, WebP, ...) into RGBA.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the format is unknown or the data is invalid.
pub fn decode_bytes(bytes: &[u8]) -> Result<RawImage> {
    let img = image_rs::load_from_memory(bytes)?;
    Ok(from_dynamic(&img))
}

/// Loads and decodes an image file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Decode`]
/// if it cannot be decoded.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<RawImage> {
    let img_bytes = fs::read(path)?;
    decode_bytes(&img_bytes)
}

/// Converts a decoded image into a [`RawImage`].
#[must_use]
pub fn from_dynamic(dynamic: &DynamicImage) -> RawImage {
    let (width, height) = dynamic.dimensions();
    RawImage::from_rgba(width, height, dynamic.to_rgba8().into_vec())
}

/// Converts a [`RawImage`] into an `image` crate buffer for processing.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the pixel buffer does not match the dimensions.
pub fn to_dynamic(image: &RawImage) -> Result<DynamicImage> {
    let buffer =
        image_rs::RgbaImage::from_raw(image.width(), image.height(), image.rgba_bytes().to_vec())
            .ok_or_else(|| Error::Decode("RGBA buffer does not match dimensions".to_string()))?;
    Ok(DynamicImage::ImageRgba8(buffer))
}

/// Scales the image down so that it covers `width` x `height`, keeping its
/// aspect ratio. Images already at or below the target are returned as is.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn downsample_to_cover(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (src_width, src_height) = image.dimensions();
    if src_width == 0 || src_height == 0 {
        return image.clone();
    }

    let scale = f64::max(
        f64::from(width) / f64::from(src_width),
        f64::from(height) / f64::from(src_height),
    );
    if scale >= 1.0 {
        return image.clone();
    }

    let new_width = (f64::from(src_width) * scale).round().max(1.0) as u32;
    let new_height = (f64::from(src_height) * scale).round().max(1.0) as u32;
    image.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

/// Scales the image down so that it fits within `width` x `height`.
#[must_use]
pub fn fit_within(image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
    let (src_width, src_height) = image.dimensions();
    if src_width <= width && src_height <= height {
        return image.clone();
    }
    image.thumbnail(width.max(1), height.max(1))
}

/// Converts a bitmap to the given pixel format.
///
/// `Rgb565` keeps the top 5/6/5 bits of red/green/blue and makes every
/// pixel opaque.
#[must_use]
pub fn convert_format(image: RawImage, format: PixelFormat) -> RawImage {
    match format {
        PixelFormat::Rgba8888 => image.with_format(PixelFormat::Rgba8888),
        PixelFormat::Rgb565 => {
            let mut pixels = image.rgba_bytes().to_vec();
            for pixel in pixels.chunks_exact_mut(4) {
                pixel[0] &= 0xF8;
                pixel[1] &= 0xFC;
                pixel[2] &= 0xF8;
                pixel[3] = 0xFF;
            }
            RawImage::from_rgba(image.width(), image.height(), pixels)
                .with_format(PixelFormat::Rgb565)
        }
    }
}
