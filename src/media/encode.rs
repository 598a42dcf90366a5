// SPDX-License-Identifier: MPL-2.0
//! Bitmap to byte-array encoding.
//!
//! Thumbnails of types that may carry transparency are encoded as PNG,
//! everything else as JPEG at full quality.

use crate::domain::media::RawImage;
use crate::error::Result;
use crate::media::image::to_dynamic;
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{ExtendedColorType, ImageFormat};
use std::io::Cursor;

/// JPEG quality used for opaque thumbnails.
pub const JPEG_QUALITY: u8 = 100;

/// Encodes a bitmap.
///
/// # Errors
///
/// Returns [`Error::Decode`](crate::error::Error::Decode) if encoding fails.
pub fn encode(image: &RawImage, can_have_alpha: bool) -> Result<Vec<u8>> {
    let dynamic = to_dynamic(image)?;
    let mut bytes = Vec::new();

    if can_have_alpha {
        dynamic.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    } else {
        let rgb = dynamic.to_rgb8();
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
        encoder.encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)?;
    }

    Ok(bytes)
}
