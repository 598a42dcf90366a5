// SPDX-License-Identifier: MPL-2.0
//! Orientation correction and the table deciding when it is needed.
//!
//! Some thumbnail sources already return display-oriented pixels, others
//! return pixels as stored. Whether a bitmap still needs correcting depends
//! on its MIME class and on the path that produced it, so that decision is
//! kept as data in [`RotationTable`].

use crate::domain::media::{MimeClass, RawImage};
use crate::domain::thumbnail::RotationAngle;
use crate::error::Result;
use crate::media::image::{from_dynamic, to_dynamic};
use std::collections::HashMap;

/// Path that produced a bitmap, as far as orientation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathVariant {
    /// Fast path, platform "thumbnail at size" primitive.
    SizedThumbnail,
    /// Fast path, legacy low-resolution store.
    LegacyStore,
    /// General path, decode pipeline.
    DecodePipeline,
}

// Still-image classes that carry orientation metadata.
const ORIENTED_STILLS: &[MimeClass] = &[
    MimeClass::Jpeg,
    MimeClass::Png,
    MimeClass::Webp,
    MimeClass::Heif,
    MimeClass::Dng,
    MimeClass::Tiff,
];

/// MIME class x path variant → "needs correction after this path".
///
/// Pairs missing from the table need no correction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationTable {
    rules: HashMap<(MimeClass, PathVariant), bool>,
}

impl Default for RotationTable {
    /// Table matching the bundled collaborators:
    ///
    /// - embedded EXIF thumbnails are stored in sensor orientation
    /// - the legacy store keeps unrotated image minis, video minis are upright
    /// - the decode pipeline applies no orientation, video frames included
    fn default() -> Self {
        let mut table = Self::empty();
        for &class in ORIENTED_STILLS {
            table = table
                .with_rule(class, PathVariant::SizedThumbnail, true)
                .with_rule(class, PathVariant::DecodePipeline, true);
        }
        for class in [
            MimeClass::Jpeg,
            MimeClass::Png,
            MimeClass::Webp,
            MimeClass::Heif,
            MimeClass::Dng,
            MimeClass::Tiff,
            MimeClass::Gif,
            MimeClass::Bmp,
            MimeClass::Ico,
            MimeClass::Svg,
            MimeClass::Other,
        ] {
            table = table.with_rule(class, PathVariant::LegacyStore, true);
        }
        table
            .with_rule(MimeClass::Other, PathVariant::DecodePipeline, true)
            .with_rule(MimeClass::Video, PathVariant::DecodePipeline, true)
            .with_rule(MimeClass::Video, PathVariant::SizedThumbnail, false)
            .with_rule(MimeClass::Video, PathVariant::LegacyStore, false)
    }
}

impl RotationTable {
    /// A table in which nothing needs correction.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Sets one rule, replacing any previous value for the pair.
    #[must_use]
    pub fn with_rule(mut self, class: MimeClass, variant: PathVariant, needs_rotation: bool) -> Self {
        self.rules.insert((class, variant), needs_rotation);
        self
    }

    /// Marks every class as already corrected by `variant`.
    ///
    /// Used for platforms whose native thumbnails come pre-rotated.
    #[must_use]
    pub fn self_correcting(mut self, variant: PathVariant) -> Self {
        for ((_, rule_variant), needs_rotation) in &mut self.rules {
            if *rule_variant == variant {
                *needs_rotation = false;
            }
        }
        self
    }

    #[must_use]
    pub fn needs_rotation(&self, class: MimeClass, variant: PathVariant) -> bool {
        self.rules.get(&(class, variant)).copied().unwrap_or(false)
    }
}

/// Rotates the bitmap clockwise by `rotation`, then mirrors it horizontally
/// when `flipped` is set. The pixel format is preserved.
///
/// # Errors
///
/// Returns an error if the bitmap buffer is inconsistent with its dimensions.
pub fn correct_orientation(image: &RawImage, rotation: RotationAngle, flipped: bool) -> Result<RawImage> {
    if !rotation.is_rotated() && !flipped {
        return Ok(image.clone());
    }

    let dynamic = to_dynamic(image)?;
    let rotated = match rotation.degrees() {
        90 => dynamic.rotate90(),
        180 => dynamic.rotate180(),
        270 => dynamic.rotate270(),
        _ => dynamic,
    };
    let oriented = if flipped { rotated.fliph() } else { rotated };

    Ok(from_dynamic(&oriented).with_format(image.format()))
}
