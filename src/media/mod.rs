// SPDX-License-Identifier: MPL-2.0
//! Bitmap utilities shared by every thumbnail path.
//!
//! Decoding and scaling, orientation correction, and the final encoding to
//! bytes.

pub mod encode;
pub mod image;
pub mod orientation;

// Re-export commonly used types
pub use encode::encode;
pub use image::{decode_bytes, load_image};
pub use orientation::{correct_orientation, PathVariant, RotationTable};
