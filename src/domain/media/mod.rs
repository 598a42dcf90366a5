// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! This module contains core media types that are independent of any
//! decoder or infrastructure concerns.

pub mod mime;
pub mod reference;
pub mod types;

// Re-export commonly used types
pub use mime::MimeClass;
pub use reference::ContentRef;
pub use types::{MediaKind, PixelFormat, RawImage};
