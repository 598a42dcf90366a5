// SPDX-License-Identifier: MPL-2.0
//! Thumbnail request and outcome types.

pub mod failure;
pub mod request;
pub mod signature;

pub use failure::{first_line, ThumbnailFailure};
pub use request::{RotationAngle, ThumbnailRequest};
pub use signature::{CacheKey, CacheSignature};
