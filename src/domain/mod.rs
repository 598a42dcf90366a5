// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types with no decoder or platform dependencies.
//!
//! # Modules
//!
//! - [`media`]: Media types ([`MediaKind`](media::MediaKind), [`RawImage`](media::RawImage),
//!   [`ContentRef`](media::ContentRef), [`MimeClass`](media::MimeClass))
//! - [`thumbnail`]: Request and outcome types ([`ThumbnailRequest`](thumbnail::ThumbnailRequest),
//!   [`CacheSignature`](thumbnail::CacheSignature), [`ThumbnailFailure`](thumbnail::ThumbnailFailure))

pub mod media;
pub mod thumbnail;
