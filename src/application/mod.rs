// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`resolver`]: Thumbnail resolution across the fast and general paths
//! - [`fetch`]: Request/response boundary around the resolver
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The CLI wires infrastructure adapters into the resolver
//!
//! # Example
//!
//! ```ignore
//! use thumbnail_resolver::application::resolver::ThumbnailResolver;
//! use thumbnail_resolver::domain::thumbnail::ThumbnailRequest;
//!
//! let resolver = ThumbnailResolver::new(fast_path, pipeline, RotationTable::default());
//! let thumbnail = resolver.resolve(&ThumbnailRequest::new("file:///a.jpg", "image/jpeg", 256))?;
//! let bytes = thumbnail.encode("image/jpeg")?;
//! ```

pub mod fetch;
pub mod port;
pub mod resolver;

pub use fetch::{fetch, FetchError, FetchRequest, FETCH_ERROR_CODE};
pub use resolver::{resolve_async, ResolvedThumbnail, ThumbnailOrigin, ThumbnailResolver};
