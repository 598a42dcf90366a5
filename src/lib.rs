// SPDX-License-Identifier: MPL-2.0
//! `thumbnail_resolver` produces thumbnail bitmaps for images and videos.
//!
//! It asks the platform for a ready-made thumbnail first, falls back to a
//! caching decode pipeline for everything else, corrects orientation at most
//! once, and encodes the result as PNG or JPEG.

#![doc(html_root_url = "https://docs.rs/thumbnail_resolver/0.3.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
