// SPDX-License-Identifier: MPL-2.0
//! Thumbnail resolution: fast path first, decode pipeline as fallback.
//!
//! # Flow
//!
//! ```text
//! Start ─► unconstrained and provider installed? ─► fast path ─► bitmap? ─► Done
//!                 │ no                                              │ no
//!                 └──────────────────────────────► general path ◄──┘
//!                                                       │
//!                                              Done | Done(failure)
//! ```
//!
//! Each path runs at most once per request. Errors from the fast path only
//! trigger the fallback; the error of the last failed attempt becomes the
//! detail of the terminal [`ThumbnailFailure`].

use crate::application::port::{
    DecodeFormat, DecodeHandle, DecodePipeline, DecodeRequest, DecodeSource, DiskCachePolicy,
    FastPathProvider, VideoFrameSource,
};
use crate::domain::media::{mime, RawImage};
use crate::domain::thumbnail::{CacheKey, CacheSignature, ThumbnailFailure, ThumbnailRequest};
use crate::error::{Error, Result};
use crate::media::encode::encode;
use crate::media::orientation::{correct_orientation, PathVariant, RotationTable};
use log::{debug, warn};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Path that produced (or failed to produce) a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailOrigin {
    FastPath,
    GeneralPath,
}

#[derive(Debug, Clone)]
enum Bitmap {
    /// Exclusively owned, may be recycled after encoding.
    Owned(RawImage),
    /// Shared with the decode pipeline's cache.
    Shared(Arc<RawImage>),
}

/// A resolved thumbnail bitmap, not yet encoded.
#[derive(Debug, Clone)]
pub struct ResolvedThumbnail {
    bitmap: Bitmap,
}

impl ResolvedThumbnail {
    fn owned(image: RawImage) -> Self {
        Self {
            bitmap: Bitmap::Owned(image),
        }
    }

    fn shared(image: Arc<RawImage>) -> Self {
        Self {
            bitmap: Bitmap::Shared(image),
        }
    }

    #[must_use]
    pub fn image(&self) -> &RawImage {
        match &self.bitmap {
            Bitmap::Owned(image) => image,
            Bitmap::Shared(image) => image.as_ref(),
        }
    }

    #[must_use]
    pub fn origin(&self) -> ThumbnailOrigin {
        match self.bitmap {
            Bitmap::Owned(_) => ThumbnailOrigin::FastPath,
            Bitmap::Shared(_) => ThumbnailOrigin::GeneralPath,
        }
    }

    /// Whether the bitmap may be recycled once encoded.
    ///
    /// Fast-path bitmaps belong to the caller; general-path bitmaps are still
    /// referenced by the pipeline's cache.
    #[must_use]
    pub fn is_recyclable(&self) -> bool {
        matches!(self.bitmap, Bitmap::Owned(_))
    }

    /// Encodes the bitmap, PNG when `mime_type` can carry alpha and JPEG
    /// otherwise. Recyclable bitmaps are dropped once encoded.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn encode(self, mime_type: &str) -> Result<Vec<u8>> {
        encode(self.image(), mime::can_have_alpha(mime_type))
    }
}

/// Errors collected while resolving one request, oldest first.
#[derive(Debug, Default)]
struct Attempts {
    errors: Vec<(ThumbnailOrigin, Error)>,
}

impl Attempts {
    fn record(&mut self, origin: ThumbnailOrigin, error: Error) {
        self.errors.push((origin, error));
    }

    fn into_failure(self, request: &ThumbnailRequest) -> ThumbnailFailure {
        for (origin, error) in &self.errors {
            debug!("{origin:?} attempt for {} failed: {error}", request.source());
        }
        let last = self.errors.last().map(|(_, error)| error.message());
        ThumbnailFailure::new(request.source().clone(), last.as_deref())
    }
}

/// Releases a pending decode when dropped, whatever happened in between.
struct PendingDecode<'a> {
    pipeline: &'a dyn DecodePipeline,
    handle: Option<DecodeHandle>,
}

impl<'a> PendingDecode<'a> {
    fn submit(pipeline: &'a dyn DecodePipeline, request: DecodeRequest) -> Self {
        let handle = pipeline.submit(request);
        Self {
            pipeline,
            handle: Some(handle),
        }
    }

    fn wait(&self) -> Result<Arc<RawImage>> {
        match &self.handle {
            Some(handle) => self.pipeline.wait(handle),
            None => Err(Error::Decode("Decode handle already released".to_string())),
        }
    }
}

impl Drop for PendingDecode<'_> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.pipeline.release(handle);
        }
    }
}

/// Produces thumbnail bitmaps for media items.
///
/// Holds no per-request state; share it behind an `Arc` to serve
/// concurrent requests.
pub struct ThumbnailResolver {
    fast_path: Option<Box<dyn FastPathProvider>>,
    pipeline: Arc<dyn DecodePipeline>,
    rotation: RotationTable,
}

impl ThumbnailResolver {
    #[must_use]
    pub fn new(
        fast_path: Option<Box<dyn FastPathProvider>>,
        pipeline: Arc<dyn DecodePipeline>,
        rotation: RotationTable,
    ) -> Self {
        Self {
            fast_path,
            pipeline,
            rotation,
        }
    }

    /// Name of the installed fast-path provider, if any.
    #[must_use]
    pub fn fast_path_name(&self) -> Option<&'static str> {
        self.fast_path.as_ref().map(|provider| provider.name())
    }

    #[must_use]
    pub fn rotation_table(&self) -> &RotationTable {
        &self.rotation
    }

    /// Resolves a thumbnail bitmap for `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`ThumbnailFailure`] carrying the first line of the last
    /// attempt's error when no path produced a bitmap.
    pub fn resolve(
        &self,
        request: &ThumbnailRequest,
    ) -> std::result::Result<ResolvedThumbnail, ThumbnailFailure> {
        let mut attempts = Attempts::default();

        if let Some(provider) = self.fast_path.as_deref().filter(|_| request.is_unconstrained()) {
            match guarded(|| self.fetch_fast(provider, request)) {
                Ok(Some(image)) => return Ok(ResolvedThumbnail::owned(image)),
                Ok(None) => debug!(
                    "No {} thumbnail for {}, falling back to decode",
                    provider.name(),
                    request.source()
                ),
                Err(e) => {
                    debug!(
                        "{} thumbnail failed for {}: {e}",
                        provider.name(),
                        request.source()
                    );
                    attempts.record(ThumbnailOrigin::FastPath, e);
                }
            }
        }

        match guarded(|| self.fetch_general(request)) {
            Ok(image) => Ok(ResolvedThumbnail::shared(image)),
            Err(e) => {
                attempts.record(ThumbnailOrigin::GeneralPath, e);
                let failure = attempts.into_failure(request);
                warn!("{failure}");
                Err(failure)
            }
        }
    }

    fn fetch_fast(
        &self,
        provider: &dyn FastPathProvider,
        request: &ThumbnailRequest,
    ) -> Result<Option<RawImage>> {
        let Some(image) = provider.fetch(request)? else {
            return Ok(None);
        };
        if self
            .rotation
            .needs_rotation(request.mime_class(), provider.variant())
        {
            return correct_orientation(&image, request.rotation(), request.is_flipped()).map(Some);
        }
        Ok(Some(image))
    }

    fn fetch_general(&self, request: &ThumbnailRequest) -> Result<Arc<RawImage>> {
        let reference = request.source().clone();
        let (source, disk_cache) = if request.kind().is_video() {
            (
                DecodeSource::VideoFrame(VideoFrameSource {
                    reference: reference.clone(),
                }),
                DiskCachePolicy::ResourceOnly,
            )
        } else {
            (
                DecodeSource::Reference(reference.clone()),
                DiskCachePolicy::Automatic,
            )
        };

        let pending = PendingDecode::submit(
            self.pipeline.as_ref(),
            DecodeRequest {
                source,
                key: CacheKey::new(reference, CacheSignature::for_request(request)),
                format: decode_format(request.mime_type()),
                disk_cache,
                width: request.width(),
                height: request.height(),
            },
        );
        let image = pending.wait()?;

        if self
            .rotation
            .needs_rotation(request.mime_class(), PathVariant::DecodePipeline)
        {
            let corrected = correct_orientation(&image, request.rotation(), request.is_flipped())?;
            return Ok(Arc::new(corrected));
        }
        Ok(image)
    }
}

/// RGB565 unless the media type may carry transparency.
fn decode_format(mime_type: &str) -> DecodeFormat {
    if mime::can_have_alpha(mime_type) {
        DecodeFormat::PreferArgb8888
    } else {
        DecodeFormat::PreferRgb565
    }
}

/// Runs one attempt, turning a panic in a collaborator into an error.
fn guarded<T>(attempt: impl FnOnce() -> Result<T>) -> Result<T> {
    catch_unwind(AssertUnwindSafe(attempt)).unwrap_or_else(|payload| {
        Err(Error::Panicked(panic_message(payload.as_ref())))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}

impl std::fmt::Debug for ThumbnailResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThumbnailResolver")
            .field("fast_path", &self.fast_path_name())
            .field("rotation", &self.rotation)
            .finish_non_exhaustive()
    }
}

/// Resolves on tokio's blocking pool.
///
/// # Errors
///
/// Returns a [`ThumbnailFailure`] when resolution fails or the blocking task
/// could not complete.
pub async fn resolve_async(
    resolver: Arc<ThumbnailResolver>,
    request: ThumbnailRequest,
) -> std::result::Result<ResolvedThumbnail, ThumbnailFailure> {
    let source = request.source().clone();
    match tokio::task::spawn_blocking(move || resolver.resolve(&request)).await {
        Ok(result) => result,
        Err(e) => Err(ThumbnailFailure::new(
            source,
            Some(&format!("Thumbnail task failed: {e}")),
        )),
    }
}
