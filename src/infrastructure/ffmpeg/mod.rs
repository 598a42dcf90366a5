// SPDX-License-Identifier: MPL-2.0
//! `FFmpeg` adapter implementing the [`FrameExtractor`] port trait.
//!
//! # Design Notes
//!
//! - One input context per call, nothing kept between calls
//! - The first decodable frame of the best video stream is the representative frame
//! - Frames are converted to RGBA as stored; display rotation is left to the caller
//!
//! [`FrameExtractor`]: crate::application::port::FrameExtractor

use crate::application::port::FrameExtractor;
use crate::domain::media::RawImage;
use crate::error::{Error, Result, VideoError};
use std::path::Path;
use std::sync::Once;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg with appropriate log level.
///
/// This function is safe to call multiple times - initialization will only
/// happen once thanks to `std::sync::Once`. It sets the FFmpeg log level
/// to ERROR to suppress warning messages like "Detected creation time before 1970".
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Io(format!("FFmpeg initialization failed: {e}")));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// `FFmpeg`-based representative frame extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegFrameExtractor;

impl FfmpegFrameExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Extracts RGBA data from a scaled frame, handling stride correctly.
    #[allow(clippy::cast_possible_truncation)] // stride is always < u32::MAX for video frames
    fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
        let width = frame.width();
        let height = frame.height();
        let data = frame.data(0);
        let stride = frame.stride(0);

        let mut rgba_bytes = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            let row_start = (y * stride as u32) as usize;
            let row_end = row_start + (width * 4) as usize;
            rgba_bytes.extend_from_slice(&data[row_start..row_end]);
        }

        rgba_bytes
    }
}

impl FrameExtractor for FfmpegFrameExtractor {
    fn extract_frame(&self, path: &Path) -> std::result::Result<RawImage, VideoError> {
        init_ffmpeg().map_err(|e| VideoError::Other(e.message()))?;

        let mut ictx = ffmpeg_next::format::input(path)
            .map_err(|e| VideoError::Open(e.to_string()))?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or(VideoError::NoVideoStream)?;
        let video_stream_index = input.index();

        let context_decoder = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
            .map_err(|e| VideoError::Other(format!("Failed to create codec context: {e}")))?;
        let mut decoder = context_decoder
            .decoder()
            .video()
            .map_err(|e| VideoError::UnsupportedCodec(e.to_string()))?;

        let width = decoder.width();
        let height = decoder.height();
        if width == 0 || height == 0 {
            return Err(VideoError::CorruptedFile);
        }

        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| VideoError::Other(format!("Failed to create scaler: {e}")))?;

        let mut decoded = ffmpeg_next::frame::Video::empty();
        let mut got_frame = false;
        for (stream, packet) in ictx.packets() {
            if stream.index() != video_stream_index {
                continue;
            }
            decoder
                .send_packet(&packet)
                .map_err(|e| VideoError::DecodingFailed(format!("Packet send failed: {e}")))?;
            if decoder.receive_frame(&mut decoded).is_ok() {
                got_frame = true;
                break;
            }
        }

        if !got_frame {
            // Drain frames still buffered in the decoder
            decoder
                .send_eof()
                .map_err(|e| VideoError::DecodingFailed(format!("Flush failed: {e}")))?;
            got_frame = decoder.receive_frame(&mut decoded).is_ok();
        }
        if !got_frame {
            return Err(VideoError::DecodingFailed(
                "Could not decode a representative frame".to_string(),
            ));
        }

        let mut rgba_frame = ffmpeg_next::frame::Video::empty();
        scaler
            .run(&decoded, &mut rgba_frame)
            .map_err(|e| VideoError::DecodingFailed(format!("Scaling failed: {e}")))?;

        let rgba_data = Self::extract_rgba_data(&rgba_frame);
        Ok(RawImage::from_rgba(
            rgba_frame.width(),
            rgba_frame.height(),
            rgba_data,
        ))
    }
}
