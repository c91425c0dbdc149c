// SPDX-License-Identifier: MPL-2.0
//! FFmpeg setup and stream metadata for remote videos.
//!
//! Videos are streamed straight from their delivery URL; FFmpeg's network
//! layer handles HTTP(S) and range requests. Duration and dimensions come
//! from the container, never from the backend row.

use crate::config::{MAX_VIDEO_FRAME_HEIGHT, MAX_VIDEO_FRAME_WIDTH, VIDEO_READ_TIMEOUT_MICROS};
use crate::error::{Error, Result};
use std::sync::Once;

/// Static flag to ensure FFmpeg is initialized only once.
static FFMPEG_INIT: Once = Once::new();

/// Initialize FFmpeg (and its network layer) with a quiet log level.
///
/// Safe to call from any thread, any number of times.
///
/// # Errors
///
/// Returns [`Error::Video`] if FFmpeg fails to initialize.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Video(format!("FFmpeg initialization failed: {e}")));
            return;
        }
        ffmpeg_next::format::network::init();

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Opens a remote (or local) media input.
///
/// # Errors
///
/// Returns [`Error::Video`] if the URL cannot be opened or has no readable streams.
pub fn open_input(url: &str) -> Result<ffmpeg_next::format::context::Input> {
    init_ffmpeg()?;

    let mut options = ffmpeg_next::Dictionary::new();
    options.set("rw_timeout", &VIDEO_READ_TIMEOUT_MICROS.to_string());

    ffmpeg_next::format::input_with_dictionary(&url, options)
        .map_err(|e| Error::Video(format!("Failed to open video: {e}")))
}

/// Container metadata of an opened video.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoInfo {
    /// Source width in pixels
    pub width: u32,
    /// Source height in pixels
    pub height: u32,
    /// Duration in seconds (0.0 when the container does not say)
    pub duration_secs: f64,
    pub has_audio: bool,
}

/// Converts a timestamp expressed in `time_base` units to seconds.
#[must_use]
pub fn timestamp_secs(timestamp: i64, time_base: ffmpeg_next::Rational) -> f64 {
    if time_base.denominator() == 0 {
        return 0.0;
    }
    timestamp as f64 * f64::from(time_base.numerator()) / f64::from(time_base.denominator())
}

/// Media duration in seconds, preferring the stream's own duration and
/// falling back to the container's (in `AV_TIME_BASE` units).
#[must_use]
pub fn duration_secs(
    stream_duration: i64,
    time_base: ffmpeg_next::Rational,
    container_duration: i64,
) -> f64 {
    if stream_duration > 0 {
        timestamp_secs(stream_duration, time_base)
    } else if container_duration > 0 {
        container_duration as f64 / f64::from(ffmpeg_next::ffi::AV_TIME_BASE)
    } else {
        0.0
    }
}

/// Output size for decoded frames: the source size scaled down (never up)
/// to fit the frame limits, keeping the aspect ratio and even dimensions.
#[must_use]
pub fn frame_size(width: u32, height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let scale = (f64::from(MAX_VIDEO_FRAME_WIDTH) / f64::from(width))
        .min(f64::from(MAX_VIDEO_FRAME_HEIGHT) / f64::from(height))
        .min(1.0);
    if scale >= 1.0 {
        return (width, height);
    }
    let even = |value: f64| ((value.round() as u32) & !1).max(2);
    (even(f64::from(width) * scale), even(f64::from(height) * scale))
}
