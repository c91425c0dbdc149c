// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Image viewer zoom factor and bounds
//! - **Gesture**: Swipe recognition thresholds
//! - **Video**: Skip step, volume, controls auto-hide, decoding limits
//! - **Delivery**: Thumbnail and optimized image sizes
//! - **Sharing**: Short code alphabet and public URL

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Identity zoom factor (image shown at its fitted size).
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Minimum allowed zoom factor.
pub const MIN_ZOOM: f32 = 0.5;

/// Maximum allowed zoom factor.
pub const MAX_ZOOM: f32 = 5.0;

/// Multiplier applied by a single zoom in (divisor for zoom out).
pub const ZOOM_FACTOR_STEP: f32 = 1.2;

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Horizontal movement (px) a touch must exceed before it counts as a drag.
pub const SWIPE_DEAD_ZONE_PX: f32 = 10.0;

/// Horizontal distance (px) a released touch must exceed to navigate.
pub const SWIPE_MIN_DISTANCE_PX: f32 = 50.0;

/// Drag offset (px) at which the dragged media is fully faded out.
pub const SWIPE_FADE_DISTANCE_PX: f32 = 300.0;

// ==========================================================================
// Video Defaults
// ==========================================================================

/// Seconds skipped by the skip back / skip forward buttons.
pub const SKIP_STEP_SECS: f64 = 10.0;

/// Default playback volume (0.0 to 1.0).
pub const DEFAULT_VOLUME: f32 = 1.0;

/// Minimum volume level.
pub const MIN_VOLUME: f32 = 0.0;

/// Maximum volume level.
pub const MAX_VOLUME: f32 = 1.0;

/// Default auto-hide timeout for the video controls overlay (in seconds).
pub const DEFAULT_OVERLAY_TIMEOUT_SECS: u32 = 3;

/// Minimum overlay timeout (in seconds).
pub const MIN_OVERLAY_TIMEOUT_SECS: u32 = 1;

/// Maximum overlay timeout (in seconds).
pub const MAX_OVERLAY_TIMEOUT_SECS: u32 = 30;

/// Largest decoded video frame width; bigger sources are scaled down.
pub const MAX_VIDEO_FRAME_WIDTH: u32 = 1280;

/// Largest decoded video frame height; bigger sources are scaled down.
pub const MAX_VIDEO_FRAME_HEIGHT: u32 = 720;

/// Network read timeout for remote video streams (in microseconds).
pub const VIDEO_READ_TIMEOUT_MICROS: u64 = 15_000_000;

/// Seconds of decoded audio queued ahead of the output device.
pub const AUDIO_LOOKAHEAD_SECS: f64 = 0.2;

// ==========================================================================
// Delivery Defaults
// ==========================================================================

/// Grid thumbnail width requested from the media CDN.
pub const THUMBNAIL_WIDTH: u32 = 400;

/// Grid thumbnail height requested from the media CDN.
pub const THUMBNAIL_HEIGHT: u32 = 300;

/// Lightbox image width requested from the media CDN.
pub const OPTIMIZED_WIDTH: u32 = 800;

/// Lightbox image height requested from the media CDN.
pub const OPTIMIZED_HEIGHT: u32 = 600;

/// Number of decoded images kept in memory.
pub const IMAGE_CACHE_CAPACITY: usize = 64;

// ==========================================================================
// Sharing Defaults
// ==========================================================================

/// Length of a folder short code.
pub const SHORT_CODE_LENGTH: usize = 6;

/// Characters a short code is drawn from.
pub const SHORT_CODE_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Public site used to build share links when none is configured.
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";
