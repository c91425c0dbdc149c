// SPDX-License-Identifier: MPL-2.0
//! Gallery viewer: thumbnail grid and the lightbox opened from it.
//!
//! Sub-components follow the same shape: a `State`, a `Message`, and an
//! `Effect` returned from `State::handle` for the parent to act on.
//!
//! - [`grid`] / [`grid_view`]: filtered thumbnails
//! - [`lightbox`] / [`lightbox_view`]: the full-screen overlay
//! - [`image_view`]: zoom, rotation and pan of the open image
//! - [`video_transport`] with [`controls_overlay`]: playback of the open video
//! - [`swipe`]: horizontal swipe recognizer
//! - [`media_canvas`]: canvas drawing the open item

pub mod controls_overlay;
pub mod grid;
pub mod grid_view;
pub mod image_view;
pub mod lightbox;
pub mod lightbox_view;
pub mod media_canvas;
pub mod swipe;
pub mod video_transport;
