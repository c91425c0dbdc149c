// SPDX-License-Identifier: MPL-2.0
//! `memories_bed` is the public viewer of Memories Bed folders.
//!
//! It shows a shared folder of photos and videos as a filterable grid with a
//! lightbox (zoom, pan and rotation for images, a custom transport for
//! videos, swipe navigation), lets visitors leave comments and download
//! items, and shares the folder through its short code and QR code.

pub mod app;
pub mod backend;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod media;
pub mod ui;
pub mod video_player;

#[cfg(test)]
pub(crate) mod test_utils;
