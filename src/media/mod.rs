// SPDX-License-Identifier: MPL-2.0
//! Media delivery, decoding, download and playback.
//!
//! - [`delivery`]: CDN URL rewriting (thumbnails, lightbox size, video posters)
//! - [`image`]: fetching and decoding remote images
//! - [`cache`]: LRU cache of decoded images
//! - [`download`]: saving items to disk
//! - [`element`]: the playable element port driven by the video transport
//! - [`video`]: FFmpeg setup and container metadata for remote videos

pub mod cache;
pub mod delivery;
pub mod download;
pub mod element;
pub mod image;
pub mod video;

pub use cache::{CachedImage, ImageCache};
pub use element::{MediaEvent, PlaybackElement, TimelineElement};
pub use image::ImageData;
