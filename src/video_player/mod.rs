// SPDX-License-Identifier: MPL-2.0
//! Video playback on top of FFmpeg and cpal.
//!
//! Each opened video gets a decoder thread for pictures and, when the
//! container has an audio track, a second one feeding the output device.
//! Both follow a shared [`SyncClock`] that the UI moves through the
//! [`DecoderElement`].
//!
//! - [`decoder`]: video decoding, scaling and frame pacing
//! - [`audio`]: audio decoding and resampling
//! - [`audio_output`]: output device stream and live volume controls
//! - [`sync`]: shared playback clock
//! - [`element`]: the [`PlaybackElement`](crate::media::PlaybackElement) adapter

pub mod audio;
pub mod audio_output;
pub mod decoder;
pub mod element;
pub mod sync;

pub use element::DecoderElement;
pub use sync::{SharedSyncClock, SyncClock};
