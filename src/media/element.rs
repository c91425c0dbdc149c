// SPDX-License-Identifier: MPL-2.0
//! Playable media element port.
//!
//! This module defines the [`PlaybackElement`] trait: the surface the video
//! transport drives, and the event stream it mirrors into its playback state.
//! The transport never assumes a command succeeded; it only trusts the
//! [`MediaEvent`]s the element reports back.
//!
//! Videos are played by the FFmpeg-backed
//! [`DecoderElement`](crate::video_player::DecoderElement).
//! [`TimelineElement`] advances a clock over a given duration and reports
//! the same events without decoding anything; an element created without a
//! duration reports [`MediaEvent::Error`] and stays inert.

use super::ImageData;
use std::collections::VecDeque;
use std::time::Duration;

/// Event emitted by a [`PlaybackElement`].
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Metadata is known; playback can start.
    LoadedMetadata { duration_secs: f64 },
    /// Playback position moved.
    TimeUpdate { position_secs: f64 },
    Play,
    Pause,
    /// Reached the end of the media; a `Pause` precedes this event.
    Ended,
    VolumeChange { volume: f32, muted: bool },
    /// The media could not be loaded. The element stays inert afterwards.
    Error { message: String },
}

/// Port for a single playable media element.
///
/// # Lifecycle
///
/// 1. Create the element for one media item
/// 2. Issue commands (`play`, `set_position`, ...)
/// 3. Call `advance()` from the UI clock while playing
/// 4. Drain events with `take_events()` and apply them, then pick up the
///    latest picture with `take_frame()`
/// 5. Drop the element when the item closes
pub trait PlaybackElement: Send {
    fn play(&mut self);

    fn pause(&mut self);

    /// Moves the playback position (clamped to the media bounds).
    fn set_position(&mut self, position_secs: f64);

    fn set_volume(&mut self, volume: f32);

    fn set_muted(&mut self, muted: bool);

    /// Lets `elapsed` wall time pass. Elements driven by their own clock
    /// ignore it.
    fn advance(&mut self, _elapsed: Duration) {}

    /// Returns pending events in emission order.
    fn take_events(&mut self) -> Vec<MediaEvent>;

    /// Latest decoded picture not yet handed out.
    fn take_frame(&mut self) -> Option<ImageData> {
        None
    }

    /// True while the element still has to report something on its own
    /// (metadata, or the frame after a seek).
    fn is_busy(&self) -> bool {
        false
    }
}

/// Clock-driven element over a known duration.
#[derive(Debug, Clone)]
pub struct TimelineElement {
    duration_secs: Option<f64>,
    position_secs: f64,
    playing: bool,
    volume: f32,
    muted: bool,
    events: VecDeque<MediaEvent>,
}

impl TimelineElement {
    /// Creates an element. `None` (or a non-positive duration) means the
    /// media failed to load.
    #[must_use]
    pub fn new(duration_secs: Option<f64>) -> Self {
        let duration_secs = duration_secs.filter(|d| d.is_finite() && *d > 0.0);
        let mut events = VecDeque::new();
        match duration_secs {
            Some(duration_secs) => events.push_back(MediaEvent::LoadedMetadata { duration_secs }),
            None => events.push_back(MediaEvent::Error {
                message: "media duration unavailable".to_string(),
            }),
        }
        Self {
            duration_secs,
            position_secs: 0.0,
            playing: false,
            volume: 1.0,
            muted: false,
            events,
        }
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    #[must_use]
    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    fn emit(&mut self, event: MediaEvent) {
        self.events.push_back(event);
    }
}

impl PlaybackElement for TimelineElement {
    fn play(&mut self) {
        let Some(duration) = self.duration_secs else {
            return;
        };
        if self.playing {
            return;
        }
        if self.position_secs >= duration {
            self.position_secs = 0.0;
            self.emit(MediaEvent::TimeUpdate { position_secs: 0.0 });
        }
        self.playing = true;
        self.emit(MediaEvent::Play);
    }

    fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.playing = false;
        self.emit(MediaEvent::Pause);
    }

    fn set_position(&mut self, position_secs: f64) {
        let Some(duration) = self.duration_secs else {
            return;
        };
        if !position_secs.is_finite() {
            return;
        }
        self.position_secs = position_secs.clamp(0.0, duration);
        self.emit(MediaEvent::TimeUpdate {
            position_secs: self.position_secs,
        });
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.emit(MediaEvent::VolumeChange {
            volume: self.volume,
            muted: self.muted,
        });
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.emit(MediaEvent::VolumeChange {
            volume: self.volume,
            muted: self.muted,
        });
    }

    fn advance(&mut self, elapsed: Duration) {
        let Some(duration) = self.duration_secs else {
            return;
        };
        if !self.playing {
            return;
        }
        let next = self.position_secs + elapsed.as_secs_f64();
        if next >= duration {
            self.position_secs = duration;
            self.playing = false;
            self.emit(MediaEvent::TimeUpdate {
                position_secs: duration,
            });
            self.emit(MediaEvent::Pause);
            self.emit(MediaEvent::Ended);
        } else {
            self.position_secs = next;
            self.emit(MediaEvent::TimeUpdate { position_secs: next });
        }
    }

    fn take_events(&mut self) -> Vec<MediaEvent> {
        self.events.drain(..).collect()
    }
}
