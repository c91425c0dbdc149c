// SPDX-License-Identifier: MPL-2.0
//! Video transport sub-component.
//!
//! Wraps one [`PlaybackElement`] and mirrors its events into a
//! [`PlaybackState`]. Commands are forwarded to the element; the state only
//! changes when the element reports back, so `is_playing` always reflects real
//! playback. Fullscreen works the same way: the transport requests a mode and
//! waits for the observed window mode.
//!
//! Decoded pictures are picked up on every sync; until the first one arrives
//! the lightbox shows the poster.

use super::controls_overlay;
use crate::config::SKIP_STEP_SECS;
use crate::media::{ImageData, MediaEvent, PlaybackElement};
use crate::ui::state::{OverlayTimeout, Volume};
use std::time::Instant;

/// Mirrored state of the playing element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub volume: Volume,
    pub is_muted: bool,
    pub is_fullscreen: bool,
}

impl PlaybackState {
    fn new(volume: Volume, is_fullscreen: bool) -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume,
            is_muted: volume.is_silent(),
            is_fullscreen,
        }
    }

    /// Playback progress in `0.0..=1.0` (zero when the duration is unknown).
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }

    /// Whether seek and skip controls are usable.
    #[must_use]
    pub fn can_seek(&self) -> bool {
        self.duration > 0.0
    }
}

/// Video transport sub-component state.
pub struct State {
    element: Box<dyn PlaybackElement>,
    playback: PlaybackState,
    /// Last non-zero volume, restored when unmuting from silence.
    restore_volume: Volume,
    load_error: Option<String>,
    last_tick: Option<Instant>,
    controls: controls_overlay::State,
    frame: Option<ImageData>,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("playback", &self.playback)
            .field("load_error", &self.load_error)
            .field("controls_visible", &self.controls.is_visible())
            .field("has_frame", &self.frame.is_some())
            .finish()
    }
}

/// Messages for the video transport sub-component.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    TogglePlay,
    /// Click on the progress track, as a fraction of its width.
    SeekTo(f32),
    /// Relative seek in seconds.
    Skip(f64),
    SkipBackward,
    SkipForward,
    SetVolume(f32),
    ToggleMute,
    ToggleFullscreen,
    /// Window mode observed by the shell (including exits made outside the app).
    FullscreenChanged(bool),
    PointerMoved(Instant),
    Tick(Instant),
}

/// Effects produced by video transport changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    StateChanged,
    /// Ask the shell to switch the window mode.
    RequestFullscreen(bool),
    /// The media could not be loaded; controls are degraded.
    LoadFailed(String),
    Ended,
}

impl State {
    /// Wraps a freshly created element. Pending element events (metadata or
    /// load error) are applied immediately.
    pub fn new(
        mut element: Box<dyn PlaybackElement>,
        volume: Volume,
        overlay_timeout: OverlayTimeout,
        is_fullscreen: bool,
    ) -> (Self, Effect) {
        element.set_volume(volume.value());
        element.set_muted(volume.is_silent());
        let mut state = Self {
            element,
            playback: PlaybackState::new(volume, is_fullscreen),
            restore_volume: if volume.is_silent() {
                Volume::default()
            } else {
                volume
            },
            load_error: None,
            last_tick: None,
            controls: controls_overlay::State::new(overlay_timeout),
            frame: None,
        };
        let effect = state.sync(Instant::now());
        (state, effect)
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::TogglePlay => {
                if self.playback.is_playing {
                    self.element.pause();
                } else {
                    self.element.play();
                }
                self.sync(Instant::now())
            }
            Message::SeekTo(fraction) => {
                if !self.playback.can_seek() || !fraction.is_finite() {
                    return Effect::None;
                }
                let fraction = f64::from(fraction.clamp(0.0, 1.0));
                self.element.set_position(fraction * self.playback.duration);
                self.sync(Instant::now())
            }
            Message::Skip(delta) => self.skip(delta),
            Message::SkipBackward => self.skip(-SKIP_STEP_SECS),
            Message::SkipForward => self.skip(SKIP_STEP_SECS),
            Message::SetVolume(value) => {
                let volume = Volume::new(value);
                if !volume.is_silent() {
                    self.restore_volume = volume;
                }
                self.element.set_volume(volume.value());
                self.element.set_muted(volume.is_silent());
                self.sync(Instant::now())
            }
            Message::ToggleMute => {
                if self.playback.is_muted {
                    if self.playback.volume.is_silent() {
                        self.element.set_volume(self.restore_volume.value());
                    }
                    self.element.set_muted(false);
                } else {
                    self.element.set_muted(true);
                }
                self.sync(Instant::now())
            }
            Message::ToggleFullscreen => Effect::RequestFullscreen(!self.playback.is_fullscreen),
            Message::FullscreenChanged(fullscreen) => {
                if self.playback.is_fullscreen == fullscreen {
                    Effect::None
                } else {
                    self.playback.is_fullscreen = fullscreen;
                    Effect::StateChanged
                }
            }
            Message::PointerMoved(now) => {
                match self.controls.handle(controls_overlay::Message::PointerMoved(now)) {
                    controls_overlay::Effect::VisibilityChanged(_) => Effect::StateChanged,
                    controls_overlay::Effect::None => Effect::None,
                }
            }
            Message::Tick(now) => {
                if self.playback.is_playing {
                    if let Some(last) = self.last_tick {
                        self.element.advance(now.saturating_duration_since(last));
                    }
                    self.last_tick = Some(now);
                }
                let playback_effect = self.sync(now);
                let overlay_effect = self.controls.handle(controls_overlay::Message::Tick(now));
                match (playback_effect, overlay_effect) {
                    (Effect::None, controls_overlay::Effect::VisibilityChanged(_)) => {
                        Effect::StateChanged
                    }
                    (effect, _) => effect,
                }
            }
        }
    }

    fn skip(&mut self, delta: f64) -> Effect {
        if !self.playback.can_seek() || !delta.is_finite() {
            return Effect::None;
        }
        let target = (self.playback.current_time + delta).clamp(0.0, self.playback.duration);
        self.element.set_position(target);
        self.sync(Instant::now())
    }

    /// Applies pending element events and reports the most significant outcome.
    fn sync(&mut self, now: Instant) -> Effect {
        let mut effect = Effect::None;
        let events = self.element.take_events();
        if let Some(frame) = self.element.take_frame() {
            self.frame = Some(frame);
            effect = Effect::StateChanged;
        }
        for event in events {
            let outcome = match event {
                MediaEvent::LoadedMetadata { duration_secs } => {
                    self.playback.duration = duration_secs.max(0.0);
                    Effect::StateChanged
                }
                MediaEvent::TimeUpdate { position_secs } => {
                    self.playback.current_time = position_secs.clamp(0.0, self.playback.duration);
                    Effect::StateChanged
                }
                MediaEvent::Play => {
                    self.playback.is_playing = true;
                    self.last_tick = Some(now);
                    self.controls.handle(controls_overlay::Message::PlayingChanged {
                        playing: true,
                        now,
                    });
                    Effect::StateChanged
                }
                MediaEvent::Pause => {
                    self.playback.is_playing = false;
                    self.last_tick = None;
                    self.controls.handle(controls_overlay::Message::PlayingChanged {
                        playing: false,
                        now,
                    });
                    Effect::StateChanged
                }
                MediaEvent::Ended => Effect::Ended,
                MediaEvent::VolumeChange { volume, muted } => {
                    self.playback.volume = Volume::new(volume);
                    self.playback.is_muted = muted;
                    Effect::StateChanged
                }
                MediaEvent::Error { message } => {
                    tracing::warn!(%message, "video failed to load");
                    self.playback.duration = 0.0;
                    self.playback.current_time = 0.0;
                    self.load_error = Some(message.clone());
                    Effect::LoadFailed(message)
                }
            };
            effect = more_significant(effect, outcome);
        }
        effect
    }

    #[must_use]
    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.controls.is_visible()
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Latest decoded picture, if any arrived yet.
    #[must_use]
    pub fn frame(&self) -> Option<&ImageData> {
        self.frame.as_ref()
    }

    /// True while the transport needs clock ticks (playing, loading, or a
    /// pending controls hide).
    #[must_use]
    pub fn needs_ticks(&self) -> bool {
        self.needs_frame_ticks() || self.controls.has_pending_timer()
    }

    /// True while pictures or metadata may arrive at any moment.
    #[must_use]
    pub fn needs_frame_ticks(&self) -> bool {
        self.playback.is_playing || self.element.is_busy()
    }
}

fn more_significant(current: Effect, next: Effect) -> Effect {
    fn rank(effect: &Effect) -> u8 {
        match effect {
            Effect::None => 0,
            Effect::StateChanged => 1,
            Effect::RequestFullscreen(_) => 2,
            Effect::Ended => 3,
            Effect::LoadFailed(_) => 4,
        }
    }
    if rank(&next) >= rank(&current) {
        next
    } else {
        current
    }
}

/// Formats seconds as `m:ss`.
#[must_use]
pub fn format_time(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
