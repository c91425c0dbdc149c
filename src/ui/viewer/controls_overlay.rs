// SPDX-License-Identifier: MPL-2.0
//! Auto-hide sub-component for the video transport controls.
//!
//! The controls are always shown while paused. While playing they hide after
//! the configured inactivity delay; any pointer movement shows them again and
//! restarts the countdown. The countdown is a deadline checked on ticks, so
//! dropping the state cancels it.

use crate::ui::state::OverlayTimeout;
use std::time::Instant;

/// Controls overlay visibility state.
#[derive(Debug, Clone)]
pub struct State {
    visible: bool,
    playing: bool,
    /// When the controls hide, if playing and visible.
    hide_at: Option<Instant>,
    timeout: OverlayTimeout,
}

/// Messages for the controls overlay sub-component.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    /// Pointer moved over the viewer.
    PointerMoved(Instant),
    /// Playback started or stopped.
    PlayingChanged { playing: bool, now: Instant },
    /// Clock tick.
    Tick(Instant),
}

/// Effects produced by visibility changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    VisibilityChanged(bool),
}

impl Default for State {
    fn default() -> Self {
        Self::new(OverlayTimeout::default())
    }
}

impl State {
    #[must_use]
    pub fn new(timeout: OverlayTimeout) -> Self {
        Self {
            visible: true,
            playing: false,
            hide_at: None,
            timeout,
        }
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::PointerMoved(now) => {
                if self.playing {
                    self.hide_at = Some(self.timeout.hide_at(now));
                }
                self.show()
            }
            Message::PlayingChanged { playing, now } => {
                self.playing = playing;
                if playing {
                    self.hide_at = Some(self.timeout.hide_at(now));
                } else {
                    self.hide_at = None;
                }
                self.show()
            }
            Message::Tick(now) => match self.hide_at {
                Some(deadline) if self.playing && now >= deadline => {
                    self.hide_at = None;
                    if self.visible {
                        self.visible = false;
                        Effect::VisibilityChanged(false)
                    } else {
                        Effect::None
                    }
                }
                _ => Effect::None,
            },
        }
    }

    fn show(&mut self) -> Effect {
        if self.visible {
            Effect::None
        } else {
            self.visible = true;
            Effect::VisibilityChanged(true)
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible || !self.playing
    }

    /// True while a hide deadline is pending (the view needs clock ticks).
    #[must_use]
    pub fn has_pending_timer(&self) -> bool {
        self.hide_at.is_some()
    }
}
