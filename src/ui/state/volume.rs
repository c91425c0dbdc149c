// SPDX-License-Identifier: MPL-2.0
//! Playback volume of the lightbox video.
//!
//! The transport keeps one [`Volume`] per open video and hands its value to
//! the playback element. Zero volume doubles as the muted state, and the
//! level the user picked last is what unmuting restores.

use crate::config::{DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME};

/// Volume level, guaranteed to be within `0.0..=1.0`.
///
/// # Examples
///
/// ```
/// use memories_bed::ui::state::Volume;
///
/// // `[viewer] default_volume = 0.5`
/// let volume = Volume::from_config(Some(0.5));
/// assert_eq!(volume.value(), 0.5);
/// assert_eq!(volume.gain(), 0.25);
///
/// // Dragging the slider to the left mutes the video.
/// assert!(Volume::new(-0.2).is_silent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Clamps a slider or element value. Non-finite input is silence.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_finite() {
            Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
        } else {
            Self(MIN_VOLUME)
        }
    }

    /// Level configured under `[viewer] default_volume`, full volume when
    /// unset.
    #[must_use]
    pub fn from_config(volume: Option<f32>) -> Self {
        volume.map_or_else(Self::default, Self::new)
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// A silent video is shown as muted.
    #[must_use]
    pub fn is_silent(self) -> bool {
        self.0 <= MIN_VOLUME
    }

    /// Amplitude factor for the audio samples. Quadratic, so the slider
    /// sounds linear.
    #[must_use]
    pub fn gain(self) -> f32 {
        self.0 * self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}
