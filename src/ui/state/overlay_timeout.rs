// SPDX-License-Identifier: MPL-2.0
//! How long the video controls stay up without pointer activity.
//!
//! The timer only runs while a video plays; a paused video keeps its
//! controls on screen.

use crate::config::{
    DEFAULT_OVERLAY_TIMEOUT_SECS, MAX_OVERLAY_TIMEOUT_SECS, MIN_OVERLAY_TIMEOUT_SECS,
};
use std::time::{Duration, Instant};

/// Whole seconds, clamped to `1..=30`.
///
/// # Examples
///
/// ```
/// use memories_bed::ui::state::OverlayTimeout;
/// use std::time::{Duration, Instant};
///
/// // `[viewer] overlay_timeout_secs = 100` is capped.
/// let timeout = OverlayTimeout::from_config(Some(100));
/// assert_eq!(timeout.as_duration(), Duration::from_secs(30));
///
/// let moved = Instant::now();
/// assert_eq!(
///     OverlayTimeout::default().hide_at(moved),
///     moved + Duration::from_secs(3)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayTimeout(u32);

impl OverlayTimeout {
    #[must_use]
    pub fn new(secs: u32) -> Self {
        Self(secs.clamp(MIN_OVERLAY_TIMEOUT_SECS, MAX_OVERLAY_TIMEOUT_SECS))
    }

    /// Timeout configured under `[viewer] overlay_timeout_secs`.
    #[must_use]
    pub fn from_config(secs: Option<u32>) -> Self {
        secs.map_or_else(Self::default, Self::new)
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.0))
    }

    /// When the controls hide if the pointer last moved at `activity`.
    #[must_use]
    pub fn hide_at(self, activity: Instant) -> Instant {
        activity + self.as_duration()
    }
}

impl Default for OverlayTimeout {
    fn default() -> Self {
        Self(DEFAULT_OVERLAY_TIMEOUT_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_seconds_are_clamped() {
        assert_eq!(OverlayTimeout::new(0).value(), MIN_OVERLAY_TIMEOUT_SECS);
        assert_eq!(OverlayTimeout::new(100).value(), MAX_OVERLAY_TIMEOUT_SECS);
        assert_eq!(OverlayTimeout::from_config(Some(7)).value(), 7);
        assert_eq!(OverlayTimeout::from_config(None), OverlayTimeout::default());
    }

    #[test]
    fn controls_hide_after_the_timeout() {
        let moved = Instant::now();
        assert_eq!(
            OverlayTimeout::new(10).hide_at(moved),
            moved + Duration::from_secs(10)
        );
    }
}
