// SPDX-License-Identifier: MPL-2.0
//! Playback clock shared by the UI thread and the decoder threads.
//!
//! The element moves the clock (play, pause, seek) and the video decoder
//! paces frames against it. The audio output runs at the device rate, which
//! tracks the same wall clock.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

/// All clock instants are stored relative to this one.
static REFERENCE_INSTANT: OnceLock<Instant> = OnceLock::new();

fn instant_to_us(instant: Instant) -> u64 {
    let reference = REFERENCE_INSTANT.get_or_init(Instant::now);
    instant.saturating_duration_since(*reference).as_micros() as u64
}

fn us_to_instant(us: u64) -> Instant {
    let reference = REFERENCE_INSTANT.get_or_init(Instant::now);
    *reference + Duration::from_micros(us)
}

fn secs_to_us(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        (secs * 1_000_000.0) as u64
    } else {
        0
    }
}

/// Frames closer than this to the clock are shown immediately.
pub const SYNC_TOLERANCE_SECS: f64 = 0.05;

/// Maximum consecutive late frames dropped before one is shown anyway.
pub const MAX_FRAME_SKIP: u32 = 5;

/// Lock-free playback clock.
///
/// While running, the position is the anchor position plus the wall time
/// elapsed since the anchor instant.
#[derive(Debug)]
pub struct SyncClock {
    anchor_pts_us: AtomicU64,
    anchor_time_us: AtomicU64,
    is_running: AtomicBool,
}

impl Default for SyncClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            anchor_pts_us: AtomicU64::new(0),
            anchor_time_us: AtomicU64::new(0),
            is_running: AtomicBool::new(false),
        }
    }

    /// Starts (or resumes) the clock from its current position.
    pub fn resume_at(&self, now: Instant) {
        if self.is_running() {
            return;
        }
        self.anchor_time_us.store(instant_to_us(now), Ordering::SeqCst);
        self.is_running.store(true, Ordering::SeqCst);
    }

    /// Freezes the clock at its position as of `now`.
    pub fn pause_at(&self, now: Instant) {
        let position = self.time_at(now);
        self.is_running.store(false, Ordering::SeqCst);
        self.anchor_pts_us
            .store(secs_to_us(position), Ordering::SeqCst);
    }

    /// Moves the clock to `target_secs`, keeping its running state.
    pub fn seek_at(&self, target_secs: f64, now: Instant) {
        self.anchor_pts_us
            .store(secs_to_us(target_secs), Ordering::SeqCst);
        self.anchor_time_us.store(instant_to_us(now), Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.resume_at(Instant::now());
    }

    pub fn pause(&self) {
        self.pause_at(Instant::now());
    }

    pub fn seek(&self, target_secs: f64) {
        self.seek_at(target_secs, Instant::now());
    }

    /// Position in seconds as of `now`.
    #[must_use]
    pub fn time_at(&self, now: Instant) -> f64 {
        let anchor_pts_us = self.anchor_pts_us.load(Ordering::SeqCst);
        if !self.is_running() {
            return anchor_pts_us as f64 / 1_000_000.0;
        }
        let anchor = us_to_instant(self.anchor_time_us.load(Ordering::SeqCst));
        let elapsed_us = now.saturating_duration_since(anchor).as_micros() as u64;
        (anchor_pts_us + elapsed_us) as f64 / 1_000_000.0
    }

    #[must_use]
    pub fn current_time_secs(&self) -> f64 {
        self.time_at(Instant::now())
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }
}

/// What to do with a decoded frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncAction {
    /// Display the frame now.
    Display,
    /// The frame is early; try again after this delay.
    Wait(Duration),
    /// The frame is late; drop it.
    Skip,
}

/// Compares a frame timestamp with the clock.
#[must_use]
pub fn calculate_sync_action(frame_pts_secs: f64, clock_secs: f64) -> SyncAction {
    let diff = frame_pts_secs - clock_secs;

    if diff.abs() <= SYNC_TOLERANCE_SECS {
        SyncAction::Display
    } else if diff > 0.0 {
        SyncAction::Wait(Duration::from_secs_f64(diff))
    } else {
        SyncAction::Skip
    }
}

pub type SharedSyncClock = Arc<SyncClock>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn new_clock_is_stopped_at_zero() {
        let clock = SyncClock::new();
        assert!(!clock.is_running());
        assert_abs_diff_eq!(clock.current_time_secs(), 0.0);
    }

    #[test]
    fn running_clock_follows_wall_time() {
        let clock = SyncClock::new();
        let start = Instant::now();
        clock.resume_at(start);
        assert_abs_diff_eq!(
            clock.time_at(start + Duration::from_millis(1500)),
            1.5,
            epsilon = 1e-6
        );
    }

    #[test]
    fn pause_freezes_position() {
        let clock = SyncClock::new();
        let start = Instant::now();
        clock.resume_at(start);
        clock.pause_at(start + Duration::from_secs(2));
        assert_abs_diff_eq!(
            clock.time_at(start + Duration::from_secs(10)),
            2.0,
            epsilon = 1e-6
        );

        clock.resume_at(start + Duration::from_secs(10));
        assert_abs_diff_eq!(
            clock.time_at(start + Duration::from_secs(11)),
            3.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn seek_moves_position_and_keeps_running_state() {
        let clock = SyncClock::new();
        let start = Instant::now();
        clock.seek_at(60.0, start);
        assert!(!clock.is_running());
        assert_abs_diff_eq!(clock.time_at(start + Duration::from_secs(5)), 60.0);

        clock.resume_at(start);
        clock.seek_at(10.0, start + Duration::from_secs(1));
        assert_abs_diff_eq!(
            clock.time_at(start + Duration::from_secs(2)),
            11.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn negative_seek_lands_on_zero() {
        let clock = SyncClock::new();
        clock.seek(-4.0);
        assert_abs_diff_eq!(clock.current_time_secs(), 0.0);
    }

    #[test]
    fn frames_within_tolerance_are_displayed() {
        assert_eq!(calculate_sync_action(1.0, 1.0), SyncAction::Display);
        assert_eq!(calculate_sync_action(1.04, 1.0), SyncAction::Display);
        assert_eq!(calculate_sync_action(0.96, 1.0), SyncAction::Display);
    }

    #[test]
    fn early_frames_wait_and_late_frames_skip() {
        match calculate_sync_action(1.5, 1.0) {
            SyncAction::Wait(delay) => {
                assert_abs_diff_eq!(delay.as_secs_f64(), 0.5, epsilon = 1e-9);
            }
            other => panic!("expected Wait, got {other:?}"),
        }
        assert_eq!(calculate_sync_action(0.5, 1.0), SyncAction::Skip);
    }
}
