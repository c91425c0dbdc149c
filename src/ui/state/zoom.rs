// SPDX-License-Identifier: MPL-2.0
//! Zoom factor of the lightbox image viewer.

use crate::config::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_FACTOR_STEP};

/// Multiplicative zoom factor, guaranteed to stay within `0.5..=5.0`.
///
/// # Example
///
/// ```
/// use memories_bed::ui::state::ZoomFactor;
///
/// let zoom = ZoomFactor::default().zoom_in();
/// assert!((zoom.value() - 1.2).abs() < 1e-6);
///
/// // Values outside range are clamped
/// assert_eq!(ZoomFactor::new(10.0).value(), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    /// No magnification.
    pub const IDENTITY: Self = Self(DEFAULT_ZOOM);

    /// Creates a zoom factor, clamping to the valid range. Non-finite input
    /// falls back to the identity zoom.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(MIN_ZOOM, MAX_ZOOM))
        } else {
            Self(DEFAULT_ZOOM)
        }
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Multiplies by one step (1.2), clamping to the maximum.
    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self::new(self.0 * ZOOM_FACTOR_STEP)
    }

    /// Divides by one step (1.2), clamping to the minimum.
    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self::new(self.0 / ZOOM_FACTOR_STEP)
    }

    /// Zoom as a rounded percentage, for display.
    #[must_use]
    pub fn percent(self) -> u32 {
        (self.0 * 100.0).round() as u32
    }

    /// Returns true when the image is magnified and can be panned.
    #[must_use]
    pub fn allows_pan(self) -> bool {
        self.0 > DEFAULT_ZOOM
    }

    #[must_use]
    pub fn is_identity(self) -> bool {
        (self.0 - DEFAULT_ZOOM).abs() < f32::EPSILON
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= MIN_ZOOM
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= MAX_ZOOM
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}
