// SPDX-License-Identifier: MPL-2.0
//! Rotation angle of the lightbox image viewer.

/// Rotation angle in 90° increments (0°, 90°, 180° or 270°).
///
/// # Example
///
/// ```
/// use memories_bed::ui::state::RotationAngle;
///
/// let angle = RotationAngle::default().rotate_clockwise();
/// assert_eq!(angle.degrees(), 90);
///
/// // Full rotation cycle
/// let full = angle.rotate_clockwise().rotate_clockwise().rotate_clockwise();
/// assert_eq!(full.degrees(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationAngle(u16);

impl RotationAngle {
    pub const ZERO: Self = Self(0);

    /// Normalizes any value to the lower 90° increment, wrapped to `0..360`.
    #[must_use]
    pub fn new(degrees: u16) -> Self {
        Self(((degrees / 90) * 90) % 360)
    }

    #[must_use]
    pub fn degrees(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn radians(self) -> f32 {
        f32::from(self.0).to_radians()
    }

    /// Adds 90°, modulo 360.
    #[must_use]
    pub fn rotate_clockwise(self) -> Self {
        Self((self.0 + 90) % 360)
    }

    #[must_use]
    pub fn is_rotated(self) -> bool {
        self.0 != 0
    }

    /// True for 90° and 270°, where width and height swap.
    #[must_use]
    pub fn is_sideways(self) -> bool {
        self.0 == 90 || self.0 == 270
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn new_normalizes() {
        assert_eq!(RotationAngle::new(95).degrees(), 90);
        assert_eq!(RotationAngle::new(360).degrees(), 0);
        assert_eq!(RotationAngle::new(450).degrees(), 90);
    }

    #[test]
    fn four_rotations_return_to_start() {
        for start in [0, 90, 180, 270] {
            let angle = RotationAngle::new(start);
            let cycled = angle
                .rotate_clockwise()
                .rotate_clockwise()
                .rotate_clockwise()
                .rotate_clockwise();
            assert_eq!(cycled, angle);
        }
    }

    #[test]
    fn sideways_and_radians() {
        let quarter = RotationAngle::ZERO.rotate_clockwise();
        assert!(quarter.is_sideways());
        assert!(quarter.is_rotated());
        assert_abs_diff_eq!(quarter.radians(), std::f32::consts::FRAC_PI_2, epsilon = 1e-6);
        assert!(!RotationAngle::new(180).is_sideways());
    }
}
