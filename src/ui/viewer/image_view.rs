// SPDX-License-Identifier: MPL-2.0
//! Image viewer sub-component: zoom, pan, rotate and reset.
//!
//! The rendered transform is `translate(position) scale(zoom) rotate(rotation)`
//! around the image center: the pan offset is not scaled, and rotation pivots
//! on the image center.

use crate::ui::state::{DragState, RotationAngle, ZoomFactor};
use iced::{Point, Vector};

/// Zoom, pan offset and rotation of the open image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageTransform {
    pub zoom: ZoomFactor,
    pub position: Vector,
    pub rotation: RotationAngle,
}

impl ImageTransform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        zoom: ZoomFactor::IDENTITY,
        position: Vector::ZERO,
        rotation: RotationAngle::ZERO,
    };

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Maps a point given relative to the image center to its on-screen
    /// offset from the viewer center.
    #[must_use]
    pub fn apply(&self, point: Vector) -> Vector {
        let (sin, cos) = self.rotation.radians().sin_cos();
        let rotated = Vector::new(point.x * cos - point.y * sin, point.x * sin + point.y * cos);
        let zoom = self.zoom.value();
        Vector::new(
            self.position.x + rotated.x * zoom,
            self.position.y + rotated.y * zoom,
        )
    }
}

impl Default for ImageTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Image viewer sub-component state.
#[derive(Debug, Clone, Default)]
pub struct State {
    transform: ImageTransform,
    drag: DragState,
}

/// Messages for the image viewer sub-component.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    ZoomIn,
    ZoomOut,
    Rotate,
    Reset,
    DragStart(Point),
    DragMove(Point),
    DragEnd,
}

/// Effects produced by image viewer changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    TransformChanged,
}

impl State {
    pub fn handle(&mut self, msg: Message) -> Effect {
        let before = self.transform;
        match msg {
            Message::ZoomIn => self.transform.zoom = self.transform.zoom.zoom_in(),
            Message::ZoomOut => self.transform.zoom = self.transform.zoom.zoom_out(),
            Message::Rotate => self.transform.rotation = self.transform.rotation.rotate_clockwise(),
            Message::Reset => {
                self.transform = ImageTransform::IDENTITY;
                self.drag.stop();
            }
            Message::DragStart(pointer) => {
                if self.transform.zoom.allows_pan() {
                    self.drag.start(pointer, self.transform.position);
                }
            }
            Message::DragMove(pointer) => {
                if let Some(position) = self.drag.position_for(pointer) {
                    self.transform.position = position;
                }
            }
            Message::DragEnd => self.drag.stop(),
        }
        if self.transform == before {
            Effect::None
        } else {
            Effect::TransformChanged
        }
    }

    #[must_use]
    pub fn transform(&self) -> ImageTransform {
        self.transform
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Zoom percentage, shown in the toolbar when not 100 %.
    #[must_use]
    pub fn zoom_percent(&self) -> u32 {
        self.transform.zoom.percent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_ZOOM, MIN_ZOOM};
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn zoom_in_then_out_returns_to_identity() {
        let mut state = State::default();
        assert_eq!(state.handle(Message::ZoomIn), Effect::TransformChanged);
        assert_abs_diff_eq!(state.transform().zoom.value(), 1.2, epsilon = 1e-6);
        state.handle(Message::ZoomOut);
        assert_abs_diff_eq!(state.transform().zoom.value(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn zoom_is_bounded_and_saturates_without_effect() {
        let mut state = State::default();
        for _ in 0..20 {
            state.handle(Message::ZoomIn);
        }
        assert_abs_diff_eq!(state.transform().zoom.value(), MAX_ZOOM);
        assert_eq!(state.handle(Message::ZoomIn), Effect::None);

        for _ in 0..40 {
            state.handle(Message::ZoomOut);
        }
        assert_abs_diff_eq!(state.transform().zoom.value(), MIN_ZOOM);
    }

    #[test]
    fn rotate_four_times_is_identity() {
        let mut state = State::default();
        for _ in 0..4 {
            state.handle(Message::Rotate);
        }
        assert_eq!(state.transform().rotation, RotationAngle::ZERO);
    }

    #[test]
    fn drag_is_ignored_at_identity_zoom() {
        let mut state = State::default();
        state.handle(Message::DragStart(Point::new(10.0, 10.0)));
        assert!(!state.is_dragging());
        assert_eq!(state.handle(Message::DragMove(Point::new(50.0, 50.0))), Effect::None);
        assert_eq!(state.transform().position, Vector::ZERO);
    }

    #[test]
    fn drag_pans_when_zoomed() {
        let mut state = State::default();
        state.handle(Message::ZoomIn);
        state.handle(Message::DragStart(Point::new(100.0, 100.0)));
        state.handle(Message::DragMove(Point::new(130.0, 80.0)));
        assert_eq!(state.transform().position, Vector::new(30.0, -20.0));

        state.handle(Message::DragEnd);
        state.handle(Message::DragStart(Point::new(0.0, 0.0)));
        state.handle(Message::DragMove(Point::new(10.0, 10.0)));
        assert_eq!(state.transform().position, Vector::new(40.0, -10.0));
    }

    #[test]
    fn reset_restores_identity_and_stops_drag() {
        let mut state = State::default();
        state.handle(Message::ZoomIn);
        state.handle(Message::Rotate);
        state.handle(Message::DragStart(Point::new(0.0, 0.0)));
        state.handle(Message::DragMove(Point::new(5.0, 5.0)));

        state.handle(Message::Reset);
        assert!(state.transform().is_identity());
        assert!(!state.is_dragging());
    }

    #[test]
    fn translation_is_not_scaled_and_rotation_pivots_on_center() {
        let transform = ImageTransform {
            zoom: ZoomFactor::new(2.0),
            position: Vector::new(10.0, 0.0),
            rotation: RotationAngle::new(90),
        };
        let mapped = transform.apply(Vector::new(5.0, 0.0));
        assert_abs_diff_eq!(mapped.x, 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(mapped.y, 10.0, epsilon = 1e-4);
        assert_eq!(ImageTransform::IDENTITY.apply(Vector::new(3.0, 4.0)), Vector::new(3.0, 4.0));
    }
}
