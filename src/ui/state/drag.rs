// SPDX-License-Identifier: MPL-2.0
//! Drag state for panning a magnified image.

use iced::{Point, Vector};

/// Grab-and-drag state.
///
/// On start, the pointer offset relative to the current pan position is
/// recorded; while dragging, the new position is `pointer - offset`. Panning
/// is unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    /// Pointer minus pan position at drag start. `Some` while dragging.
    grab_offset: Option<Vector>,
}

impl DragState {
    /// Starts a drag at `pointer` over an image currently panned by `position`.
    pub fn start(&mut self, pointer: Point, position: Vector) {
        self.grab_offset = Some(Vector::new(pointer.x - position.x, pointer.y - position.y));
    }

    /// Returns the pan position for `pointer`, or `None` when not dragging.
    #[must_use]
    pub fn position_for(&self, pointer: Point) -> Option<Vector> {
        self.grab_offset
            .map(|offset| Vector::new(pointer.x - offset.x, pointer.y - offset.y))
    }

    pub fn stop(&mut self) {
        self.grab_offset = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.grab_offset.is_some()
    }
}
