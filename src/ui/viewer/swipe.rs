// SPDX-License-Identifier: MPL-2.0
//! Touch swipe recognizer for lightbox navigation.
//!
//! A gesture lives from touch start to touch end. Movement counts as a
//! horizontal drag once the horizontal distance dominates the vertical one
//! and exceeds the dead zone; the live offset then drives the drag feedback.
//! On release, a horizontal-dominant movement longer than the minimum swipe
//! distance navigates (swiping left goes to the next item), anything else
//! snaps back. All state is discarded after resolution.

use crate::config::{SWIPE_DEAD_ZONE_PX, SWIPE_FADE_DISTANCE_PX, SWIPE_MIN_DISTANCE_PX};
use iced::Point;

/// Navigation direction requested by a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Per-gesture state.
#[derive(Debug, Clone, Default)]
pub struct State {
    start: Option<Point>,
    current: Option<Point>,
    dragging: bool,
    offset: f32,
}

/// Raw touch input.
#[derive(Debug, Clone, Copy)]
pub enum Message {
    TouchStart(Point),
    TouchMove(Point),
    /// Touch lifted; `None` when the platform reports no final position.
    TouchEnd(Option<Point>),
    /// Touch lost (e.g. the window lost focus).
    TouchCancel,
}

/// Outcome of a touch event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    /// Horizontal drag in progress; default scrolling should be suppressed.
    Dragging { offset: f32 },
    Navigate(Direction),
    /// Released without a swipe; feedback offset returns to zero.
    Cancel,
}

impl State {
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::TouchStart(point) => {
                *self = Self {
                    start: Some(point),
                    ..Self::default()
                };
                Effect::None
            }
            Message::TouchMove(point) => {
                let Some(start) = self.start else {
                    return Effect::None;
                };
                self.current = Some(point);
                let delta_x = point.x - start.x;
                let delta_y = (point.y - start.y).abs();
                if !self.dragging && is_horizontal(delta_x, delta_y, SWIPE_DEAD_ZONE_PX) {
                    self.dragging = true;
                }
                if self.dragging {
                    self.offset = delta_x;
                    Effect::Dragging { offset: delta_x }
                } else {
                    Effect::None
                }
            }
            Message::TouchEnd(point) => {
                let Some(start) = self.start else {
                    *self = Self::default();
                    return Effect::None;
                };
                let end = point.or(self.current).unwrap_or(start);
                *self = Self::default();

                let delta_x = start.x - end.x;
                let delta_y = (end.y - start.y).abs();
                if is_horizontal(delta_x, delta_y, SWIPE_MIN_DISTANCE_PX) {
                    if delta_x > 0.0 {
                        Effect::Navigate(Direction::Next)
                    } else {
                        Effect::Navigate(Direction::Previous)
                    }
                } else {
                    Effect::Cancel
                }
            }
            Message::TouchCancel => {
                let was_active = self.start.is_some();
                *self = Self::default();
                if was_active {
                    Effect::Cancel
                } else {
                    Effect::None
                }
            }
        }
    }

    /// True once the current gesture has been classified as a horizontal drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// True while a finger is down.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Horizontal feedback offset of the dragged media.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Opacity of the dragged media: fades out linearly with the offset.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        (1.0 - self.offset.abs() / SWIPE_FADE_DISTANCE_PX).clamp(0.0, 1.0)
    }
}

fn is_horizontal(delta_x: f32, delta_y: f32, threshold: f32) -> bool {
    delta_x.abs() > delta_y && delta_x.abs() > threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    fn gesture(dx: f32, dy: f32) -> Effect {
        let mut state = State::default();
        let start = Point::new(200.0, 300.0);
        let end = Point::new(start.x + dx, start.y + dy);
        state.handle(Message::TouchStart(start));
        state.handle(Message::TouchMove(end));
        state.handle(Message::TouchEnd(Some(end)))
    }

    #[test]
    fn leftward_swipe_goes_next() {
        assert_eq!(gesture(-60.0, 5.0), Effect::Navigate(Direction::Next));
    }

    #[test]
    fn rightward_swipe_goes_previous() {
        assert_eq!(gesture(60.0, -5.0), Effect::Navigate(Direction::Previous));
    }

    #[test]
    fn vertical_dominant_movement_cancels() {
        assert_eq!(gesture(-60.0, 80.0), Effect::Cancel);
    }

    #[test]
    fn short_swipe_cancels_in_both_directions() {
        assert_eq!(gesture(-30.0, 0.0), Effect::Cancel);
        assert_eq!(gesture(30.0, 0.0), Effect::Cancel);
    }

    #[test]
    fn dead_zone_delays_drag_classification() {
        let mut state = State::default();
        state.handle(Message::TouchStart(Point::new(0.0, 0.0)));
        assert_eq!(state.handle(Message::TouchMove(Point::new(8.0, 0.0))), Effect::None);
        assert!(!state.is_dragging());

        assert_eq!(
            state.handle(Message::TouchMove(Point::new(-25.0, 3.0))),
            Effect::Dragging { offset: -25.0 }
        );
        assert!(state.is_dragging());
        assert_abs_diff_eq!(state.offset(), -25.0);
    }

    #[test]
    fn diagonal_jitter_is_not_a_drag() {
        let mut state = State::default();
        state.handle(Message::TouchStart(Point::new(0.0, 0.0)));
        assert_eq!(state.handle(Message::TouchMove(Point::new(15.0, 20.0))), Effect::None);
        assert!(!state.is_dragging());
    }

    #[test]
    fn state_is_cleared_after_resolution() {
        let mut state = State::default();
        state.handle(Message::TouchStart(Point::new(0.0, 0.0)));
        state.handle(Message::TouchMove(Point::new(-100.0, 0.0)));
        state.handle(Message::TouchEnd(None));
        assert!(!state.is_active());
        assert!(!state.is_dragging());
        assert_abs_diff_eq!(state.offset(), 0.0);

        // A lone end without start resolves to nothing.
        assert_eq!(state.handle(Message::TouchEnd(Some(Point::new(0.0, 0.0)))), Effect::None);
    }

    #[test]
    fn end_without_position_uses_last_move() {
        let mut state = State::default();
        state.handle(Message::TouchStart(Point::new(100.0, 0.0)));
        state.handle(Message::TouchMove(Point::new(20.0, 0.0)));
        assert_eq!(
            state.handle(Message::TouchEnd(None)),
            Effect::Navigate(Direction::Next)
        );
    }

    #[test]
    fn cancel_discards_gesture() {
        let mut state = State::default();
        state.handle(Message::TouchStart(Point::new(0.0, 0.0)));
        state.handle(Message::TouchMove(Point::new(-80.0, 0.0)));
        assert_eq!(state.handle(Message::TouchCancel), Effect::Cancel);
        assert!(!state.is_active());
        assert_eq!(state.handle(Message::TouchCancel), Effect::None);
    }

    #[test]
    fn opacity_fades_with_offset() {
        let mut state = State::default();
        assert_abs_diff_eq!(state.opacity(), 1.0);
        state.handle(Message::TouchStart(Point::new(0.0, 0.0)));
        state.handle(Message::TouchMove(Point::new(-150.0, 0.0)));
        assert_abs_diff_eq!(state.opacity(), 0.5);
        state.handle(Message::TouchMove(Point::new(-900.0, 0.0)));
        assert_abs_diff_eq!(state.opacity(), 0.0);
    }
}
