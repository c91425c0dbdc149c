// SPDX-License-Identifier: MPL-2.0
//! Canvas program drawing the open lightbox item.
//!
//! The image is fitted inside the canvas, then drawn with
//! `translate(center + position + swipe offset) scale(zoom) rotate(rotation)`.
//! While a swipe is in progress the media fades towards the backdrop.
//!
//! Input handled here:
//! - left press inside the media frame starts a pan (images) or toggles
//!   playback (videos); outside it counts as a backdrop click
//! - cursor moves feed the pan while dragging
//! - a finger pressed inside the canvas starts a swipe; later finger events
//!   of that gesture go to the swipe recognizer

use super::image_view::{self, ImageTransform};
use super::lightbox::Message;
use super::{swipe, video_transport};
use crate::ui::design_tokens::{palette, spacing, typography};
use iced::widget::canvas::{self, Frame, Geometry, Path, Program, Text};
use iced::widget::{image, Action};
use iced::{alignment, mouse, touch, Color, Event, Point, Rectangle, Renderer, Size, Theme, Vector};

/// Share of the canvas used for media whose size is not known yet.
const PLACEHOLDER_FILL: f32 = 0.6;

/// What the canvas shows.
#[derive(Debug, Clone)]
pub enum Content {
    Image {
        handle: Option<image::Handle>,
        size: Option<Size>,
        transform: ImageTransform,
        dragging: bool,
    },
    /// A video shows its latest decoded frame, or its poster until the
    /// first frame arrives.
    Video {
        picture: Option<image::Handle>,
        size: Option<Size>,
        playing: bool,
    },
}

/// Canvas program for one lightbox item.
#[derive(Debug, Clone)]
pub struct MediaCanvas {
    pub content: Content,
    pub swipe_offset: f32,
    pub opacity: f32,
    /// A swipe started on this canvas is in progress.
    pub touch_active: bool,
    /// Label drawn when nothing can be shown (loading, failed).
    pub status: Option<String>,
}

impl MediaCanvas {
    fn transform(&self) -> ImageTransform {
        match &self.content {
            Content::Image { transform, .. } => *transform,
            Content::Video { .. } => ImageTransform::IDENTITY,
        }
    }

    fn media_size(&self) -> Option<Size> {
        match &self.content {
            Content::Image { size, .. } | Content::Video { size, .. } => *size,
        }
    }

    /// On-screen bounding box of the media inside `bounds` (local coordinates).
    #[must_use]
    pub fn frame_rect(&self, bounds: Size) -> Rectangle {
        media_frame(bounds, self.media_size(), self.transform(), self.swipe_offset)
    }
}

/// Size of `media` scaled down to fit inside `bounds`, never upscaled.
#[must_use]
pub fn fit_size(media: Size, bounds: Size) -> Size {
    if media.width <= 0.0 || media.height <= 0.0 {
        return Size::ZERO;
    }
    let scale = (bounds.width / media.width)
        .min(bounds.height / media.height)
        .min(1.0);
    Size::new(media.width * scale, media.height * scale)
}

/// Axis-aligned bounding box of the transformed media, relative to the
/// top-left corner of a canvas of size `bounds`.
#[must_use]
pub fn media_frame(
    bounds: Size,
    media: Option<Size>,
    transform: ImageTransform,
    swipe_offset: f32,
) -> Rectangle {
    let fitted = media.map_or(
        Size::new(bounds.width * PLACEHOLDER_FILL, bounds.height * PLACEHOLDER_FILL),
        |size| fit_size(size, bounds),
    );
    let zoom = transform.zoom.value();
    let (width, height) = if transform.rotation.is_sideways() {
        (fitted.height * zoom, fitted.width * zoom)
    } else {
        (fitted.width * zoom, fitted.height * zoom)
    };
    let center = Point::new(
        bounds.width / 2.0 + transform.position.x + swipe_offset,
        bounds.height / 2.0 + transform.position.y,
    );
    Rectangle::new(
        Point::new(center.x - width / 2.0, center.y - height / 2.0),
        Size::new(width, height),
    )
}

impl Program<Message> for MediaCanvas {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                let message = if self.frame_rect(bounds.size()).contains(position) {
                    match &self.content {
                        Content::Image { .. } => {
                            Message::Image(image_view::Message::DragStart(position))
                        }
                        Content::Video { .. } => {
                            Message::Video(video_transport::Message::TogglePlay)
                        }
                    }
                } else {
                    Message::BackgroundClicked
                };
                Some(Action::publish(message).and_capture())
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => match &self.content {
                Content::Image { dragging: true, .. } => {
                    let position = cursor.position_in(bounds)?;
                    Some(
                        Action::publish(Message::Image(image_view::Message::DragMove(position)))
                            .and_capture(),
                    )
                }
                _ => None,
            },
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
            | Event::Mouse(mouse::Event::CursorLeft) => match &self.content {
                Content::Image { dragging: true, .. } => {
                    Some(Action::publish(Message::Image(image_view::Message::DragEnd)))
                }
                _ => None,
            },
            Event::Touch(touch) => {
                let message = match touch {
                    touch::Event::FingerPressed { position, .. } => {
                        if !bounds.contains(*position) {
                            return None;
                        }
                        swipe::Message::TouchStart(*position)
                    }
                    _ if !self.touch_active => return None,
                    touch::Event::FingerMoved { position, .. } => {
                        swipe::Message::TouchMove(*position)
                    }
                    touch::Event::FingerLifted { position, .. } => {
                        swipe::Message::TouchEnd(Some(*position))
                    }
                    touch::Event::FingerLost { .. } => swipe::Message::TouchCancel,
                };
                Some(Action::publish(Message::Swipe(message)).and_capture())
            }
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let transform = self.transform();
        let handle = match &self.content {
            Content::Image { handle, .. } => handle.as_ref(),
            Content::Video { picture, .. } => picture.as_ref(),
        };

        match (handle, self.media_size()) {
            (Some(handle), Some(size)) => {
                let fitted = fit_size(size, bounds.size());
                let center = frame.center();
                frame.with_save(|frame| {
                    frame.translate(Vector::new(
                        center.x + transform.position.x + self.swipe_offset,
                        center.y + transform.position.y,
                    ));
                    frame.scale(transform.zoom.value());
                    frame.rotate(transform.rotation.radians());
                    frame.draw_image(
                        Rectangle::new(
                            Point::new(-fitted.width / 2.0, -fitted.height / 2.0),
                            fitted,
                        ),
                        canvas::Image::new(handle.clone()),
                    );
                });
            }
            _ => {
                let placeholder = self.frame_rect(bounds.size());
                frame.fill(
                    &Path::rectangle(placeholder.position(), placeholder.size()),
                    palette::GRAY_900,
                );
            }
        }

        if let Content::Video { playing: false, .. } = &self.content {
            let rect = self.frame_rect(bounds.size());
            draw_play_badge(&mut frame, rect.center());
        }

        if let Some(status) = &self.status {
            frame.fill_text(Text {
                content: status.clone(),
                position: frame.center(),
                color: palette::GRAY_200,
                size: typography::BODY_LG.into(),
                align_x: alignment::Horizontal::Center.into(),
                align_y: alignment::Vertical::Center,
                ..Text::default()
            });
        }

        if self.opacity < 1.0 {
            frame.fill_rectangle(
                Point::ORIGIN,
                bounds.size(),
                Color {
                    a: 1.0 - self.opacity.clamp(0.0, 1.0),
                    ..palette::BLACK
                },
            );
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };
        if !self.frame_rect(bounds.size()).contains(position) {
            return mouse::Interaction::default();
        }
        match &self.content {
            Content::Image { dragging: true, .. } => mouse::Interaction::Grabbing,
            Content::Image { transform, .. } if transform.zoom.allows_pan() => {
                mouse::Interaction::Grab
            }
            Content::Video { .. } => mouse::Interaction::Pointer,
            Content::Image { .. } => mouse::Interaction::default(),
        }
    }
}

fn draw_play_badge(frame: &mut Frame, center: Point) {
    let radius = spacing::XXL / 2.0 + spacing::XS;
    frame.fill(
        &Path::circle(center, radius),
        Color {
            a: 0.6,
            ..palette::BLACK
        },
    );
    let side = radius * 0.9;
    let triangle = Path::new(|builder| {
        builder.move_to(Point::new(center.x - side * 0.35, center.y - side * 0.5));
        builder.line_to(Point::new(center.x + side * 0.55, center.y));
        builder.line_to(Point::new(center.x - side * 0.35, center.y + side * 0.5));
        builder.close();
    });
    frame.fill(&triangle, palette::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use crate::ui::state::{RotationAngle, ZoomFactor};

    #[test]
    fn fit_never_upscales() {
        let fitted = fit_size(Size::new(200.0, 100.0), Size::new(800.0, 600.0));
        assert_eq!(fitted, Size::new(200.0, 100.0));
    }

    #[test]
    fn fit_keeps_aspect_ratio() {
        let fitted = fit_size(Size::new(4000.0, 3000.0), Size::new(800.0, 800.0));
        assert_abs_diff_eq!(fitted.width, 800.0);
        assert_abs_diff_eq!(fitted.height, 600.0);
    }

    #[test]
    fn frame_is_centered_at_identity() {
        let rect = media_frame(
            Size::new(1000.0, 800.0),
            Some(Size::new(400.0, 200.0)),
            ImageTransform::IDENTITY,
            0.0,
        );
        assert_eq!(rect, Rectangle::new(Point::new(300.0, 300.0), Size::new(400.0, 200.0)));
    }

    #[test]
    fn frame_follows_zoom_rotation_pan_and_swipe() {
        let transform = ImageTransform {
            zoom: ZoomFactor::new(2.0),
            position: Vector::new(10.0, -20.0),
            rotation: RotationAngle::new(90),
        };
        let rect = media_frame(
            Size::new(1000.0, 800.0),
            Some(Size::new(400.0, 200.0)),
            transform,
            -50.0,
        );
        assert_abs_diff_eq!(rect.width, 400.0);
        assert_abs_diff_eq!(rect.height, 800.0);
        assert_abs_diff_eq!(rect.center().x, 460.0);
        assert_abs_diff_eq!(rect.center().y, 380.0);
    }

    fn image_canvas(touch_active: bool) -> MediaCanvas {
        MediaCanvas {
            content: Content::Image {
                handle: None,
                size: Some(Size::new(400.0, 300.0)),
                transform: ImageTransform::IDENTITY,
                dragging: false,
            },
            swipe_offset: 0.0,
            opacity: 1.0,
            touch_active,
            status: None,
        }
    }

    fn finger(event: fn(touch::Finger, Point) -> touch::Event, x: f32, y: f32) -> Event {
        Event::Touch(event(touch::Finger(0), Point::new(x, y)))
    }

    fn pressed(id: touch::Finger, position: Point) -> touch::Event {
        touch::Event::FingerPressed { id, position }
    }

    fn moved(id: touch::Finger, position: Point) -> touch::Event {
        touch::Event::FingerMoved { id, position }
    }

    #[test]
    fn touches_outside_the_canvas_are_left_alone() {
        let canvas = image_canvas(false);
        let bounds = Rectangle::new(Point::new(100.0, 50.0), Size::new(800.0, 600.0));
        let cursor = mouse::Cursor::Unavailable;

        let outside = finger(pressed, 20.0, 20.0);
        assert!(canvas.update(&mut (), &outside, bounds, cursor).is_none());

        let inside = finger(pressed, 300.0, 200.0);
        assert!(canvas.update(&mut (), &inside, bounds, cursor).is_some());
    }

    #[test]
    fn finger_moves_need_a_gesture_started_here() {
        let bounds = Rectangle::new(Point::ORIGIN, Size::new(800.0, 600.0));
        let cursor = mouse::Cursor::Unavailable;
        let movement = finger(moved, 300.0, 200.0);

        let idle = image_canvas(false);
        assert!(idle.update(&mut (), &movement, bounds, cursor).is_none());

        let swiping = image_canvas(true);
        assert!(swiping.update(&mut (), &movement, bounds, cursor).is_some());
    }

    #[test]
    fn unknown_size_uses_placeholder_frame() {
        let rect = media_frame(Size::new(1000.0, 500.0), None, ImageTransform::IDENTITY, 0.0);
        assert_abs_diff_eq!(rect.width, 600.0);
        assert_abs_diff_eq!(rect.height, 300.0);
    }
}
