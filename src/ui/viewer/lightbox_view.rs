// SPDX-License-Identifier: MPL-2.0
//! Lightbox overlay rendering.
//!
//! Layers, bottom to top: backdrop, media canvas, side navigation, top bar
//! (counter, download, close) and bottom bar (image toolbar or video
//! transport, then dot indicators).

use super::lightbox::{self, ItemViewer, Message};
use super::media_canvas::{Content, MediaCanvas};
use super::video_transport::{self, format_time};
use super::{image_view, swipe};
use crate::domain::MediaItem;
use crate::i18n::fluent::I18n;
use crate::media::{delivery, CachedImage, ImageCache};
use crate::ui::design_tokens::{opacity, radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, canvas, container, slider, Column, Container, Row, Space, Stack, Text};
use iced::{alignment, Element, Length, Size};

/// Above this many items the dots are replaced by the counter alone.
pub const MAX_DOT_INDICATORS: usize = 24;

pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub images: &'a ImageCache,
    pub allow_downloads: bool,
}

/// Renders the open lightbox; `None` while closed.
pub fn view<'a>(state: &'a lightbox::State, ctx: ViewContext<'a>) -> Option<Element<'a, Message>> {
    let index = state.current_index()?;
    let item = state.current_item()?;
    let viewer = state.viewer()?;

    let backdrop = Container::new(Space::new())
        .width(Length::Fill)
        .height(Length::Fill)
        .style(styles::container::backdrop);

    let media = canvas(media_canvas(item, viewer, state.swipe(), &ctx))
        .width(Length::Fill)
        .height(Length::Fill);

    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(backdrop)
        .push(media);

    if state.can_navigate() {
        layers = layers.push(side_navigation());
    }
    layers = layers.push(top_bar(index, state.len(), &ctx));

    let mut bottom = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center);
    match viewer {
        ItemViewer::Image(image) => bottom = bottom.push(image_toolbar(image, ctx.i18n)),
        ItemViewer::Video(video) => {
            if video.controls_visible() {
                bottom = bottom.push(transport_bar(video, ctx.i18n));
            }
        }
    }
    if state.can_navigate() && state.len() <= MAX_DOT_INDICATORS {
        bottom = bottom.push(dot_indicators(index, state.len()));
    }
    layers = layers.push(
        Container::new(bottom)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Bottom)
            .padding(spacing::LG),
    );

    Some(layers.into())
}

fn media_canvas(
    item: &MediaItem,
    viewer: &ItemViewer,
    swipe: &swipe::State,
    ctx: &ViewContext<'_>,
) -> MediaCanvas {
    let url = delivery::lightbox_image_url(item);
    let (handle, size, image_status) = match ctx.images.peek(&url) {
        Some(CachedImage::Ready(data)) => (
            Some(data.handle.clone()),
            Some(Size::new(data.width as f32, data.height as f32)),
            None,
        ),
        Some(CachedImage::Failed) => (None, None, Some("lightbox-image-error")),
        Some(CachedImage::Loading) | None => (None, None, Some("lightbox-loading")),
    };

    let (content, status) = match viewer {
        ItemViewer::Image(image) => (
            Content::Image {
                handle,
                size,
                transform: image.transform(),
                dragging: image.is_dragging(),
            },
            image_status,
        ),
        ItemViewer::Video(video) => {
            let (picture, size) = match video.frame() {
                Some(frame) => (
                    Some(frame.handle.clone()),
                    Some(Size::new(frame.width as f32, frame.height as f32)),
                ),
                None => (handle, size),
            };
            (
                Content::Video {
                    picture,
                    size,
                    playing: video.playback().is_playing,
                },
                video.load_error().map(|_| "lightbox-video-error"),
            )
        }
    };

    MediaCanvas {
        content,
        swipe_offset: swipe.offset(),
        opacity: swipe.opacity(),
        touch_active: swipe.is_active(),
        status: status.map(|key| ctx.i18n.tr(key)),
    }
}

fn overlay_button<'a>(label: &'a str, message: Option<Message>) -> button::Button<'a, Message> {
    button(
        Text::new(label)
            .size(typography::BODY_LG)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center),
    )
    .padding([spacing::XS, spacing::SM])
    .style(styles::button::overlay(opacity::OVERLAY_MEDIUM, opacity::OVERLAY_HOVER))
    .on_press_maybe(message)
}

fn side_navigation<'a>() -> Element<'a, Message> {
    let nav = |label: &'a str, message: Message| {
        button(
            Text::new(label)
                .size(typography::TITLE_MD)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center),
        )
        .width(Length::Fixed(sizing::NAV_BUTTON))
        .height(Length::Fixed(sizing::NAV_BUTTON))
        .style(styles::button::overlay(opacity::OVERLAY_MEDIUM, opacity::OVERLAY_HOVER))
        .on_press(message)
    };

    Container::new(
        Row::new()
            .align_y(alignment::Vertical::Center)
            .push(nav("‹", Message::Previous))
            .push(Space::new().width(Length::Fill))
            .push(nav("›", Message::Next)),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_y(alignment::Vertical::Center)
    .padding(spacing::MD)
    .into()
}

fn top_bar<'a>(index: usize, len: usize, ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let counter = Container::new(
        Text::new(ctx.i18n.tr_with_args(
            "lightbox-counter",
            &[
                ("current", &(index + 1).to_string()),
                ("total", &len.to_string()),
            ],
        ))
        .size(typography::BODY),
    )
    .padding([spacing::XXS, spacing::SM])
    .style(styles::overlay::indicator(radius::FULL));

    let mut row = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(counter)
        .push(Space::new().width(Length::Fill));

    if ctx.allow_downloads {
        row = row.push(
            button(Text::new(ctx.i18n.tr("lightbox-download")).size(typography::BODY))
                .padding([spacing::XS, spacing::SM])
                .style(styles::button::overlay(opacity::OVERLAY_MEDIUM, opacity::OVERLAY_HOVER))
                .on_press(Message::Download),
        );
    }
    row = row.push(overlay_button("✕", Some(Message::Close)));

    Container::new(row)
        .width(Length::Fill)
        .padding(spacing::MD)
        .into()
}

fn image_toolbar<'a>(image: &image_view::State, i18n: &'a I18n) -> Element<'a, Message> {
    let transform = image.transform();
    let zoom = transform.zoom;
    let action = |label: &'a str, msg: image_view::Message, enabled: bool| {
        overlay_button(label, enabled.then_some(Message::Image(msg)))
    };

    let mut row = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(action("−", image_view::Message::ZoomOut, !zoom.is_min()))
        .push(action("+", image_view::Message::ZoomIn, !zoom.is_max()))
        .push(action("⟳", image_view::Message::Rotate, true))
        .push(
            button(Text::new(i18n.tr("lightbox-reset")).size(typography::BODY))
                .padding([spacing::XS, spacing::SM])
                .style(styles::button::overlay(opacity::OVERLAY_MEDIUM, opacity::OVERLAY_HOVER))
                .on_press_maybe(
                    (!transform.is_identity()).then_some(Message::Image(image_view::Message::Reset)),
                ),
        );

    if !zoom.is_identity() {
        row = row.push(
            Container::new(Text::new(format!("{}%", image.zoom_percent())).size(typography::BODY_SM))
                .padding([spacing::XXS, spacing::XS])
                .style(styles::overlay::indicator(radius::FULL)),
        );
    }

    Container::new(row)
        .padding(spacing::XS)
        .style(styles::overlay::controls_bar)
        .into()
}

fn transport_bar<'a>(video: &video_transport::State, i18n: &'a I18n) -> Element<'a, Message> {
    let playback = *video.playback();
    let seekable = playback.can_seek();
    let send = |msg: video_transport::Message| Message::Video(msg);

    let play_label = if playback.is_playing { "❚❚" } else { "▶" };
    let mute_label = if playback.is_muted || playback.volume.is_silent() {
        "🔇"
    } else {
        "🔊"
    };
    let fullscreen_label = if playback.is_fullscreen { "🗗" } else { "⛶" };

    let progress = slider(0.0..=1.0, playback.progress(), move |fraction| {
        send(video_transport::Message::SeekTo(fraction))
    })
    .step(0.001)
    .width(Length::Fill);

    let shown_volume = if playback.is_muted {
        0.0
    } else {
        playback.volume.value()
    };
    let volume = slider(0.0..=1.0, shown_volume, move |value| {
        send(video_transport::Message::SetVolume(value))
    })
    .step(0.01)
    .width(Length::Fixed(sizing::VOLUME_SLIDER_WIDTH));

    let time = Text::new(format!(
        "{} / {}",
        format_time(playback.current_time),
        format_time(playback.duration)
    ))
    .size(typography::CAPTION);

    let row = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(overlay_button(play_label, seekable.then_some(send(video_transport::Message::TogglePlay))))
        .push(overlay_button(
            "−10",
            seekable.then_some(send(video_transport::Message::SkipBackward)),
        ))
        .push(overlay_button(
            "+10",
            seekable.then_some(send(video_transport::Message::SkipForward)),
        ))
        .push(time)
        .push(progress)
        .push(overlay_button(mute_label, Some(send(video_transport::Message::ToggleMute))))
        .push(volume)
        .push(overlay_button(
            fullscreen_label,
            Some(send(video_transport::Message::ToggleFullscreen)),
        ));

    let mut column = Column::new().spacing(spacing::XXS).push(row);
    if let Some(_error) = video.load_error() {
        column = column.push(
            Text::new(i18n.tr("lightbox-video-error")).size(typography::CAPTION),
        );
    }

    Container::new(column)
        .width(Length::Fixed(sizing::CONTENT_MAX_WIDTH * 0.7))
        .padding([spacing::XS, spacing::SM])
        .style(styles::overlay::controls_bar)
        .into()
}

fn dot_indicators<'a>(current: usize, len: usize) -> Element<'a, Message> {
    let dots = (0..len).map(|index| {
        let style = if index == current {
            styles::button::selected
        } else {
            styles::button::unselected
        };
        button(Space::new())
            .width(Length::Fixed(sizing::DOT))
            .height(Length::Fixed(sizing::DOT))
            .padding(0)
            .style(style)
            .on_press(Message::JumpTo(index))
            .into()
    });
    container(Row::with_children(dots).spacing(spacing::XS))
        .padding(spacing::XXS)
        .into()
}
