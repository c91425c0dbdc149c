// SPDX-License-Identifier: MPL-2.0
//! Filter bar and thumbnail grid rendering.

use super::grid::{Message, State};
use crate::domain::{MediaFilter, MediaItem};
use crate::i18n::fluent::I18n;
use crate::media::{delivery, CachedImage, ImageCache};
use crate::ui::design_tokens::{radius, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, image, Column, Container, Row, Stack, Text};
use iced::{alignment, ContentFit, Element, Length};

/// Thumbnails per row of the grid.
pub const COLUMNS: usize = 4;

/// Filter buttons with item counts.
pub fn filter_bar<'a>(state: &'a State, i18n: &'a I18n) -> Element<'a, Message> {
    let buttons = MediaFilter::ALL.into_iter().map(|filter| {
        let label = format!("{} ({})", i18n.tr(filter.i18n_key()), state.count(filter));
        let style = if filter == state.filter() {
            styles::button::selected
        } else {
            styles::button::unselected
        };
        button(Text::new(label).size(typography::BODY))
            .padding([spacing::XS, spacing::MD])
            .style(style)
            .on_press(Message::FilterChanged(filter))
            .into()
    });
    Row::with_children(buttons).spacing(spacing::XS).into()
}

/// Thumbnail grid, or the empty state when the filter keeps nothing.
pub fn grid<'a>(state: &'a State, images: &'a ImageCache, i18n: &'a I18n) -> Element<'a, Message> {
    if state.is_empty() {
        return empty_state(state.filter(), i18n);
    }

    let visible: Vec<&MediaItem> = state.visible().collect();
    let rows = visible.chunks(COLUMNS).enumerate().map(|(row, chunk)| {
        let cells = chunk.iter().enumerate().map(|(column, item)| {
            thumbnail(item, row * COLUMNS + column, images, i18n)
        });
        Row::with_children(cells).spacing(spacing::SM).into()
    });

    Column::with_children(rows).spacing(spacing::SM).into()
}

fn thumbnail<'a>(
    item: &'a MediaItem,
    index: usize,
    images: &'a ImageCache,
    i18n: &'a I18n,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match images.peek(&delivery::grid_image_url(item)) {
        Some(CachedImage::Ready(data)) => image(data.handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .into(),
        other => {
            let key = if matches!(other, Some(CachedImage::Failed)) {
                "gallery-thumbnail-error"
            } else {
                "gallery-thumbnail-loading"
            };
            Container::new(Text::new(i18n.tr(key)).size(typography::CAPTION))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .style(styles::container::placeholder)
                .into()
        }
    };

    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(picture);
    if item.is_video() {
        layers = layers.push(
            Container::new(
                Container::new(Text::new("▶").size(typography::TITLE_MD))
                    .padding([spacing::XXS, spacing::SM])
                    .style(styles::overlay::indicator(radius::FULL)),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center),
        );
    }

    button(layers)
        .width(Length::Fixed(sizing::THUMBNAIL_WIDTH))
        .height(Length::Fixed(sizing::THUMBNAIL_HEIGHT))
        .padding(0)
        .style(styles::button::thumbnail)
        .on_press(Message::Select(index))
        .into()
}

fn empty_state<'a>(filter: MediaFilter, i18n: &'a I18n) -> Element<'a, Message> {
    let key = match filter {
        MediaFilter::All => "gallery-empty",
        MediaFilter::Images => "gallery-empty-images",
        MediaFilter::Videos => "gallery-empty-videos",
    };
    Container::new(Text::new(i18n.tr(key)).size(typography::BODY_LG))
        .width(Length::Fill)
        .padding(spacing::XXL)
        .align_x(alignment::Horizontal::Center)
        .into()
}
