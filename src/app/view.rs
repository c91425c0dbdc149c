// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! The gallery screen stacks, bottom to top: the scrollable page (header,
//! filter bar, grid, comments), the lightbox when open, and the toasts.

use super::{Gallery, Message, Screen};
use crate::i18n::fluent::I18n;
use crate::media::ImageCache;
use crate::ui::comments;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::{self, Toast};
use crate::ui::styles;
use crate::ui::viewer::{grid_view, lightbox, lightbox_view};
use iced::widget::{button, qr_code, scrollable, Column, Container, Row, Stack, Text};
use iced::{alignment, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub screen: Screen,
    pub gallery: Option<&'a Gallery>,
    pub lightbox: &'a lightbox::State,
    pub images: &'a ImageCache,
    pub notifications: &'a notifications::Manager,
}

/// Renders the current screen with the toast overlay on top.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut layers = Stack::new().width(Length::Fill).height(Length::Fill);

    match (ctx.screen, ctx.gallery) {
        (Screen::Gallery, Some(gallery)) => {
            layers = layers.push(view_gallery(gallery, ctx.images, ctx.i18n));
            let overlay = lightbox_view::view(
                ctx.lightbox,
                lightbox_view::ViewContext {
                    i18n: ctx.i18n,
                    images: ctx.images,
                    allow_downloads: gallery.folder.allow_downloads,
                },
            );
            if let Some(overlay) = overlay {
                layers = layers.push(overlay.map(Message::Lightbox));
            }
        }
        (Screen::NotFound(key), _) => layers = layers.push(view_not_found(key, ctx.i18n)),
        _ => layers = layers.push(centered(Text::new(ctx.i18n.tr("gallery-loading")).size(typography::TITLE_SM))),
    }

    if ctx.notifications.has_notifications() {
        layers = layers.push(Toast::view_overlay(ctx.notifications, ctx.i18n).map(Message::Notification));
    }
    layers.into()
}

fn centered<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

fn view_not_found<'a>(key: &'static str, i18n: &'a I18n) -> Element<'a, Message> {
    let mut content = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new(i18n.tr("gallery-not-found-title")).size(typography::TITLE_LG))
        .push(Text::new(i18n.tr(key)).size(typography::BODY_LG));

    // A bad or missing code will not get better on retry.
    if !matches!(key, "error-invalid-code" | "error-missing-code") {
        content = content.push(
            button(Text::new(i18n.tr("gallery-retry")))
                .padding([spacing::XS, spacing::MD])
                .style(styles::button::primary)
                .on_press(Message::Retry),
        );
    }
    centered(content)
}

fn view_gallery<'a>(gallery: &'a Gallery, images: &'a ImageCache, i18n: &'a I18n) -> Element<'a, Message> {
    let mut page = Column::new()
        .spacing(spacing::LG)
        .max_width(sizing::CONTENT_MAX_WIDTH)
        .push(header(gallery, i18n))
        .push(grid_view::filter_bar(&gallery.grid, i18n).map(Message::Grid))
        .push(grid_view::grid(&gallery.grid, images, i18n).map(Message::Grid));

    if gallery.comments.is_enabled() {
        page = page.push(comments::view(&gallery.comments, i18n).map(Message::Comments));
    }

    scrollable(
        Container::new(page)
            .width(Length::Fill)
            .padding(spacing::XL)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn header<'a>(gallery: &'a Gallery, i18n: &'a I18n) -> Element<'a, Message> {
    let folder = &gallery.folder;

    let mut details = Column::new()
        .spacing(spacing::XS)
        .push(Text::new(folder.title.as_str()).size(typography::TITLE_LG));
    if let Some(description) = folder.description.as_deref().filter(|d| !d.trim().is_empty()) {
        details = details.push(Text::new(description).size(typography::BODY_LG));
    }

    let date = folder.created_at.format("%Y-%m-%d").to_string();
    let facts = Row::new()
        .spacing(spacing::MD)
        .push(Text::new(i18n.tr_with_args("gallery-created", &[("date", &date)])).size(typography::BODY_SM))
        .push(Text::new(format!("#{}", folder.code)).size(typography::BODY_SM))
        .push(
            Text::new(i18n.tr_with_args("gallery-views", &[("count", &folder.view_count.to_string())]))
                .size(typography::BODY_SM),
        )
        .push(
            Text::new(i18n.tr_with_args(
                "gallery-items",
                &[("count", &gallery.grid.items().len().to_string())],
            ))
            .size(typography::BODY_SM),
        );
    details = details.push(facts);

    let mut row = Row::new()
        .spacing(spacing::LG)
        .align_y(alignment::Vertical::Center)
        .push(Container::new(details).width(Length::Fill));

    if let Some(data) = &gallery.qr {
        let share = Column::new()
            .spacing(spacing::XXS)
            .align_x(alignment::Horizontal::Center)
            .push(
                Container::new(qr_code(data).cell_size(sizing::QR_CELL))
                    .padding(spacing::XS)
                    .style(styles::container::qr_frame),
            )
            .push(Text::new(i18n.tr("gallery-scan-to-share")).size(typography::CAPTION))
            .push(Text::new(gallery.public_url.as_str()).size(typography::CAPTION));
        row = row.push(share);
    }

    Container::new(row)
        .width(Length::Fill)
        .padding(spacing::LG)
        .style(styles::container::card)
        .into()
}
