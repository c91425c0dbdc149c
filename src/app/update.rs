// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Sub-components report `Effect`s; the handlers here turn them into tasks
//! and keep the shared state (gallery, image cache, toasts) consistent.

use super::{Gallery, Message, Screen};
use crate::backend::GalleryStore;
use crate::config::{defaults, Config};
use crate::domain::{folder, FolderMedia, MediaItem, MemoryFolder, ShortCode};
use crate::error::Error;
use crate::media::{self, delivery, download, ImageCache, ImageData};
use crate::ui::comments;
use crate::ui::notifications::{self, Notification};
use crate::ui::viewer::{grid, lightbox};
use iced::{window, Task};
use std::sync::Arc;
use std::time::Duration;

/// How long a download failure stays on screen.
const DOWNLOAD_ERROR_TOAST: Duration = Duration::from_secs(5);

/// Mutable view of the application state handed to the handlers.
pub struct UpdateContext<'a> {
    pub config: &'a Config,
    pub client: &'a reqwest::Client,
    pub store: Option<&'a Arc<dyn GalleryStore>>,
    pub code: Option<&'a ShortCode>,
    pub screen: &'a mut Screen,
    pub pending_folder: &'a mut Option<MemoryFolder>,
    pub gallery: &'a mut Option<Gallery>,
    pub lightbox: &'a mut lightbox::State,
    pub images: &'a mut ImageCache,
    pub notifications: &'a mut notifications::Manager,
    pub fullscreen: &'a mut bool,
}

/// Maps an error to the i18n key carried by result messages.
fn error_key(err: impl Into<Error>) -> &'static str {
    err.into().i18n_key()
}

/// Starts (or restarts) fetching the folder for the current code.
pub fn load_gallery(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let Some(code) = ctx.code else {
        *ctx.screen = Screen::NotFound("error-missing-code");
        return Task::none();
    };
    let Some(store) = ctx.store else {
        *ctx.screen = Screen::NotFound("error-backend-credentials");
        return Task::none();
    };

    tracing::info!(code = code.as_str(), "loading gallery");
    *ctx.screen = Screen::Loading;
    *ctx.pending_folder = None;
    Task::perform(store.fetch_folder(code), |result| {
        Message::FolderLoaded(result.map_err(error_key))
    })
}

pub fn handle_folder_loaded(
    ctx: &mut UpdateContext<'_>,
    result: Result<MemoryFolder, &'static str>,
) -> Task<Message> {
    let folder = match result {
        Ok(folder) => folder,
        Err(key) => {
            tracing::warn!(key, "gallery folder could not be loaded");
            *ctx.screen = Screen::NotFound(key);
            if key != "error-gallery-not-found" {
                ctx.notifications.push(Notification::error(key));
            }
            return Task::none();
        }
    };
    let Some(store) = ctx.store else {
        return Task::none();
    };

    tracing::info!(folder = %folder.id, source = ?folder.source, "folder found");
    let media = Task::perform(store.fetch_media(&folder), |result| {
        Message::MediaLoaded(result.map_err(error_key))
    });
    // Fire-and-forget: a failed increment is only logged.
    let views = Task::perform(store.increment_view_count(&folder), |result| match result {
        Ok(count) => Message::ViewCounted(Some(count)),
        Err(err) => {
            tracing::warn!(%err, "view counter not updated");
            Message::ViewCounted(None)
        }
    });
    *ctx.pending_folder = Some(folder);
    Task::batch([media, views])
}

pub fn handle_media_loaded(
    ctx: &mut UpdateContext<'_>,
    result: Result<Vec<FolderMedia>, &'static str>,
) -> Task<Message> {
    let Some(folder) = ctx.pending_folder.take() else {
        return Task::none();
    };
    let rows = match result {
        Ok(rows) => rows,
        Err(key) => {
            tracing::warn!(key, folder = %folder.id, "gallery media could not be loaded");
            *ctx.screen = Screen::NotFound(key);
            ctx.notifications.push(Notification::error(key));
            return Task::none();
        }
    };

    let items = folder::media_items(rows);
    tracing::info!(count = items.len(), "gallery media loaded");

    // Room for a thumbnail and a lightbox image per item.
    *ctx.images = ImageCache::new((items.len() * 2).max(defaults::IMAGE_CACHE_CAPACITY));
    let thumbnails: Vec<String> = items.iter().map(delivery::grid_image_url).collect();

    let comments = match ctx.store {
        Some(store) if folder.allow_comments => {
            Task::perform(store.fetch_comments(&folder), |result| {
                Message::Comments(comments::Message::Loaded(result.map_err(error_key)))
            })
        }
        _ => Task::none(),
    };

    ctx.lightbox.handle(lightbox::Message::Close);
    *ctx.gallery = Some(Gallery::new(
        folder,
        grid::State::new(items),
        &ctx.config.sharing.public_base_url,
    ));
    *ctx.screen = Screen::Gallery;

    let fetches = thumbnails
        .into_iter()
        .map(|url| request_image(ctx.images, ctx.client, url));
    Task::batch(std::iter::once(comments).chain(fetches))
}

pub fn handle_view_counted(ctx: &mut UpdateContext<'_>, count: Option<u64>) {
    let Some(count) = count else {
        return;
    };
    if let Some(folder) = ctx.pending_folder.as_mut() {
        folder.view_count = count;
    } else if let Some(gallery) = ctx.gallery.as_mut() {
        gallery.folder.view_count = count;
    }
}

/// Starts fetching `url` unless it is already cached or in flight.
fn request_image(images: &mut ImageCache, client: &reqwest::Client, url: String) -> Task<Message> {
    if !images.begin_load(&url) {
        return Task::none();
    }
    let fetch = media::image::fetch(client.clone(), url.clone());
    Task::perform(fetch, move |result| Message::ImageLoaded {
        url,
        result: result.map_err(|err| err.i18n_key()),
    })
}

pub fn handle_image_loaded(
    ctx: &mut UpdateContext<'_>,
    url: String,
    result: Result<ImageData, &'static str>,
) {
    match result {
        Ok(data) => ctx.images.finish_load(url, Some(data)),
        Err(key) => {
            tracing::warn!(%url, key, "image could not be loaded");
            ctx.images.finish_load(url, None);
        }
    }
}

pub fn handle_grid_message(ctx: &mut UpdateContext<'_>, message: grid::Message) -> Task<Message> {
    let Some(gallery) = ctx.gallery.as_mut() else {
        return Task::none();
    };
    match gallery.grid.handle(message) {
        grid::Effect::None => Task::none(),
        grid::Effect::FilterChanged(_) => {
            // The open snapshot no longer matches the visible items.
            ctx.lightbox.handle(lightbox::Message::Close);
            let missing: Vec<String> = gallery.grid.visible().map(delivery::grid_image_url).collect();
            Task::batch(
                missing
                    .into_iter()
                    .map(|url| request_image(ctx.images, ctx.client, url)),
            )
        }
        grid::Effect::Open { items, index } => {
            handle_lightbox_message(ctx, lightbox::Message::Open { items, index })
        }
    }
}

pub fn handle_lightbox_message(
    ctx: &mut UpdateContext<'_>,
    message: lightbox::Message,
) -> Task<Message> {
    match ctx.lightbox.handle(message) {
        lightbox::Effect::None | lightbox::Effect::Changed => Task::none(),
        lightbox::Effect::Opened(index) => prefetch_around(ctx, index),
        lightbox::Effect::Closed => {
            if *ctx.fullscreen {
                set_window_mode(false)
            } else {
                Task::none()
            }
        }
        lightbox::Effect::RequestFullscreen(fullscreen) => set_window_mode(fullscreen),
        lightbox::Effect::Download(item) => start_download(ctx, &item),
    }
}

/// Fetches the lightbox image of `index` and of its neighbours.
fn prefetch_around(ctx: &mut UpdateContext<'_>, index: usize) -> Task<Message> {
    let items = ctx.lightbox.items();
    let len = items.len();
    if len == 0 {
        return Task::none();
    }
    let mut targets = vec![index];
    if len > 1 {
        targets.push((index + 1) % len);
        targets.push((index + len - 1) % len);
    }
    targets.dedup();
    let urls: Vec<String> = targets
        .into_iter()
        .filter_map(|position| items.get(position))
        .map(delivery::lightbox_image_url)
        .collect();
    Task::batch(
        urls.into_iter()
            .map(|url| request_image(ctx.images, ctx.client, url)),
    )
}

/// Requests a window mode, then reads back the mode actually applied.
fn set_window_mode(fullscreen: bool) -> Task<Message> {
    let mode = if fullscreen {
        window::Mode::Fullscreen
    } else {
        window::Mode::Windowed
    };
    window::latest()
        .and_then(move |id| window::set_mode::<window::Mode>(id, mode).chain(window::mode(id)))
        .map(Message::WindowModeChanged)
}

pub fn handle_window_mode(ctx: &mut UpdateContext<'_>, mode: window::Mode) -> Task<Message> {
    let fullscreen = mode == window::Mode::Fullscreen;
    if *ctx.fullscreen != fullscreen {
        tracing::debug!(fullscreen, "window mode changed");
    }
    *ctx.fullscreen = fullscreen;
    handle_lightbox_message(ctx, lightbox::Message::FullscreenChanged(fullscreen))
}

/// Plans the download of the open lightbox item; failures are reported
/// as a toast.
pub fn download_request(
    ctx: &mut UpdateContext<'_>,
    item: &MediaItem,
) -> Option<download::DownloadRequest> {
    let gallery = ctx.gallery.as_ref()?;
    let Some(dir) = ctx.config.download_dir() else {
        ctx.notifications.push(download_error("error-download"));
        return None;
    };
    // Same position as the lightbox counter, within the filtered items.
    let index = ctx.lightbox.current_index().unwrap_or_default();
    match download::DownloadRequest::for_item(&gallery.folder, item, index, &dir) {
        Ok(request) => Some(request),
        Err(err) => {
            tracing::warn!(%err, "download refused");
            ctx.notifications.push(download_error(err.i18n_key()));
            None
        }
    }
}

fn start_download(ctx: &mut UpdateContext<'_>, item: &MediaItem) -> Task<Message> {
    let Some(request) = download_request(ctx, item) else {
        return Task::none();
    };

    let name = request
        .destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    tracing::info!(url = %request.url, %name, "download started");
    Task::perform(
        download::download_to(ctx.client.clone(), request),
        move |result| match result {
            Ok(_) => Message::DownloadFinished(Ok(name)),
            Err(err) => {
                tracing::error!(%err, "download failed");
                Message::DownloadFinished(Err(err.i18n_key()))
            }
        },
    )
}

pub fn handle_download_finished(ctx: &mut UpdateContext<'_>, result: Result<String, &'static str>) {
    let notification = match result {
        Ok(name) => Notification::success("notification-download-success").with_arg("name", name),
        Err(key) => download_error(key),
    };
    ctx.notifications.push(notification);
}

/// Download problems leave the viewer untouched; their toast goes away
/// on its own.
fn download_error(key: &'static str) -> Notification {
    Notification::error(key).auto_dismiss(DOWNLOAD_ERROR_TOAST)
}

pub fn handle_comments_message(
    ctx: &mut UpdateContext<'_>,
    message: comments::Message,
) -> Task<Message> {
    let Some(gallery) = ctx.gallery.as_mut() else {
        return Task::none();
    };
    match gallery.comments.handle(message) {
        comments::Effect::None => Task::none(),
        comments::Effect::Post(draft) => {
            let Some(store) = ctx.store else {
                return Task::none();
            };
            Task::perform(store.add_comment(&gallery.folder, &draft), |result| {
                Message::Comments(comments::Message::Posted(result.map_err(error_key)))
            })
        }
        comments::Effect::Posted => {
            ctx.notifications
                .push(Notification::success("notification-comment-posted"));
            Task::none()
        }
        comments::Effect::Failed(key) => {
            tracing::warn!(key, "comments request failed");
            ctx.notifications.push(Notification::error(key));
            Task::none()
        }
    }
}
