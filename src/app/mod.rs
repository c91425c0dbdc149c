// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! `App` wires the gallery grid, the lightbox, the comments section and the
//! toasts together, and turns their effects into `Task`s: backend calls,
//! image fetches, downloads and window mode changes.

mod message;
mod screen;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};
pub use screen::Screen;

use crate::backend::supabase::SupabaseStore;
use crate::backend::GalleryStore;
use crate::config::{self, defaults, Config};
use crate::domain::{MemoryFolder, ShortCode};
use crate::i18n::fluent::I18n;
use crate::media::ImageCache;
use crate::ui::comments;
use crate::ui::notifications;
use crate::ui::state::{OverlayTimeout, Volume};
use crate::ui::viewer::{grid, lightbox};
use iced::widget::qr_code;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::sync::Arc;

pub const WINDOW_DEFAULT_WIDTH: f32 = 1200.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 800.0;
pub const MIN_WINDOW_WIDTH: f32 = 640.0;
pub const MIN_WINDOW_HEIGHT: f32 = 480.0;

/// A loaded public gallery.
pub struct Gallery {
    pub folder: MemoryFolder,
    pub grid: grid::State,
    pub comments: comments::State,
    pub public_url: String,
    /// Encoded public URL, `None` if it could not be encoded.
    pub qr: Option<qr_code::Data>,
}

impl fmt::Debug for Gallery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gallery")
            .field("code", &self.folder.code)
            .field("items", &self.grid.items().len())
            .field("public_url", &self.public_url)
            .finish()
    }
}

impl Gallery {
    fn new(folder: MemoryFolder, grid: grid::State, public_base_url: &str) -> Self {
        let public_url = ShortCode::from_code_or_url(&folder.code)
            .map(|code| code.public_url(public_base_url))
            .unwrap_or_default();
        let qr = match qr_code::Data::new(public_url.as_bytes()) {
            Ok(data) => Some(data),
            Err(err) => {
                tracing::warn!(%err, "could not encode QR code");
                None
            }
        };
        Self {
            comments: comments::State::new(folder.allow_comments),
            folder,
            grid,
            public_url,
            qr,
        }
    }
}

/// Root Iced application state.
pub struct App {
    i18n: I18n,
    config: Config,
    client: reqwest::Client,
    store: Option<Arc<dyn GalleryStore>>,
    code: Option<ShortCode>,
    screen: Screen,
    /// Folder fetched while its media are still loading.
    pending_folder: Option<MemoryFolder>,
    gallery: Option<Gallery>,
    lightbox: lightbox::State,
    images: ImageCache,
    notifications: notifications::Manager,
    fullscreen: bool,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("code", &self.code)
            .field("gallery", &self.gallery)
            .field("lightbox_open", &self.lightbox.is_open())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot closure; the flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Lightbox settings from the `[viewer]` section.
#[must_use]
pub fn viewer_settings(config: &Config) -> lightbox::Settings {
    lightbox::Settings {
        overlay_timeout: OverlayTimeout::from_config(config.viewer.overlay_timeout_secs),
        default_volume: Volume::from_config(config.viewer.default_volume),
    }
}

impl App {
    /// Loads the config, resolves the folder code and starts fetching the
    /// gallery.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) =
            config::load_with_override(flags.config_dir.as_ref().map(std::path::PathBuf::from));
        let i18n = I18n::new(flags.lang.clone(), &config);
        let client = reqwest::Client::new();

        let store: Option<Arc<dyn GalleryStore>> =
            match SupabaseStore::from_config(client.clone(), &config) {
                Ok(store) => Some(Arc::new(store)),
                Err(err) => {
                    tracing::error!(%err, "backend is not configured");
                    None
                }
            };

        let code = match flags.code.as_deref().map(ShortCode::from_code_or_url) {
            Some(Ok(code)) => Ok(code),
            Some(Err(err)) => Err(err.i18n_key()),
            None => Err("error-missing-code"),
        };

        let (mut app, task) = Self::with_store(config, i18n, client, store, code);
        if let Some(key) = config_warning {
            app.notifications
                .push(notifications::Notification::warning(key));
        }
        (app, task)
    }

    /// Builds the application around an explicit store.
    pub fn with_store(
        config: Config,
        i18n: I18n,
        client: reqwest::Client,
        store: Option<Arc<dyn GalleryStore>>,
        code: Result<ShortCode, &'static str>,
    ) -> (Self, Task<Message>) {
        let mut app = App {
            i18n,
            lightbox: lightbox::State::new(viewer_settings(&config)),
            config,
            client,
            store,
            code: None,
            screen: Screen::Loading,
            pending_folder: None,
            gallery: None,
            images: ImageCache::new(defaults::IMAGE_CACHE_CAPACITY),
            notifications: notifications::Manager::new(),
            fullscreen: false,
        };

        let task = match code {
            Ok(code) => {
                app.code = Some(code);
                update::load_gallery(&mut app.update_context())
            }
            Err(key) => {
                app.screen = Screen::NotFound(key);
                Task::none()
            }
        };
        (app, task)
    }

    fn update_context(&mut self) -> update::UpdateContext<'_> {
        update::UpdateContext {
            config: &self.config,
            client: &self.client,
            store: self.store.as_ref(),
            code: self.code.as_ref(),
            screen: &mut self.screen,
            pending_folder: &mut self.pending_folder,
            gallery: &mut self.gallery,
            lightbox: &mut self.lightbox,
            images: &mut self.images,
            notifications: &mut self.notifications,
            fullscreen: &mut self.fullscreen,
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match &self.gallery {
            Some(gallery) => format!("{} - {app_name}", gallery.folder.title),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        let event_sub = subscription::create_event_subscription(self.lightbox.is_open());
        let tick_sub = subscription::create_tick_subscription(subscription::TickDemand {
            frames: self.lightbox.needs_frame_ticks(),
            timers: self.lightbox.needs_ticks() || self.notifications.has_pending_expiry(),
        });
        Subscription::batch([event_sub, tick_sub])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = self.update_context();
        match message {
            Message::Grid(msg) => update::handle_grid_message(&mut ctx, msg),
            Message::Lightbox(msg) => update::handle_lightbox_message(&mut ctx, msg),
            Message::Comments(msg) => update::handle_comments_message(&mut ctx, msg),
            Message::Notification(msg) => {
                ctx.notifications.handle_message(&msg);
                Task::none()
            }
            Message::FolderLoaded(result) => update::handle_folder_loaded(&mut ctx, result),
            Message::MediaLoaded(result) => update::handle_media_loaded(&mut ctx, result),
            Message::ViewCounted(count) => {
                update::handle_view_counted(&mut ctx, count);
                Task::none()
            }
            Message::ImageLoaded { url, result } => {
                update::handle_image_loaded(&mut ctx, url, result);
                Task::none()
            }
            Message::DownloadFinished(result) => {
                update::handle_download_finished(&mut ctx, result);
                Task::none()
            }
            Message::Retry => update::load_gallery(&mut ctx),
            Message::WindowResized(id) => window::mode(id).map(Message::WindowModeChanged),
            Message::WindowModeChanged(mode) => update::handle_window_mode(&mut ctx, mode),
            Message::Tick(now) => {
                ctx.notifications.tick(now);
                update::handle_lightbox_message(&mut ctx, lightbox::Message::Tick(now))
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            screen: self.screen,
            gallery: self.gallery.as_ref(),
            lightbox: &self.lightbox,
            images: &self.images,
            notifications: &self.notifications,
        })
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn gallery(&self) -> Option<&Gallery> {
        self.gallery.as_ref()
    }

    #[must_use]
    pub fn lightbox(&self) -> &lightbox::State {
        &self.lightbox
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }

    /// Feeds a message through the update loop and returns the follow-up task.
    pub fn dispatch(&mut self, message: Message) -> Task<Message> {
        self.update(message)
    }
}
