// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::domain::{FolderMedia, MemoryFolder};
use crate::media::ImageData;
use crate::ui::comments;
use crate::ui::notifications;
use crate::ui::viewer::{grid, lightbox};
use iced::window;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
///
/// Failed async results carry the i18n key of the message to show.
#[derive(Debug, Clone)]
pub enum Message {
    Grid(grid::Message),
    Lightbox(lightbox::Message),
    Comments(comments::Message),
    Notification(notifications::NotificationMessage),
    FolderLoaded(Result<MemoryFolder, &'static str>),
    MediaLoaded(Result<Vec<FolderMedia>, &'static str>),
    /// New view count, or `None` when the increment failed.
    ViewCounted(Option<u64>),
    ImageLoaded {
        url: String,
        result: Result<ImageData, &'static str>,
    },
    /// Download finished; `Ok` carries the saved file name.
    DownloadFinished(Result<String, &'static str>),
    /// Reload the gallery from the not-found screen.
    Retry,
    /// The window was resized; its mode may have changed.
    WindowResized(window::Id),
    WindowModeChanged(window::Mode),
    Tick(Instant),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Folder short code or public viewer URL.
    pub code: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `MEMORIES_BED_CONFIG_DIR`.
    pub config_dir: Option<String>,
}
