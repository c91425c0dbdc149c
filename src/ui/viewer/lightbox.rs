// SPDX-License-Identifier: MPL-2.0
//! Lightbox controller.
//!
//! The lightbox is either closed or open on one index of a snapshot of the
//! filtered gallery items. Every transition into an item builds a fresh
//! [`ItemViewer`]; the previous viewer (image transform, playback element,
//! controls timer) is dropped, so nothing leaks from one item to the next.
//!
//! Navigation wraps around in both directions and is a no-op for galleries
//! of one item or fewer.
//!
//! Video elements come from an [`ElementFactory`]; the default one streams
//! the item URL through the FFmpeg decoder.

use super::{image_view, swipe, video_transport};
use crate::domain::MediaItem;
use crate::media::PlaybackElement;
use crate::ui::state::{OverlayTimeout, Volume};
use crate::video_player::DecoderElement;
use std::time::Instant;

/// Builds the playable element for a video item.
pub type ElementFactory = fn(&MediaItem) -> Box<dyn PlaybackElement>;

/// Streams the item's URL through the FFmpeg decoder.
#[must_use]
pub fn decoder_element(item: &MediaItem) -> Box<dyn PlaybackElement> {
    Box::new(DecoderElement::open(item.url.clone()))
}

/// Viewer settings applied to every opened video.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Settings {
    pub overlay_timeout: OverlayTimeout,
    pub default_volume: Volume,
}

/// Per-item viewer, rebuilt on every open.
#[derive(Debug)]
pub enum ItemViewer {
    Image(image_view::State),
    Video(video_transport::State),
}

impl ItemViewer {
    fn for_item(
        item: &MediaItem,
        settings: Settings,
        elements: ElementFactory,
        is_fullscreen: bool,
    ) -> Self {
        if item.is_video() {
            let (state, effect) = video_transport::State::new(
                elements(item),
                settings.default_volume,
                settings.overlay_timeout,
                is_fullscreen,
            );
            if let video_transport::Effect::LoadFailed(message) = effect {
                tracing::debug!(item = %item.id, %message, "video opened in degraded mode");
            }
            Self::Video(state)
        } else {
            Self::Image(image_view::State::default())
        }
    }

    #[must_use]
    pub fn as_image(&self) -> Option<&image_view::State> {
        match self {
            Self::Image(state) => Some(state),
            Self::Video(_) => None,
        }
    }

    #[must_use]
    pub fn as_video(&self) -> Option<&video_transport::State> {
        match self {
            Self::Video(state) => Some(state),
            Self::Image(_) => None,
        }
    }
}

/// Keys bound while the lightbox is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKey {
    ArrowLeft,
    ArrowRight,
    Escape,
}

/// Lightbox controller state.
#[derive(Debug)]
pub struct State {
    items: Vec<MediaItem>,
    current: Option<usize>,
    viewer: Option<ItemViewer>,
    swipe: swipe::State,
    settings: Settings,
    elements: ElementFactory,
    is_fullscreen: bool,
}

impl Default for State {
    fn default() -> Self {
        Self::with_elements(Settings::default(), decoder_element)
    }
}

/// Messages for the lightbox controller.
#[derive(Debug, Clone)]
pub enum Message {
    /// Open `index` of the given filtered items.
    Open { items: Vec<MediaItem>, index: usize },
    Close,
    Next,
    Previous,
    /// Dot indicator activation.
    JumpTo(usize),
    /// Click on the backdrop outside the media frame.
    BackgroundClicked,
    Key(NavigationKey),
    Image(image_view::Message),
    Video(video_transport::Message),
    Swipe(swipe::Message),
    Download,
    /// Observed window mode.
    FullscreenChanged(bool),
    PointerMoved(Instant),
    Tick(Instant),
}

/// Effects produced by the lightbox controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Visible state changed.
    Changed,
    /// An item was opened (initially or by navigation).
    Opened(usize),
    Closed,
    RequestFullscreen(bool),
    /// Save the given item to disk.
    Download(MediaItem),
}

impl State {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self::with_elements(settings, decoder_element)
    }

    /// Lightbox whose videos are played by elements from `elements`.
    #[must_use]
    pub fn with_elements(settings: Settings, elements: ElementFactory) -> Self {
        Self {
            items: Vec::new(),
            current: None,
            viewer: None,
            swipe: swipe::State::default(),
            settings,
            elements,
            is_fullscreen: false,
        }
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Open { items, index } => {
                if index >= items.len() {
                    tracing::debug!(index, len = items.len(), "ignoring open out of range");
                    return Effect::None;
                }
                self.items = items;
                self.open(index)
            }
            Message::Close => self.close(),
            Message::Next => self.step(1),
            Message::Previous => self.step(-1),
            Message::JumpTo(index) => match self.current {
                Some(current) if current != index && index < self.items.len() => self.open(index),
                _ => Effect::None,
            },
            Message::BackgroundClicked => {
                if self.current.is_none() || self.is_dragging() {
                    Effect::None
                } else {
                    self.close()
                }
            }
            Message::Key(key) => {
                if self.current.is_none() {
                    return Effect::None;
                }
                match key {
                    NavigationKey::ArrowLeft => self.step(-1),
                    NavigationKey::ArrowRight => self.step(1),
                    NavigationKey::Escape => self.close(),
                }
            }
            Message::Image(msg) => match &mut self.viewer {
                Some(ItemViewer::Image(state)) => match state.handle(msg) {
                    image_view::Effect::TransformChanged => Effect::Changed,
                    image_view::Effect::None => Effect::None,
                },
                _ => Effect::None,
            },
            Message::Video(msg) => self.handle_video(msg),
            Message::Swipe(msg) => {
                if self.current.is_none() {
                    return Effect::None;
                }
                match self.swipe.handle(msg) {
                    swipe::Effect::Navigate(swipe::Direction::Next) => self.step(1),
                    swipe::Effect::Navigate(swipe::Direction::Previous) => self.step(-1),
                    swipe::Effect::Dragging { .. } | swipe::Effect::Cancel => Effect::Changed,
                    swipe::Effect::None => Effect::None,
                }
            }
            Message::Download => match self.current_item() {
                Some(item) => Effect::Download(item.clone()),
                None => Effect::None,
            },
            Message::FullscreenChanged(fullscreen) => {
                self.is_fullscreen = fullscreen;
                self.handle_video(video_transport::Message::FullscreenChanged(fullscreen))
            }
            Message::PointerMoved(now) => {
                self.handle_video(video_transport::Message::PointerMoved(now))
            }
            Message::Tick(now) => self.handle_video(video_transport::Message::Tick(now)),
        }
    }

    fn handle_video(&mut self, msg: video_transport::Message) -> Effect {
        let Some(ItemViewer::Video(state)) = &mut self.viewer else {
            return Effect::None;
        };
        match state.handle(msg) {
            video_transport::Effect::None => Effect::None,
            video_transport::Effect::RequestFullscreen(fullscreen) => {
                Effect::RequestFullscreen(fullscreen)
            }
            video_transport::Effect::StateChanged
            | video_transport::Effect::Ended
            | video_transport::Effect::LoadFailed(_) => Effect::Changed,
        }
    }

    fn open(&mut self, index: usize) -> Effect {
        let Some(item) = self.items.get(index) else {
            return Effect::None;
        };
        tracing::debug!(index, item = %item.id, kind = ?item.kind, "lightbox open");
        self.viewer = Some(ItemViewer::for_item(
            item,
            self.settings,
            self.elements,
            self.is_fullscreen,
        ));
        self.swipe = swipe::State::default();
        self.current = Some(index);
        Effect::Opened(index)
    }

    fn close(&mut self) -> Effect {
        if self.current.is_none() {
            return Effect::None;
        }
        tracing::debug!("lightbox closed");
        self.current = None;
        self.viewer = None;
        self.swipe = swipe::State::default();
        self.items.clear();
        Effect::Closed
    }

    fn step(&mut self, delta: isize) -> Effect {
        let Some(current) = self.current else {
            return Effect::None;
        };
        let len = self.items.len();
        if len <= 1 {
            return Effect::None;
        }
        let target = (current as isize + delta).rem_euclid(len as isize) as usize;
        self.open(target)
    }

    fn is_dragging(&self) -> bool {
        self.swipe.is_dragging()
            || matches!(&self.viewer, Some(ItemViewer::Image(state)) if state.is_dragging())
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    #[must_use]
    pub fn current_item(&self) -> Option<&MediaItem> {
        self.current.and_then(|index| self.items.get(index))
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Previous/next controls are enabled.
    #[must_use]
    pub fn can_navigate(&self) -> bool {
        self.is_open() && self.items.len() > 1
    }

    #[must_use]
    pub fn viewer(&self) -> Option<&ItemViewer> {
        self.viewer.as_ref()
    }

    #[must_use]
    pub fn swipe(&self) -> &swipe::State {
        &self.swipe
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// True while the open viewer needs clock ticks.
    #[must_use]
    pub fn needs_ticks(&self) -> bool {
        matches!(&self.viewer, Some(ItemViewer::Video(state)) if state.needs_ticks())
    }

    /// True while the open video is playing or loading, so pictures need
    /// to be picked up at frame rate.
    #[must_use]
    pub fn needs_frame_ticks(&self) -> bool {
        matches!(&self.viewer, Some(ItemViewer::Video(state)) if state.needs_frame_ticks())
    }
}
