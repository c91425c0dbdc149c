// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native events are routed according to whether the lightbox is open:
//! keyboard navigation and pointer activity only reach it while it is shown.
//! Window resizes are always forwarded so the fullscreen flag follows the
//! real window mode.

use super::Message;
use crate::ui::viewer::lightbox::{self, NavigationKey};
use iced::keyboard::{self, key};
use iced::{event, mouse, time, window, Event, Subscription};
use std::time::{Duration, Instant};

/// Interval of the tick driving auto-hide and toast expiry.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Interval of the tick picking up decoded video frames.
pub const FRAME_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Creates the event subscription for the current lightbox state.
pub fn create_event_subscription(lightbox_open: bool) -> Subscription<Message> {
    if lightbox_open {
        event::listen_with(|event, status, window_id| {
            if let Event::Window(window::Event::Resized(_)) = &event {
                return Some(Message::WindowResized(window_id));
            }

            match &event {
                Event::Mouse(mouse::Event::CursorMoved { .. }) => Some(Message::Lightbox(
                    lightbox::Message::PointerMoved(Instant::now()),
                )),
                Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => match status {
                    event::Status::Ignored => navigation_key(key)
                        .map(|key| Message::Lightbox(lightbox::Message::Key(key))),
                    event::Status::Captured => None,
                },
                _ => None,
            }
        })
    } else {
        event::listen_with(|event, _status, window_id| match event {
            Event::Window(window::Event::Resized(_)) => Some(Message::WindowResized(window_id)),
            _ => None,
        })
    }
}

fn navigation_key(key: &keyboard::Key) -> Option<NavigationKey> {
    match key {
        keyboard::Key::Named(key::Named::ArrowLeft) => Some(NavigationKey::ArrowLeft),
        keyboard::Key::Named(key::Named::ArrowRight) => Some(NavigationKey::ArrowRight),
        keyboard::Key::Named(key::Named::Escape) => Some(NavigationKey::Escape),
        _ => None,
    }
}

/// What the periodic tick has to keep up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickDemand {
    /// A video is playing or loading.
    pub frames: bool,
    /// Controls auto-hide or toast expiry is pending.
    pub timers: bool,
}

/// Tick interval for `demand`, or `None` when nothing is pending.
#[must_use]
pub fn tick_interval(demand: TickDemand) -> Option<Duration> {
    if demand.frames {
        Some(FRAME_TICK_INTERVAL)
    } else if demand.timers {
        Some(TICK_INTERVAL)
    } else {
        None
    }
}

/// Creates a periodic tick subscription while something time-based is
/// pending.
pub fn create_tick_subscription(demand: TickDemand) -> Subscription<Message> {
    match tick_interval(demand) {
        Some(interval) => time::every(interval).map(Message::Tick),
        None => Subscription::none(),
    }
}
