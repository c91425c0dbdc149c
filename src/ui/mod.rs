// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern.
//!
//! - [`viewer`]: gallery grid, lightbox, image and video viewers
//! - [`comments`]: visitor comments section
//! - [`notifications`]: toast notifications
//! - [`state`]: clamped value objects (zoom, rotation, volume, drag)
//! - [`styles`] and [`design_tokens`]: visual constants and widget styles

pub mod comments;
pub mod design_tokens;
pub mod notifications;
pub mod state;
pub mod styles;
pub mod viewer;
