// SPDX-License-Identifier: MPL-2.0
//! Screen enumeration for application navigation.

/// Screens the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Folder, media or first images are being fetched.
    Loading,
    /// No gallery could be shown; carries the i18n key of the reason.
    NotFound(&'static str),
    Gallery,
}
