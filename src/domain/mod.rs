// SPDX-License-Identifier: MPL-2.0
//! Domain layer - gallery records and value objects.
//!
//! Types here carry no presentation or transport dependencies beyond `serde`
//! derives used to read backend rows.
//!
//! # Modules
//!
//! - [`media`]: [`MediaItem`], [`MediaKind`] and the gallery [`MediaFilter`]
//! - [`folder`]: [`MemoryFolder`], [`FolderMedia`] rows and visitor [`Comment`]s
//! - [`short_code`]: the six character [`ShortCode`] addressing a folder

pub mod folder;
pub mod media;
pub mod short_code;

pub use folder::{Comment, CommentDraft, FolderMedia, FolderSource, MemoryFolder};
pub use media::{MediaFilter, MediaItem, MediaKind};
pub use short_code::ShortCode;
