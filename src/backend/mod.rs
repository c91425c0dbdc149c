// SPDX-License-Identifier: MPL-2.0
//! Persistence port for public galleries.
//!
//! This module defines the [`GalleryStore`] trait: the read-mostly operations
//! the public viewer needs from the hosted record store. Adapters:
//!
//! - [`supabase::SupabaseStore`]: PostgREST over HTTP
//! - [`memory::InMemoryStore`]: in-process store for tests and benchmarks
//!
//! # Design Notes
//!
//! - Futures are boxed and `'static` so the Iced runtime can drive them via
//!   `Task::perform` while the store itself stays behind an `Arc`.
//! - The view counter is a read-modify-write with last-write-wins semantics.

pub mod memory;
pub mod supabase;

use crate::domain::{Comment, CommentDraft, FolderMedia, MemoryFolder, ShortCode};
use futures_util::future::BoxFuture;
use thiserror::Error;

/// Errors reported by a [`GalleryStore`].
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no folder matches this code")]
    NotFound,

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("backend URL or key is not configured")]
    MissingCredentials,

    #[error("comments are disabled for this folder")]
    CommentsDisabled,
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Port for the hosted record store behind public galleries.
///
/// # Thread Safety
///
/// Implementations are shared through `Arc<dyn GalleryStore>` and must be
/// `Send + Sync`.
pub trait GalleryStore: Send + Sync {
    /// Looks a folder up by code, falling back to legacy memories.
    ///
    /// # Errors
    ///
    /// [`BackendError::NotFound`] when neither table has the code.
    fn fetch_folder(&self, code: &ShortCode) -> BoxFuture<'static, BackendResult<MemoryFolder>>;

    /// Media rows of a folder, ordered by `order_index`.
    fn fetch_media(&self, folder: &MemoryFolder) -> BoxFuture<'static, BackendResult<Vec<FolderMedia>>>;

    /// Writes `view_count + 1` and returns the new value.
    fn increment_view_count(&self, folder: &MemoryFolder) -> BoxFuture<'static, BackendResult<u64>>;

    /// Comments of a folder, newest first.
    fn fetch_comments(&self, folder: &MemoryFolder) -> BoxFuture<'static, BackendResult<Vec<Comment>>>;

    /// Inserts a comment and returns the stored row.
    ///
    /// # Errors
    ///
    /// [`BackendError::CommentsDisabled`] when the folder does not accept
    /// comments, [`BackendError::Decode`] when the draft is blank.
    fn add_comment(
        &self,
        folder: &MemoryFolder,
        draft: &CommentDraft,
    ) -> BoxFuture<'static, BackendResult<Comment>>;
}

/// Checks a draft against the folder settings before it is sent.
pub(crate) fn validate_comment(
    folder: &MemoryFolder,
    draft: &CommentDraft,
) -> BackendResult<(String, String)> {
    if !folder.allow_comments {
        return Err(BackendError::CommentsDisabled);
    }
    draft
        .validated()
        .ok_or_else(|| BackendError::Decode("name and comment are required".to_string()))
}
