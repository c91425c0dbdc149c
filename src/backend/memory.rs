// SPDX-License-Identifier: MPL-2.0
//! In-process [`GalleryStore`] used by tests, benchmarks and offline demos.

use super::{validate_comment, BackendError, BackendResult, GalleryStore};
use crate::domain::folder::sort_newest_first;
use crate::domain::{Comment, CommentDraft, FolderMedia, FolderSource, MemoryFolder, ShortCode};
use chrono::Utc;
use futures_util::future::{self, BoxFuture};
use futures_util::FutureExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Tables {
    folders: Vec<MemoryFolder>,
    media: HashMap<String, Vec<FolderMedia>>,
    comments: HashMap<String, Vec<Comment>>,
    next_comment_id: u64,
}

/// Deterministic store backed by hash maps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a folder together with its media rows.
    pub fn insert_folder(&self, folder: MemoryFolder, media: Vec<FolderMedia>) {
        let mut tables = self.tables();
        tables.media.insert(folder.id.clone(), media);
        tables.folders.push(folder);
    }

    /// Adds an existing comment.
    pub fn insert_comment(&self, folder_id: &str, comment: Comment) {
        self.tables()
            .comments
            .entry(folder_id.to_string())
            .or_default()
            .push(comment);
    }

    /// Current stored view count of a folder.
    #[must_use]
    pub fn view_count(&self, folder_id: &str) -> Option<u64> {
        self.tables()
            .folders
            .iter()
            .find(|folder| folder.id == folder_id)
            .map(|folder| folder.view_count)
    }
}

impl GalleryStore for InMemoryStore {
    fn fetch_folder(&self, code: &ShortCode) -> BoxFuture<'static, BackendResult<MemoryFolder>> {
        let tables = self.tables();
        let lookup = |source: FolderSource| {
            tables
                .folders
                .iter()
                .find(|folder| folder.source == source && folder.code.eq_ignore_ascii_case(code.as_str()))
                .cloned()
        };
        let result = lookup(FolderSource::Folder)
            .or_else(|| lookup(FolderSource::LegacyMemory))
            .ok_or(BackendError::NotFound);
        future::ready(result).boxed()
    }

    fn fetch_media(&self, folder: &MemoryFolder) -> BoxFuture<'static, BackendResult<Vec<FolderMedia>>> {
        let mut rows = self.tables().media.get(&folder.id).cloned().unwrap_or_default();
        rows.sort_by_key(|row| row.order_index);
        future::ready(Ok(rows)).boxed()
    }

    fn increment_view_count(&self, folder: &MemoryFolder) -> BoxFuture<'static, BackendResult<u64>> {
        let next = folder.view_count + 1;
        let mut tables = self.tables();
        let result = match tables.folders.iter_mut().find(|f| f.id == folder.id) {
            Some(stored) => {
                stored.view_count = next;
                Ok(next)
            }
            None => Err(BackendError::NotFound),
        };
        future::ready(result).boxed()
    }

    fn fetch_comments(&self, folder: &MemoryFolder) -> BoxFuture<'static, BackendResult<Vec<Comment>>> {
        let mut comments = self
            .tables()
            .comments
            .get(&folder.id)
            .cloned()
            .unwrap_or_default();
        sort_newest_first(&mut comments);
        future::ready(Ok(comments)).boxed()
    }

    fn add_comment(
        &self,
        folder: &MemoryFolder,
        draft: &CommentDraft,
    ) -> BoxFuture<'static, BackendResult<Comment>> {
        let result = validate_comment(folder, draft).map(|(name, comment)| {
            let mut tables = self.tables();
            tables.next_comment_id += 1;
            let stored = Comment {
                id: format!("comment-{}", tables.next_comment_id),
                name,
                comment,
                created_at: Utc::now(),
            };
            tables
                .comments
                .entry(folder.id.clone())
                .or_default()
                .push(stored.clone());
            stored
        });
        future::ready(result).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaKind;

    fn folder(code: &str, source: FolderSource) -> MemoryFolder {
        MemoryFolder {
            id: format!("id-{code}"),
            code: code.to_string(),
            title: "Title".to_string(),
            description: None,
            created_at: Utc::now(),
            allow_comments: true,
            allow_downloads: false,
            thumbnail_url: None,
            qr_code_url: None,
            view_count: 7,
            source,
        }
    }

    #[tokio::test]
    async fn legacy_folder_is_found_when_no_folder_matches() {
        let store = InMemoryStore::new();
        store.insert_folder(folder("OLD001", FolderSource::LegacyMemory), Vec::new());
        let code = ShortCode::parse("old001").expect("valid code");

        let found = store.fetch_folder(&code).await.expect("folder");
        assert_eq!(found.source, FolderSource::LegacyMemory);
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let store = InMemoryStore::new();
        let code = ShortCode::parse("NOPE00").expect("valid code");
        assert!(matches!(
            store.fetch_folder(&code).await,
            Err(BackendError::NotFound)
        ));
    }

    #[tokio::test]
    async fn media_come_back_in_order() {
        let store = InMemoryStore::new();
        let f = folder("ABC123", FolderSource::Folder);
        let rows = (0..3)
            .rev()
            .map(|i| FolderMedia {
                id: format!("m{i}"),
                media_url: format!("https://cdn/{i}.jpg"),
                media_type: MediaKind::Image,
                order_index: i,
                file_name: None,
                file_size: None,
            })
            .collect();
        store.insert_folder(f.clone(), rows);

        let media = store.fetch_media(&f).await.expect("media");
        let ids: Vec<_> = media.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m0", "m1", "m2"]);
    }

    #[tokio::test]
    async fn view_count_is_incremented_once() {
        let store = InMemoryStore::new();
        let f = folder("ABC123", FolderSource::Folder);
        store.insert_folder(f.clone(), Vec::new());

        assert_eq!(store.increment_view_count(&f).await.expect("count"), 8);
        assert_eq!(store.view_count(&f.id), Some(8));
    }

    #[tokio::test]
    async fn blank_or_disabled_comments_are_rejected() {
        let store = InMemoryStore::new();
        let mut f = folder("ABC123", FolderSource::Folder);
        let blank = CommentDraft {
            name: " ".into(),
            comment: "hi".into(),
        };
        assert!(matches!(
            store.add_comment(&f, &blank).await,
            Err(BackendError::Decode(_))
        ));

        f.allow_comments = false;
        let ok = CommentDraft {
            name: "Ana".into(),
            comment: "hi".into(),
        };
        assert!(matches!(
            store.add_comment(&f, &ok).await,
            Err(BackendError::CommentsDisabled)
        ));
    }

    #[tokio::test]
    async fn posted_comment_is_listed() {
        let store = InMemoryStore::new();
        let f = folder("ABC123", FolderSource::Folder);
        let draft = CommentDraft {
            name: " Ana ".into(),
            comment: " Beautiful ".into(),
        };
        let stored = store.add_comment(&f, &draft).await.expect("comment");
        assert_eq!(stored.name, "Ana");

        let listed = store.fetch_comments(&f).await.expect("comments");
        assert_eq!(listed, vec![stored]);
    }
}
