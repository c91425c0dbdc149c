// SPDX-License-Identifier: MPL-2.0
//! Memory folders, their media rows and visitor comments.
//!
//! Field names follow the backend rows so the types deserialize directly from
//! query results. Legacy `memories` rows use `name` where folders use `title`
//! and carry no view counter; both cases are absorbed here.

use super::media::{MediaItem, MediaKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which table family a folder was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FolderSource {
    /// `memory_folders` / `folder_media` / `folder_comments`.
    #[default]
    Folder,
    /// `memories` / `memory_media` / `comments`.
    LegacyMemory,
}

impl FolderSource {
    #[must_use]
    pub fn folder_table(self) -> &'static str {
        match self {
            Self::Folder => "memory_folders",
            Self::LegacyMemory => "memories",
        }
    }

    #[must_use]
    pub fn media_table(self) -> &'static str {
        match self {
            Self::Folder => "folder_media",
            Self::LegacyMemory => "memory_media",
        }
    }

    #[must_use]
    pub fn comments_table(self) -> &'static str {
        match self {
            Self::Folder => "folder_comments",
            Self::LegacyMemory => "comments",
        }
    }

    /// Column in child tables pointing back at the folder.
    #[must_use]
    pub fn foreign_key(self) -> &'static str {
        match self {
            Self::Folder => "folder_id",
            Self::LegacyMemory => "memory_id",
        }
    }
}

/// A shared collection of photos and videos.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MemoryFolder {
    pub id: String,
    pub code: String,
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub allow_comments: bool,
    #[serde(default)]
    pub allow_downloads: bool,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub qr_code_url: Option<String>,
    #[serde(default)]
    pub view_count: u64,
    #[serde(skip)]
    pub source: FolderSource,
}

impl MemoryFolder {
    /// Returns the folder tagged with the table family it was read from.
    #[must_use]
    pub fn with_source(mut self, source: FolderSource) -> Self {
        self.source = source;
        self
    }
}

/// A media row ordered by `order_index`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FolderMedia {
    pub id: String,
    pub media_url: String,
    pub media_type: MediaKind,
    #[serde(default)]
    pub order_index: i64,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

impl From<FolderMedia> for MediaItem {
    fn from(row: FolderMedia) -> Self {
        MediaItem {
            id: row.id,
            url: row.media_url,
            kind: row.media_type,
        }
    }
}

/// Turns media rows into gallery items, sorted by `order_index` (stable for
/// equal indices).
#[must_use]
pub fn media_items(mut rows: Vec<FolderMedia>) -> Vec<MediaItem> {
    rows.sort_by_key(|row| row.order_index);
    rows.into_iter().map(MediaItem::from).collect()
}

/// A visitor comment.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Comment {
    pub id: String,
    pub name: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// A comment being written in the comments form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDraft {
    pub name: String,
    pub comment: String,
}

impl CommentDraft {
    /// Returns the trimmed `(name, comment)` pair, or `None` when either is
    /// blank.
    #[must_use]
    pub fn validated(&self) -> Option<(String, String)> {
        let name = self.name.trim();
        let comment = self.comment.trim();
        if name.is_empty() || comment.is_empty() {
            None
        } else {
            Some((name.to_string(), comment.to_string()))
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.comment.clear();
    }
}

/// Sorts comments newest first.
pub fn sort_newest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_row_deserializes_with_defaults() {
        let json = r#"{
            "id": "f1",
            "code": "ABC123",
            "title": "Wedding",
            "created_at": "2024-05-01T10:00:00Z",
            "allow_downloads": true
        }"#;
        let folder: MemoryFolder = serde_json_like(json);
        assert_eq!(folder.title, "Wedding");
        assert!(folder.allow_downloads);
        assert!(!folder.allow_comments);
        assert_eq!(folder.view_count, 0);
        assert_eq!(folder.source, FolderSource::Folder);
    }

    #[test]
    fn legacy_row_reads_name_as_title() {
        let json = r#"{
            "id": "m1",
            "code": "OLD001",
            "name": "Trip",
            "created_at": "2023-01-01T00:00:00Z"
        }"#;
        let folder: MemoryFolder = serde_json_like(json);
        let folder = folder.with_source(FolderSource::LegacyMemory);
        assert_eq!(folder.title, "Trip");
        assert_eq!(folder.source.media_table(), "memory_media");
        assert_eq!(folder.source.foreign_key(), "memory_id");
    }

    #[test]
    fn media_rows_sort_by_order_index() {
        let rows = vec![
            row("b", MediaKind::Video, 2),
            row("a", MediaKind::Image, 1),
            row("c", MediaKind::Image, 3),
        ];
        let ids: Vec<_> = media_items(rows).into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn draft_requires_both_fields() {
        let mut draft = CommentDraft {
            name: "  Ana ".into(),
            comment: "   ".into(),
        };
        assert!(draft.validated().is_none());
        draft.comment = " Lovely! ".into();
        assert_eq!(
            draft.validated(),
            Some(("Ana".to_string(), "Lovely!".to_string()))
        );
        draft.clear();
        assert_eq!(draft, CommentDraft::default());
    }

    #[test]
    fn comments_sort_newest_first() {
        let mut comments = vec![comment("old", "2024-01-01T00:00:00Z"), comment("new", "2024-06-01T00:00:00Z")];
        sort_newest_first(&mut comments);
        assert_eq!(comments[0].id, "new");
    }

    fn row(id: &str, kind: MediaKind, order_index: i64) -> FolderMedia {
        FolderMedia {
            id: id.into(),
            media_url: format!("https://cdn/{id}"),
            media_type: kind,
            order_index,
            file_name: None,
            file_size: None,
        }
    }

    fn comment(id: &str, at: &str) -> Comment {
        Comment {
            id: id.into(),
            name: "n".into(),
            comment: "c".into(),
            created_at: at.parse().expect("valid timestamp"),
        }
    }

    fn serde_json_like<T: serde::de::DeserializeOwned>(json: &str) -> T {
        serde_json::from_str(json).expect("valid row")
    }
}
