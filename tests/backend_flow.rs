// SPDX-License-Identifier: MPL-2.0
use chrono::{TimeZone, Utc};
use memories_bed::backend::memory::InMemoryStore;
use memories_bed::backend::{BackendError, GalleryStore};
use memories_bed::domain::{
    folder, CommentDraft, FolderMedia, FolderSource, MediaItem, MediaKind, MemoryFolder, ShortCode,
};
use memories_bed::media::{delivery, download, PlaybackElement, TimelineElement};
use memories_bed::ui::viewer::{grid, lightbox, video_transport};

/// Stands in for the decoder: the clip reports its duration once opened.
fn opened_clip(_item: &MediaItem) -> Box<dyn PlaybackElement> {
    Box::new(TimelineElement::new(Some(120.0)))
}

fn lightbox_with_clips() -> lightbox::State {
    lightbox::State::with_elements(lightbox::Settings::default(), opened_clip)
}

fn folder_row(code: &str, allow_comments: bool) -> MemoryFolder {
    MemoryFolder {
        id: format!("folder-{code}"),
        code: code.to_string(),
        title: "Summer 2024".to_string(),
        description: Some("Beach week".to_string()),
        created_at: Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
        allow_comments,
        allow_downloads: true,
        thumbnail_url: None,
        qr_code_url: None,
        view_count: 41,
        source: FolderSource::Folder,
    }
}

fn media_row(id: &str, kind: MediaKind, order_index: i64) -> FolderMedia {
    let url = match kind {
        MediaKind::Image => format!("https://res.cloudinary.com/demo/image/upload/{id}.jpg"),
        MediaKind::Video => format!("https://res.cloudinary.com/demo/video/upload/{id}.mp4"),
    };
    FolderMedia {
        id: id.to_string(),
        media_url: url,
        media_type: kind,
        order_index,
        file_name: None,
        file_size: None,
    }
}

fn seeded_store() -> (InMemoryStore, MemoryFolder) {
    let store = InMemoryStore::new();
    let folder = folder_row("ABC123", true);
    store.insert_folder(
        folder.clone(),
        vec![
            media_row("third", MediaKind::Image, 2),
            media_row("first", MediaKind::Image, 0),
            media_row("second", MediaKind::Video, 1),
        ],
    );
    (store, folder)
}

#[tokio::test]
async fn fetched_gallery_opens_in_order_in_the_lightbox() {
    let (store, _) = seeded_store();
    let code = ShortCode::parse(" abc123 ").expect("valid code");

    let folder = store.fetch_folder(&code).await.expect("folder exists");
    let rows = store.fetch_media(&folder).await.expect("media rows");
    let items = folder::media_items(rows);
    let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, ["first", "second", "third"]);

    let mut grid = grid::State::new(items);
    let grid::Effect::Open { items, index } = grid.handle(grid::Message::Select(1)) else {
        panic!("selecting a thumbnail opens the lightbox");
    };
    let mut lightbox = lightbox_with_clips();
    lightbox.handle(lightbox::Message::Open { items, index });
    assert_eq!(lightbox.current_item().map(|item| item.id.as_str()), Some("second"));
    assert!(lightbox.viewer().is_some_and(|viewer| viewer.as_video().is_some()));

    let poster = lightbox.current_item().map(delivery::grid_image_url);
    assert_eq!(
        poster.as_deref(),
        Some("https://res.cloudinary.com/demo/video/upload/so_0/second.jpg")
    );
}

#[tokio::test]
async fn unknown_code_is_not_found() {
    let (store, _) = seeded_store();
    let code = ShortCode::parse("ZZZ999").expect("valid code");
    let result = store.fetch_folder(&code).await;
    assert!(matches!(result, Err(BackendError::NotFound)));
}

#[tokio::test]
async fn legacy_memories_are_found_when_no_folder_matches() {
    let store = InMemoryStore::new();
    store.insert_folder(
        folder_row("OLD001", false).with_source(FolderSource::LegacyMemory),
        vec![media_row("only", MediaKind::Image, 0)],
    );
    let code = ShortCode::parse("OLD001").expect("valid code");
    let folder = store.fetch_folder(&code).await.expect("legacy memory");
    assert_eq!(folder.source, FolderSource::LegacyMemory);
}

#[tokio::test]
async fn view_counter_is_incremented_once_per_visit() {
    let (store, folder) = seeded_store();
    let count = store.increment_view_count(&folder).await.expect("counter written");
    assert_eq!(count, 42);
    assert_eq!(store.view_count(&folder.id), Some(42));
}

#[tokio::test]
async fn posted_comments_come_back_newest_first() {
    let (store, folder) = seeded_store();
    for (name, comment) in [("Ana", "Lovely"), ("Ben", "Great trip")] {
        let draft = CommentDraft {
            name: name.to_string(),
            comment: comment.to_string(),
        };
        store.add_comment(&folder, &draft).await.expect("comment stored");
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let comments = store.fetch_comments(&folder).await.expect("comments");
    let names: Vec<&str> = comments.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Ben", "Ana"]);
}

#[tokio::test]
async fn comments_are_refused_when_disabled_or_blank() {
    let store = InMemoryStore::new();
    let closed = folder_row("NOCOMM", false);
    store.insert_folder(closed.clone(), Vec::new());
    let draft = CommentDraft {
        name: "Ana".to_string(),
        comment: "Hi".to_string(),
    };
    let refused = store.add_comment(&closed, &draft).await;
    assert!(matches!(refused, Err(BackendError::CommentsDisabled)));

    let (store, open) = seeded_store();
    let blank = CommentDraft {
        name: "  ".to_string(),
        comment: "Hi".to_string(),
    };
    assert!(store.add_comment(&open, &blank).await.is_err());
}

#[test]
fn download_names_follow_gallery_position() {
    let folder = folder_row("ABC123", true);
    let items = folder::media_items(vec![
        media_row("a", MediaKind::Image, 0),
        media_row("b", MediaKind::Video, 1),
    ]);
    let dir = tempfile::tempdir().expect("temp dir");
    let request = download::DownloadRequest::for_item(&folder, &items[1], 1, dir.path())
        .expect("downloads allowed");
    assert_eq!(request.destination, dir.path().join("Summer 2024-2.mp4"));
    assert_eq!(request.url, items[1].url);
}

#[test]
fn stored_rows_without_duration_still_play() {
    let rows: Vec<FolderMedia> = serde_json::from_value(serde_json::json!([
        {
            "id": "clip",
            "folder_id": "folder-ABC123",
            "media_url": "https://res.cloudinary.com/demo/video/upload/clip.mp4",
            "media_type": "video",
            "order_index": 1,
            "created_at": "2024-07-01T12:00:00+00:00"
        },
        {
            "id": "cover",
            "folder_id": "folder-ABC123",
            "media_url": "https://res.cloudinary.com/demo/image/upload/cover.jpg",
            "media_type": "image",
            "order_index": 0,
            "created_at": "2024-07-01T12:00:00+00:00"
        }
    ]))
    .expect("rows match the table schema");
    let items = folder::media_items(rows);

    let mut lightbox = lightbox_with_clips();
    lightbox.handle(lightbox::Message::Open { items, index: 1 });
    let playback = |lightbox: &lightbox::State| {
        lightbox
            .viewer()
            .and_then(|viewer| viewer.as_video())
            .map(|video| (*video.playback(), video.load_error().is_some()))
    };

    let Some((opened, failed)) = playback(&lightbox) else {
        panic!("the clip opens in the video transport");
    };
    assert!(!failed);
    assert!(opened.can_seek());
    assert_eq!(opened.duration, 120.0);

    lightbox.handle(lightbox::Message::Video(video_transport::Message::TogglePlay));
    lightbox.handle(lightbox::Message::Video(video_transport::Message::SeekTo(0.5)));
    let Some((playing, _)) = playback(&lightbox) else {
        panic!("the clip stays open");
    };
    assert!(playing.is_playing);
    assert_eq!(playing.current_time, 60.0);
}
