// SPDX-License-Identifier: MPL-2.0
use approx::assert_abs_diff_eq;
use iced::Point;
use memories_bed::domain::{MediaFilter, MediaItem};
use memories_bed::media::{PlaybackElement, TimelineElement};
use memories_bed::ui::viewer::{grid, lightbox, swipe, video_transport};

/// Every video lasts two minutes.
fn timeline(_item: &MediaItem) -> Box<dyn PlaybackElement> {
    Box::new(TimelineElement::new(Some(120.0)))
}

fn gallery(len: usize) -> Vec<MediaItem> {
    (0..len)
        .map(|i| {
            if i % 3 == 1 {
                MediaItem::video(format!("vid{i}"), format!("https://cdn.test/v{i}.mp4"))
            } else {
                MediaItem::image(format!("img{i}"), format!("https://cdn.test/i{i}.jpg"))
            }
        })
        .collect()
}

fn open(items: Vec<MediaItem>, index: usize) -> lightbox::State {
    let mut state = lightbox::State::with_elements(lightbox::Settings::default(), timeline);
    assert_eq!(
        state.handle(lightbox::Message::Open { items, index }),
        lightbox::Effect::Opened(index)
    );
    state
}

fn open_from_grid(grid: &mut grid::State, index: usize) -> lightbox::State {
    match grid.handle(grid::Message::Select(index)) {
        grid::Effect::Open { items, index } => open(items, index),
        other => panic!("expected the lightbox to open, got {other:?}"),
    }
}

fn swipe_gesture(state: &mut lightbox::State, from: Point, to: Point) -> lightbox::Effect {
    state.handle(lightbox::Message::Swipe(swipe::Message::TouchStart(from)));
    state.handle(lightbox::Message::Swipe(swipe::Message::TouchMove(to)));
    state.handle(lightbox::Message::Swipe(swipe::Message::TouchEnd(Some(to))))
}

#[test]
fn filtered_sequences_keep_gallery_order() {
    let items = gallery(10);
    for filter in MediaFilter::ALL {
        let positions = filter.apply(&items);
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(positions.iter().all(|&i| filter.matches(items[i].kind)));
        assert_eq!(positions.len(), filter.count(&items));
    }
}

#[test]
fn videos_filter_over_mixed_gallery_opens_single_video() {
    let items = vec![
        MediaItem::image("imgA", "https://cdn.test/a.jpg"),
        MediaItem::video("vidB", "https://cdn.test/b.mp4"),
        MediaItem::image("imgC", "https://cdn.test/c.jpg"),
    ];
    let mut grid = grid::State::new(items);
    grid.handle(grid::Message::FilterChanged(MediaFilter::Videos));
    let visible: Vec<&str> = grid.visible().map(|item| item.id.as_str()).collect();
    assert_eq!(visible, ["vidB"]);

    let mut lightbox = open_from_grid(&mut grid, 0);
    assert!(!lightbox.can_navigate());
    assert_eq!(lightbox.handle(lightbox::Message::Next), lightbox::Effect::None);
    assert_eq!(lightbox.current_item().map(|item| item.id.as_str()), Some("vidB"));
}

#[test]
fn previous_from_first_item_wraps_to_last() {
    let mut lightbox = open(gallery(5), 0);
    assert_eq!(lightbox.handle(lightbox::Message::Previous), lightbox::Effect::Opened(4));
    assert_eq!(lightbox.current_index(), Some(4));
}

#[test]
fn full_cycle_of_next_or_previous_returns_to_start() {
    let len = 7;
    for start in 0..len {
        let mut lightbox = open(gallery(len), start);
        for _ in 0..len {
            lightbox.handle(lightbox::Message::Next);
        }
        assert_eq!(lightbox.current_index(), Some(start));
        for _ in 0..len {
            lightbox.handle(lightbox::Message::Previous);
        }
        assert_eq!(lightbox.current_index(), Some(start));
    }
}

#[test]
fn navigating_resets_the_image_transform() {
    let mut lightbox = open(gallery(5), 0);
    lightbox.handle(lightbox::Message::Image(
        memories_bed::ui::viewer::image_view::Message::ZoomIn,
    ));
    lightbox.handle(lightbox::Message::Image(
        memories_bed::ui::viewer::image_view::Message::Rotate,
    ));
    let zoomed = lightbox.viewer().and_then(|viewer| viewer.as_image()).map(|image| image.transform());
    assert!(zoomed.is_some_and(|transform| !transform.is_identity()));

    lightbox.handle(lightbox::Message::JumpTo(2));
    lightbox.handle(lightbox::Message::JumpTo(0));
    let reopened = lightbox.viewer().and_then(|viewer| viewer.as_image()).map(|image| image.transform());
    assert!(reopened.is_some_and(|transform| transform.is_identity()));
}

#[test]
fn seeking_half_of_a_two_minute_video_lands_at_one_minute() {
    // Index 1 is a 120 s video.
    let mut lightbox = open(gallery(3), 1);
    lightbox.handle(lightbox::Message::Video(video_transport::Message::SeekTo(0.5)));
    let playback = lightbox
        .viewer()
        .and_then(|viewer| viewer.as_video())
        .map(|video| *video.playback())
        .expect("video viewer");
    assert_abs_diff_eq!(playback.duration, 120.0);
    assert_abs_diff_eq!(playback.current_time, 60.0);
}

#[test]
fn skipping_back_past_the_start_clamps_to_zero() {
    let mut lightbox = open(gallery(3), 1);
    lightbox.handle(lightbox::Message::Video(video_transport::Message::SeekTo(5.0 / 120.0)));
    lightbox.handle(lightbox::Message::Video(video_transport::Message::Skip(-10.0)));
    let current = lightbox
        .viewer()
        .and_then(|viewer| viewer.as_video())
        .map(|video| video.playback().current_time)
        .expect("video viewer");
    assert_abs_diff_eq!(current, 0.0);
}

#[test]
fn reopening_a_video_starts_from_zeroed_playback() {
    let mut lightbox = open(gallery(3), 1);
    lightbox.handle(lightbox::Message::Video(video_transport::Message::SeekTo(0.75)));
    lightbox.handle(lightbox::Message::Next);
    lightbox.handle(lightbox::Message::Previous);
    let playback = lightbox
        .viewer()
        .and_then(|viewer| viewer.as_video())
        .map(|video| *video.playback())
        .expect("video viewer");
    assert!(!playback.is_playing);
    assert_abs_diff_eq!(playback.current_time, 0.0);
}

#[test]
fn mostly_horizontal_left_swipe_goes_to_next_item() {
    let mut lightbox = open(gallery(5), 2);
    let effect = swipe_gesture(&mut lightbox, Point::new(200.0, 300.0), Point::new(140.0, 305.0));
    assert_eq!(effect, lightbox::Effect::Opened(3));
    assert!(!lightbox.swipe().is_active());
}

#[test]
fn right_swipe_goes_to_previous_item() {
    let mut lightbox = open(gallery(5), 2);
    let effect = swipe_gesture(&mut lightbox, Point::new(100.0, 300.0), Point::new(180.0, 290.0));
    assert_eq!(effect, lightbox::Effect::Opened(1));
}

#[test]
fn steep_or_short_swipes_snap_back() {
    let mut lightbox = open(gallery(5), 2);

    let steep = swipe_gesture(&mut lightbox, Point::new(200.0, 300.0), Point::new(140.0, 380.0));
    assert_eq!(steep, lightbox::Effect::Changed);
    assert_eq!(lightbox.current_index(), Some(2));

    for end_x in [170.0, 230.0] {
        let short = swipe_gesture(&mut lightbox, Point::new(200.0, 300.0), Point::new(end_x, 300.0));
        assert_eq!(short, lightbox::Effect::Changed);
        assert_eq!(lightbox.current_index(), Some(2));
        assert_abs_diff_eq!(lightbox.swipe().offset(), 0.0);
    }
}

#[test]
fn filter_counts_match_visible_items() {
    let mut grid = grid::State::new(gallery(9));
    assert_eq!(grid.count(MediaFilter::All), 9);
    assert_eq!(grid.count(MediaFilter::Images) + grid.count(MediaFilter::Videos), 9);

    grid.handle(grid::Message::FilterChanged(MediaFilter::Images));
    assert_eq!(grid.visible().count(), grid.count(MediaFilter::Images));
    assert!(grid.visible().all(MediaItem::is_image));
}
