// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for gallery navigation.
//!
//! Measures the performance of:
//! - Filtering a large gallery by media type
//! - Stepping through the lightbox (each step rebuilds the item viewer)
//! - Building grid image URLs for every item

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use memories_bed::domain::{MediaFilter, MediaItem};
use memories_bed::media::{delivery, PlaybackElement, TimelineElement};
use memories_bed::ui::viewer::{grid, lightbox};
use std::hint::black_box;

fn gallery(len: usize) -> Vec<MediaItem> {
    (0..len)
        .map(|i| {
            if i % 4 == 0 {
                MediaItem::video(
                    format!("v{i}"),
                    format!("https://res.cloudinary.com/demo/video/upload/v{i}.mp4"),
                )
            } else {
                MediaItem::image(
                    format!("i{i}"),
                    format!("https://res.cloudinary.com/demo/image/upload/i{i}.jpg"),
                )
            }
        })
        .collect()
}

fn timeline(_item: &MediaItem) -> Box<dyn PlaybackElement> {
    Box::new(TimelineElement::new(Some(90.0)))
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("gallery_filter");
    for len in [100, 1_000, 10_000] {
        let items = gallery(len);
        group.bench_with_input(BenchmarkId::new("apply_videos", len), &items, |b, items| {
            b.iter(|| black_box(MediaFilter::Videos.apply(black_box(items))));
        });
    }

    let items = gallery(1_000);
    group.bench_function("grid_filter_cycle", |b| {
        let mut state = grid::State::new(items.clone());
        b.iter(|| {
            for filter in MediaFilter::ALL {
                black_box(state.handle(grid::Message::FilterChanged(filter)));
            }
        });
    });
    group.finish();
}

fn bench_lightbox_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("lightbox_navigation");
    let items = gallery(1_000);

    group.bench_function("next", |b| {
        let mut state = lightbox::State::with_elements(lightbox::Settings::default(), timeline);
        state.handle(lightbox::Message::Open {
            items: items.clone(),
            index: 0,
        });
        b.iter(|| black_box(state.handle(lightbox::Message::Next)));
    });

    group.bench_function("open_from_grid", |b| {
        let mut grid = grid::State::new(items.clone());
        let mut state = lightbox::State::with_elements(lightbox::Settings::default(), timeline);
        b.iter(|| {
            if let grid::Effect::Open { items, index } = grid.handle(grid::Message::Select(500)) {
                black_box(state.handle(lightbox::Message::Open { items, index }));
            }
        });
    });
    group.finish();
}

fn bench_grid_urls(c: &mut Criterion) {
    let items = gallery(1_000);
    c.bench_function("grid_image_urls", |b| {
        b.iter(|| {
            let urls: Vec<String> = items.iter().map(delivery::grid_image_url).collect();
            black_box(urls)
        });
    });
}

criterion_group!(benches, bench_filter, bench_lightbox_navigation, bench_grid_urls);
criterion_main!(benches);
