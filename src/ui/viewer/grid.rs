// SPDX-License-Identifier: MPL-2.0
//! Gallery grid: filtered thumbnails and selection.
//!
//! The grid never reorders or mutates the gallery items. Selecting a
//! thumbnail reports its index within the filtered sequence together with a
//! snapshot of that sequence for the lightbox.

use crate::domain::{MediaFilter, MediaItem};

/// Grid state.
#[derive(Debug, Clone, Default)]
pub struct State {
    items: Vec<MediaItem>,
    filter: MediaFilter,
    /// Positions in `items` kept by `filter`.
    visible: Vec<usize>,
}

#[derive(Debug, Clone, Copy)]
pub enum Message {
    FilterChanged(MediaFilter),
    /// Thumbnail activated, by index within the filtered sequence.
    Select(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    FilterChanged(MediaFilter),
    Open { items: Vec<MediaItem>, index: usize },
}

impl State {
    #[must_use]
    pub fn new(items: Vec<MediaItem>) -> Self {
        let filter = MediaFilter::default();
        let visible = filter.apply(&items);
        Self {
            items,
            filter,
            visible,
        }
    }

    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::FilterChanged(filter) => {
                if filter == self.filter {
                    return Effect::None;
                }
                self.filter = filter;
                self.visible = filter.apply(&self.items);
                tracing::debug!(?filter, shown = self.visible.len(), "gallery filter changed");
                Effect::FilterChanged(filter)
            }
            Message::Select(index) => {
                if index >= self.visible.len() {
                    return Effect::None;
                }
                Effect::Open {
                    items: self.filtered_items(),
                    index,
                }
            }
        }
    }

    /// The filtered, order-preserving sequence.
    pub fn visible(&self) -> impl Iterator<Item = &MediaItem> + '_ {
        self.visible.iter().map(|&position| &self.items[position])
    }

    #[must_use]
    pub fn filtered_items(&self) -> Vec<MediaItem> {
        self.visible().cloned().collect()
    }

    #[must_use]
    pub fn filter(&self) -> MediaFilter {
        self.filter
    }

    #[must_use]
    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    /// Item count per filter, for the filter bar labels.
    #[must_use]
    pub fn count(&self, filter: MediaFilter) -> usize {
        filter.count(&self.items)
    }

    /// Nothing to show under the current filter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaKind;

    fn mixed() -> Vec<MediaItem> {
        vec![
            MediaItem::image("imgA", "https://cdn.test/a.jpg"),
            MediaItem::video("vidB", "https://cdn.test/b.mp4"),
            MediaItem::image("imgC", "https://cdn.test/c.jpg"),
        ]
    }

    fn ids(state: &State) -> Vec<&str> {
        state.visible().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn all_shows_everything_in_order() {
        let state = State::new(mixed());
        assert_eq!(ids(&state), ["imgA", "vidB", "imgC"]);
    }

    #[test]
    fn filters_preserve_order() {
        let mut state = State::new(mixed());
        state.handle(Message::FilterChanged(MediaFilter::Images));
        assert_eq!(ids(&state), ["imgA", "imgC"]);
        state.handle(Message::FilterChanged(MediaFilter::Videos));
        assert_eq!(ids(&state), ["vidB"]);
        assert_eq!(state.items().len(), 3);
    }

    #[test]
    fn selection_reports_filtered_index_and_snapshot() {
        let mut state = State::new(mixed());
        state.handle(Message::FilterChanged(MediaFilter::Images));
        let Effect::Open { items, index } = state.handle(Message::Select(1)) else {
            panic!("expected open");
        };
        assert_eq!(index, 1);
        assert_eq!(items[index].id, "imgC");
        assert!(items.iter().all(|item| item.kind == MediaKind::Image));
    }

    #[test]
    fn selection_out_of_range_is_ignored() {
        let mut state = State::new(mixed());
        assert_eq!(state.handle(Message::Select(3)), Effect::None);
    }

    #[test]
    fn empty_filter_result_reports_empty() {
        let mut state = State::new(vec![MediaItem::image("a", "https://cdn.test/a.jpg")]);
        state.handle(Message::FilterChanged(MediaFilter::Videos));
        assert!(state.is_empty());
        assert_eq!(state.handle(Message::Select(0)), Effect::None);
    }

    #[test]
    fn same_filter_is_noop() {
        let mut state = State::new(mixed());
        assert_eq!(state.handle(Message::FilterChanged(MediaFilter::All)), Effect::None);
    }

    #[test]
    fn counts_per_filter() {
        let state = State::new(mixed());
        assert_eq!(state.count(MediaFilter::All), 3);
        assert_eq!(state.count(MediaFilter::Images), 2);
        assert_eq!(state.count(MediaFilter::Videos), 1);
    }
}
