// SPDX-License-Identifier: MPL-2.0
//! Media items shown in a gallery and the type filter applied to them.

use serde::{Deserialize, Serialize};

/// Kind of a gallery entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One photo or video of a gallery.
///
/// Items are immutable once fetched; the gallery owns them for as long as it
/// is displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: String,
    pub url: String,
    pub kind: MediaKind,
}

impl MediaItem {
    #[must_use]
    pub fn image(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            kind: MediaKind::Image,
        }
    }

    #[must_use]
    pub fn video(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            kind: MediaKind::Video,
        }
    }

    #[must_use]
    pub fn is_image(&self) -> bool {
        self.kind == MediaKind::Image
    }

    #[must_use]
    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

/// Gallery filter selected in the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaFilter {
    #[default]
    All,
    Images,
    Videos,
}

impl MediaFilter {
    pub const ALL: [MediaFilter; 3] = [MediaFilter::All, MediaFilter::Images, MediaFilter::Videos];

    /// Returns `true` if this filter lets an item of `kind` through.
    #[must_use]
    pub fn matches(self, kind: MediaKind) -> bool {
        match self {
            Self::All => true,
            Self::Images => kind == MediaKind::Image,
            Self::Videos => kind == MediaKind::Video,
        }
    }

    /// Returns `true` if this filter hides anything.
    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::All
    }

    /// Positions in `items` of the entries this filter keeps, in order.
    #[must_use]
    pub fn apply(self, items: &[MediaItem]) -> Vec<usize> {
        items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches(item.kind))
            .map(|(index, _)| index)
            .collect()
    }

    /// Number of entries this filter keeps.
    #[must_use]
    pub fn count(self, items: &[MediaItem]) -> usize {
        items.iter().filter(|item| self.matches(item.kind)).count()
    }

    /// Fluent key of the filter label.
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            Self::All => "filter-all",
            Self::Images => "filter-images",
            Self::Videos => "filter-videos",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<MediaItem> {
        vec![
            MediaItem::image("a", "https://cdn/a.jpg"),
            MediaItem::video("b", "https://cdn/b.mp4"),
            MediaItem::image("c", "https://cdn/c.jpg"),
            MediaItem::video("d", "https://cdn/d.mp4"),
        ]
    }

    #[test]
    fn all_keeps_every_item_in_order() {
        assert_eq!(MediaFilter::All.apply(&sample()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn images_and_videos_keep_order() {
        let items = sample();
        assert_eq!(MediaFilter::Images.apply(&items), vec![0, 2]);
        assert_eq!(MediaFilter::Videos.apply(&items), vec![1, 3]);
    }

    #[test]
    fn counts_match_apply() {
        let items = sample();
        for filter in MediaFilter::ALL {
            assert_eq!(filter.count(&items), filter.apply(&items).len());
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(MediaFilter::Videos.apply(&[]).is_empty());
    }

    #[test]
    fn only_all_is_inactive() {
        assert!(!MediaFilter::All.is_active());
        assert!(MediaFilter::Images.is_active());
        assert!(MediaFilter::Videos.is_active());
    }
}
