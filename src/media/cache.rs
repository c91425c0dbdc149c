// SPDX-License-Identifier: MPL-2.0
//! LRU cache of decoded images keyed by URL.
//!
//! Thumbnails and lightbox images are fetched once per session; revisiting an
//! item or toggling the filter reuses the decoded handle. Items that failed to
//! load are remembered too, so the grid shows a placeholder instead of
//! retrying on every frame.

use super::image::ImageData;
use crate::config::IMAGE_CACHE_CAPACITY;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Load status of one URL.
#[derive(Debug, Clone)]
pub enum CachedImage {
    Loading,
    Ready(ImageData),
    Failed,
}

/// Bounded image cache.
pub struct ImageCache {
    entries: LruCache<String, CachedImage>,
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageCache")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(IMAGE_CACHE_CAPACITY)
    }
}

impl ImageCache {
    /// Creates a cache holding at most `capacity` entries (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Returns the entry for `url` without touching LRU order.
    #[must_use]
    pub fn peek(&self, url: &str) -> Option<&CachedImage> {
        self.entries.peek(url)
    }

    /// Returns the decoded image for `url`, if ready.
    pub fn get(&mut self, url: &str) -> Option<&ImageData> {
        match self.entries.get(url) {
            Some(CachedImage::Ready(data)) => Some(data),
            _ => None,
        }
    }

    /// Marks `url` as being fetched. Returns `false` if it is already known,
    /// meaning no fetch should be started.
    pub fn begin_load(&mut self, url: &str) -> bool {
        if self.entries.contains(url) {
            return false;
        }
        self.entries.put(url.to_string(), CachedImage::Loading);
        true
    }

    /// Stores the outcome of a fetch.
    pub fn finish_load(&mut self, url: String, result: Option<ImageData>) {
        let entry = match result {
            Some(data) => CachedImage::Ready(data),
            None => CachedImage::Failed,
        };
        self.entries.put(url, entry);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel() -> ImageData {
        ImageData::from_rgba(1, 1, vec![0, 0, 0, 255])
    }

    #[test]
    fn begin_load_only_once_per_url() {
        let mut cache = ImageCache::new(4);
        assert!(cache.begin_load("a"));
        assert!(!cache.begin_load("a"));
        assert!(matches!(cache.peek("a"), Some(CachedImage::Loading)));
    }

    #[test]
    fn finished_loads_are_served() {
        let mut cache = ImageCache::new(4);
        cache.begin_load("a");
        cache.finish_load("a".into(), Some(pixel()));
        assert!(cache.get("a").is_some());

        cache.finish_load("b".into(), None);
        assert!(cache.get("b").is_none());
        assert!(matches!(cache.peek("b"), Some(CachedImage::Failed)));
        assert!(!cache.begin_load("b"));
    }

    #[test]
    fn least_recently_used_entry_is_evicted() {
        let mut cache = ImageCache::new(2);
        cache.finish_load("a".into(), Some(pixel()));
        cache.finish_load("b".into(), Some(pixel()));
        let _ = cache.get("a");
        cache.finish_load("c".into(), Some(pixel()));

        assert!(cache.peek("a").is_some());
        assert!(cache.peek("b").is_none());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn zero_capacity_is_bumped_to_one() {
        let mut cache = ImageCache::new(0);
        cache.finish_load("a".into(), Some(pixel()));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
