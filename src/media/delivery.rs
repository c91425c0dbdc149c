// SPDX-License-Identifier: MPL-2.0
//! URL rewriting for the media CDN.
//!
//! The CDN resizes on the fly when transformation parameters are inserted
//! after the `/upload/` path segment, and serves a still frame of a video when
//! asked for `so_0` with an image extension. URLs from any other host are
//! returned unchanged.

use crate::config::{OPTIMIZED_HEIGHT, OPTIMIZED_WIDTH, THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH};
use crate::domain::{MediaItem, MediaKind};

const CDN_HOST: &str = "cloudinary.com";
const UPLOAD_SEGMENT: &str = "/upload/";
const VIDEO_UPLOAD_SEGMENT: &str = "/video/upload/";
const POSTER_SEGMENT: &str = "/video/upload/so_0/";
const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "mov", "avi", "mkv", "webm"];

fn is_cdn_url(url: &str) -> bool {
    url.contains(CDN_HOST)
}

/// Resized, quality-optimized variant of `url`.
#[must_use]
pub fn optimized_url(url: &str, width: u32, height: u32) -> String {
    if !is_cdn_url(url) {
        return url.to_string();
    }
    let transform = format!("/upload/w_{width},h_{height},c_fill,q_auto:best,f_auto/");
    url.replacen(UPLOAD_SEGMENT, &transform, 1)
}

/// Grid-sized variant (400x300).
#[must_use]
pub fn thumbnail_url(url: &str) -> String {
    optimized_url(url, THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT)
}

/// Lightbox-sized variant (800x600).
#[must_use]
pub fn lightbox_url(url: &str) -> String {
    optimized_url(url, OPTIMIZED_WIDTH, OPTIMIZED_HEIGHT)
}

/// Still frame at timestamp zero of a video, as a JPEG.
#[must_use]
pub fn video_poster_url(url: &str) -> String {
    if !is_cdn_url(url) {
        return url.to_string();
    }
    let rewritten = url.replacen(VIDEO_UPLOAD_SEGMENT, POSTER_SEGMENT, 1);
    match rewritten.rsplit_once('.') {
        Some((stem, ext))
            if VIDEO_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext)) =>
        {
            format!("{stem}.jpg")
        }
        _ => rewritten,
    }
}

/// Image shown for `item` in the grid.
#[must_use]
pub fn grid_image_url(item: &MediaItem) -> String {
    match item.kind {
        MediaKind::Image => thumbnail_url(&item.url),
        MediaKind::Video => video_poster_url(&item.url),
    }
}

/// Image shown for `item` in the lightbox (the poster for videos).
#[must_use]
pub fn lightbox_image_url(item: &MediaItem) -> String {
    match item.kind {
        MediaKind::Image => lightbox_url(&item.url),
        MediaKind::Video => video_poster_url(&item.url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: &str = "https://res.cloudinary.com/demo/image/upload/v1/folder/photo.jpg";
    const VIDEO: &str = "https://res.cloudinary.com/demo/video/upload/v1/folder/clip.MP4";

    #[test]
    fn thumbnail_inserts_resize_parameters() {
        assert_eq!(
            thumbnail_url(IMAGE),
            "https://res.cloudinary.com/demo/image/upload/w_400,h_300,c_fill,q_auto:best,f_auto/v1/folder/photo.jpg"
        );
    }

    #[test]
    fn lightbox_uses_larger_size() {
        assert!(lightbox_url(IMAGE).contains("/upload/w_800,h_600,c_fill,q_auto:best,f_auto/"));
    }

    #[test]
    fn poster_requests_first_frame_as_jpeg() {
        assert_eq!(
            video_poster_url(VIDEO),
            "https://res.cloudinary.com/demo/video/upload/so_0/v1/folder/clip.jpg"
        );
    }

    #[test]
    fn poster_keeps_unknown_extension() {
        let url = "https://res.cloudinary.com/demo/video/upload/v1/clip.ogv";
        assert_eq!(
            video_poster_url(url),
            "https://res.cloudinary.com/demo/video/upload/so_0/v1/clip.ogv"
        );
    }

    #[test]
    fn foreign_hosts_are_untouched() {
        let url = "https://example.com/upload/photo.jpg";
        assert_eq!(thumbnail_url(url), url);
        assert_eq!(video_poster_url("https://example.com/video/upload/a.mp4"), "https://example.com/video/upload/a.mp4");
    }

    #[test]
    fn grid_url_depends_on_kind() {
        let video = MediaItem::video("v", VIDEO);
        assert!(grid_image_url(&video).ends_with("clip.jpg"));
        let image = MediaItem::image("i", IMAGE);
        assert!(grid_image_url(&image).contains("w_400"));
    }
}
