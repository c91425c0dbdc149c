// SPDX-License-Identifier: MPL-2.0
//! Remote image fetching and decoding.

use crate::error::{Error, Result};
use iced::widget::image;

/// Decoded image ready for display.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Wraps RGBA pixels in a display handle.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }

    /// Size in bytes of the decoded pixels.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }
}

/// Decodes JPEG/PNG/GIF/WebP/BMP bytes into RGBA.
///
/// # Errors
///
/// Returns [`Error::Image`] if the format is unknown or the data is corrupt.
pub fn decode(bytes: &[u8]) -> Result<ImageData> {
    let decoded = image_rs::load_from_memory(bytes).map_err(|err| Error::Image(err.to_string()))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageData::from_rgba(width, height, rgba.into_raw()))
}

/// Downloads and decodes the image at `url`.
///
/// # Errors
///
/// Returns [`Error::Image`] on network failure, non-success status or
/// undecodable content.
pub async fn fetch(client: reqwest::Client, url: String) -> Result<ImageData> {
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|err| Error::Image(err.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::Image(format!("HTTP status: {}", response.status())));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|err| Error::Image(err.to_string()))?;

    tokio::task::spawn_blocking(move || decode(&bytes))
        .await
        .map_err(|err| Error::Image(err.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).expect("encode png");
        out.into_inner()
    }

    #[test]
    fn decode_png_reports_dimensions() {
        let data = decode(&png_bytes(4, 3)).expect("decode");
        assert_eq!((data.width, data.height), (4, 3));
        assert_eq!(data.size_bytes(), 48);
    }

    #[test]
    fn decode_garbage_is_an_image_error() {
        assert!(matches!(decode(b"not an image"), Err(Error::Image(_))));
    }
}
