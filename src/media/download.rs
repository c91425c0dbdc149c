// SPDX-License-Identifier: MPL-2.0
//! Saving gallery items to disk.

use crate::domain::{MediaItem, MediaKind, MemoryFolder};
use crate::error::{Error, Result};
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// File name offered for the item at `index` (zero-based) of the lightbox
/// sequence, matching its "i of N" counter:
/// `{title}-{n}.jpg` for images, `{title}-{n}.mp4` for videos.
#[must_use]
pub fn file_name(title: &str, index: usize, kind: MediaKind) -> String {
    let extension = match kind {
        MediaKind::Image => "jpg",
        MediaKind::Video => "mp4",
    };
    format!("{}-{}.{}", sanitize(title), index + 1, extension)
}

/// Replaces characters that are not valid in file names on common platforms.
fn sanitize(title: &str) -> String {
    let cleaned: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    if cleaned.is_empty() {
        "memory".to_string()
    } else {
        cleaned
    }
}

/// What to fetch and where to store it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub destination: PathBuf,
}

impl DownloadRequest {
    /// Plans the download of `item`, shown at `index` in the lightbox.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Download`] when the folder does not allow downloads.
    pub fn for_item(folder: &MemoryFolder, item: &MediaItem, index: usize, dir: &Path) -> Result<Self> {
        if !folder.allow_downloads {
            return Err(Error::Download("downloads are disabled for this folder".into()));
        }
        Ok(Self {
            url: item.url.clone(),
            destination: dir.join(file_name(&folder.title, index, item.kind)),
        })
    }
}

/// Streams the body of `request.url` into `request.destination`.
///
/// Returns the number of bytes written. A partially written file is removed
/// on failure.
///
/// # Errors
///
/// Returns [`Error::Download`] on network failure or non-success status and
/// [`Error::Io`] when the file cannot be written.
pub async fn download_to(client: reqwest::Client, request: DownloadRequest) -> Result<u64> {
    let response = client
        .get(&request.url)
        .send()
        .await
        .map_err(|err| Error::Download(err.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::Download(format!("HTTP status: {}", response.status())));
    }

    if let Some(parent) = request.destination.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let written = write_stream(response, &request.destination).await;
    if written.is_err() {
        let _ = tokio::fs::remove_file(&request.destination).await;
    }
    let written = written?;

    tracing::info!(
        path = %request.destination.display(),
        bytes = written,
        "download complete"
    );
    Ok(written)
}

async fn write_stream(response: reqwest::Response, destination: &Path) -> Result<u64> {
    let mut file = tokio::fs::File::create(destination).await?;
    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|err| Error::Download(err.to_string()))?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(downloaded)
}
