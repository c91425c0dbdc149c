// SPDX-License-Identifier: MPL-2.0
//! Video decoder thread.
//!
//! FFmpeg contexts are not `Send`, so each video gets a dedicated thread that
//! owns its input, decoder and scaler. The UI side talks to it through tokio
//! channels: an unbounded command channel in, a small bounded event channel
//! out (`blocking_send` on the thread, `try_recv` on the UI).
//!
//! The thread reports [`DecoderEvent::Opened`] once the container is opened,
//! then decodes the first frame as a still. While playing it paces frames
//! against the shared [`SyncClock`](super::sync::SyncClock), dropping late
//! frames.

use super::sync::{calculate_sync_action, SharedSyncClock, SyncAction, MAX_FRAME_SKIP};
use crate::error::{Error, Result};
use crate::media::video::{self, VideoInfo};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events buffered before the decoder thread blocks.
const EVENT_CHANNEL_CAPACITY: usize = 4;

/// Longest single wait, so commands stay responsive.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Frames decoded after a seek that land this far before the target are
/// still shown.
const SEEK_TOLERANCE_SECS: f64 = 0.05;

/// A decoded frame in RGBA.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub pts_secs: f64,
}

/// Commands sent to the video thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecoderCommand {
    Play,
    Pause,
    /// Seek and decode the frame at `target_secs`.
    Seek { target_secs: f64 },
    Stop,
}

/// Events sent by the video thread.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    Opened(VideoInfo),
    Frame(DecodedFrame),
    EndOfStream,
    /// Fatal; the thread has stopped.
    Error(String),
}

/// Handle on a running video thread. Dropping it stops the thread.
#[derive(Debug)]
pub struct VideoDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl VideoDecoder {
    /// Spawns the decoder thread for `url`.
    #[must_use]
    pub fn spawn(url: String, clock: SharedSyncClock) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let thread_events = event_tx.clone();
        let spawned = std::thread::Builder::new()
            .name("video-decoder".to_string())
            .spawn(move || {
                if let Err(err) = decoder_loop(&url, command_rx, &thread_events, &clock) {
                    tracing::warn!(%err, "video decoding stopped");
                    let _ = thread_events.blocking_send(DecoderEvent::Error(err.to_string()));
                }
            });
        if let Err(err) = spawned {
            let _ = event_tx.try_send(DecoderEvent::Error(format!(
                "Failed to spawn video decoder: {err}"
            )));
        }

        Self {
            command_tx,
            event_rx,
        }
    }

    /// Sends a command; a stopped thread ignores it.
    pub fn send(&self, command: DecoderCommand) {
        let _ = self.command_tx.send(command);
    }

    /// Next pending event, if any.
    pub fn try_recv(&mut self) -> Option<DecoderEvent> {
        self.event_rx.try_recv().ok()
    }
}

impl Drop for VideoDecoder {
    fn drop(&mut self) {
        let _ = self.command_tx.send(DecoderCommand::Stop);
    }
}

/// Decoding pipeline for one opened input.
struct Pipeline {
    ictx: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    scaler: ffmpeg_next::software::scaling::Context,
    stream_index: usize,
    time_base: ffmpeg_next::Rational,
}

impl Pipeline {
    fn open(url: &str) -> Result<(Self, VideoInfo)> {
        let ictx = video::open_input(url)?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| Error::Video("No video stream found".to_string()))?;
        let stream_index = input.index();
        let time_base = input.time_base();
        let stream_duration = input.duration();

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
                .map_err(|e| Error::Video(format!("Failed to create codec context: {e}")))?;
        let decoder = context_decoder
            .decoder()
            .video()
            .map_err(|e| Error::Video(format!("Failed to create video decoder: {e}")))?;

        let width = decoder.width();
        let height = decoder.height();
        if width == 0 || height == 0 {
            return Err(Error::Video(format!(
                "Invalid video dimensions: {width}x{height}"
            )));
        }

        let (out_width, out_height) = video::frame_size(width, height);
        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            out_width,
            out_height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )
        .map_err(|e| Error::Video(format!("Failed to create scaler: {e}")))?;

        let info = VideoInfo {
            width,
            height,
            duration_secs: video::duration_secs(stream_duration, time_base, ictx.duration()),
            has_audio: ictx
                .streams()
                .best(ffmpeg_next::media::Type::Audio)
                .is_some(),
        };

        Ok((
            Self {
                ictx,
                decoder,
                scaler,
                stream_index,
                time_base,
            },
            info,
        ))
    }

    fn seek(&mut self, target_secs: f64) -> Result<()> {
        // AV_TIME_BASE units; the range lets FFmpeg land on the keyframe before.
        let timestamp = (target_secs.max(0.0) * 1_000_000.0) as i64;
        self.ictx
            .seek(timestamp, ..timestamp)
            .map_err(|e| Error::Video(format!("Seek failed: {e}")))?;
        self.decoder.flush();
        Ok(())
    }

    /// Decodes the next frame, or `None` at the end of the stream.
    fn next_frame(&mut self) -> Result<Option<DecodedFrame>> {
        for (stream, packet) in self.ictx.packets() {
            if stream.index() != self.stream_index {
                continue;
            }
            if self.decoder.send_packet(&packet).is_err() {
                continue;
            }

            let mut decoded = ffmpeg_next::frame::Video::empty();
            if self.decoder.receive_frame(&mut decoded).is_ok() {
                let mut rgba_frame = ffmpeg_next::frame::Video::empty();
                self.scaler
                    .run(&decoded, &mut rgba_frame)
                    .map_err(|e| Error::Video(format!("Scaling failed: {e}")))?;

                let pts_secs = decoded
                    .timestamp()
                    .map_or(0.0, |pts| video::timestamp_secs(pts, self.time_base));

                return Ok(Some(DecodedFrame {
                    rgba: extract_rgba_data(
                        rgba_frame.data(0),
                        rgba_frame.stride(0),
                        rgba_frame.width(),
                        rgba_frame.height(),
                    ),
                    width: rgba_frame.width(),
                    height: rgba_frame.height(),
                    pts_secs,
                }));
            }
        }
        Ok(None)
    }
}

/// Playback state owned by the decoder thread.
#[derive(Debug, Default)]
struct Playback {
    is_playing: bool,
    /// Show the next decoded frame regardless of the clock (first frame,
    /// seek while paused).
    show_next: bool,
    end_of_stream: bool,
    seek_target: Option<f64>,
    pending: Option<DecodedFrame>,
    skipped: u32,
}

fn decoder_loop(
    url: &str,
    mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
    event_tx: &mpsc::Sender<DecoderEvent>,
    clock: &SharedSyncClock,
) -> Result<()> {
    let (mut pipeline, info) = Pipeline::open(url)?;
    tracing::debug!(
        width = info.width,
        height = info.height,
        duration = info.duration_secs,
        has_audio = info.has_audio,
        "video opened"
    );
    if event_tx.blocking_send(DecoderEvent::Opened(info)).is_err() {
        return Ok(());
    }

    let mut playback = Playback {
        show_next: true,
        ..Playback::default()
    };

    loop {
        loop {
            match command_rx.try_recv() {
                Ok(DecoderCommand::Play) => playback.is_playing = true,
                Ok(DecoderCommand::Pause) => playback.is_playing = false,
                Ok(DecoderCommand::Seek { target_secs }) => {
                    pipeline.seek(target_secs)?;
                    playback.pending = None;
                    playback.seek_target = Some(target_secs);
                    playback.show_next = true;
                    playback.end_of_stream = false;
                    playback.skipped = 0;
                }
                Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => {
                    return Ok(());
                }
                Err(mpsc::error::TryRecvError::Empty) => break,
            }
        }

        let wants_frame = playback.is_playing || playback.show_next;
        if playback.pending.is_none() && wants_frame && !playback.end_of_stream {
            match pipeline.next_frame()? {
                Some(frame) => {
                    let before_target = playback
                        .seek_target
                        .is_some_and(|target| frame.pts_secs < target - SEEK_TOLERANCE_SECS);
                    if before_target {
                        continue;
                    }
                    playback.seek_target = None;
                    playback.pending = Some(frame);
                }
                None => {
                    playback.end_of_stream = true;
                    playback.show_next = false;
                    if playback.is_playing {
                        playback.is_playing = false;
                        if event_tx.blocking_send(DecoderEvent::EndOfStream).is_err() {
                            return Ok(());
                        }
                    }
                }
            }
        }

        let Some(frame) = playback.pending.take() else {
            if !wants_frame || playback.end_of_stream {
                std::thread::sleep(POLL_INTERVAL);
            }
            continue;
        };

        let action = if playback.show_next {
            SyncAction::Display
        } else if playback.is_playing {
            calculate_sync_action(frame.pts_secs, clock.current_time_secs())
        } else {
            // Paused with a frame decoded ahead: keep it for later.
            playback.pending = Some(frame);
            std::thread::sleep(POLL_INTERVAL);
            continue;
        };

        match action {
            SyncAction::Display => {
                playback.show_next = false;
                playback.skipped = 0;
                if event_tx.blocking_send(DecoderEvent::Frame(frame)).is_err() {
                    return Ok(());
                }
            }
            SyncAction::Wait(delay) => {
                playback.pending = Some(frame);
                std::thread::sleep(delay.min(POLL_INTERVAL));
            }
            SyncAction::Skip if playback.skipped < MAX_FRAME_SKIP => {
                playback.skipped += 1;
            }
            SyncAction::Skip => {
                playback.skipped = 0;
                if event_tx.blocking_send(DecoderEvent::Frame(frame)).is_err() {
                    return Ok(());
                }
            }
        }
    }
}

/// Copies RGBA rows out of a frame plane, dropping the stride padding.
fn extract_rgba_data(data: &[u8], stride: usize, width: u32, height: u32) -> Vec<u8> {
    let row_bytes = width as usize * 4;
    let mut rgba = Vec::with_capacity(row_bytes * height as usize);
    for row in data.chunks(stride.max(row_bytes)).take(height as usize) {
        rgba.extend_from_slice(&row[..row_bytes.min(row.len())]);
    }
    rgba
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video_player::sync::SyncClock;
    use std::sync::Arc;

    #[test]
    fn stride_padding_is_removed() {
        // 2x2 frame, rows padded to 12 bytes.
        let mut data = Vec::new();
        for row in 0..2u8 {
            data.extend(std::iter::repeat_n(row + 1, 8));
            data.extend([0xEE; 4]);
        }
        let rgba = extract_rgba_data(&data, 12, 2, 2);
        assert_eq!(rgba.len(), 16);
        assert!(rgba[..8].iter().all(|&b| b == 1));
        assert!(rgba[8..].iter().all(|&b| b == 2));
    }

    #[test]
    fn tight_rows_are_copied_as_is() {
        let data: Vec<u8> = (0..16).collect();
        assert_eq!(extract_rgba_data(&data, 8, 2, 2), data);
    }

    #[test]
    fn unreachable_video_reports_an_error() {
        let mut decoder = VideoDecoder::spawn(
            "/nonexistent/memories-bed/clip.mp4".to_string(),
            Arc::new(SyncClock::new()),
        );
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        let event = loop {
            if let Some(event) = decoder.try_recv() {
                break event;
            }
            assert!(std::time::Instant::now() < deadline, "no decoder event");
            std::thread::sleep(Duration::from_millis(10));
        };
        assert!(matches!(event, DecoderEvent::Error(_)));
    }
}
