// SPDX-License-Identifier: MPL-2.0
//! Audio decoder thread.
//!
//! Opens its own input on the video URL, decodes the best audio stream,
//! resamples it to the output device format and keeps a short lookahead
//! queued on the device. Videos without an audio track end the thread
//! quietly; audio failures are logged and never stop the picture.

use super::audio_output::{AudioControls, AudioOutput};
use crate::config::AUDIO_LOOKAHEAD_SECS;
use crate::error::{Error, Result};
use crate::media::video::{open_input, timestamp_secs};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Idle wait between command polls.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Commands sent to the audio thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    Play,
    Pause,
    Seek { target_secs: f64 },
    Stop,
}

/// Handle on a running audio thread. Dropping it stops the thread.
#[derive(Debug)]
pub struct AudioDecoder {
    command_tx: mpsc::UnboundedSender<AudioCommand>,
}

impl AudioDecoder {
    /// Spawns the audio thread for `url`.
    #[must_use]
    pub fn spawn(url: String, controls: Arc<AudioControls>) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let spawned = std::thread::Builder::new()
            .name("audio-decoder".to_string())
            .spawn(move || {
                if let Err(err) = decoder_loop(&url, command_rx, &controls) {
                    tracing::warn!(%err, "audio playback stopped");
                }
            });
        if let Err(err) = spawned {
            tracing::warn!(%err, "failed to spawn audio decoder");
        }
        Self { command_tx }
    }

    /// Sends a command; a stopped thread ignores it.
    pub fn send(&self, command: AudioCommand) {
        let _ = self.command_tx.send(command);
    }
}

impl Drop for AudioDecoder {
    fn drop(&mut self) {
        let _ = self.command_tx.send(AudioCommand::Stop);
    }
}

fn decoder_loop(
    url: &str,
    mut command_rx: mpsc::UnboundedReceiver<AudioCommand>,
    controls: &Arc<AudioControls>,
) -> Result<()> {
    let mut ictx = open_input(url)?;

    let Some(input) = ictx.streams().best(ffmpeg_next::media::Type::Audio) else {
        tracing::debug!("video has no audio track");
        return Ok(());
    };
    let audio_stream_index = input.index();
    let time_base = input.time_base();

    let context_decoder = ffmpeg_next::codec::context::Context::from_parameters(input.parameters())
        .map_err(|e| Error::Video(format!("Failed to create audio codec context: {e}")))?;
    let mut decoder = context_decoder
        .decoder()
        .audio()
        .map_err(|e| Error::Video(format!("Failed to create audio decoder: {e}")))?;

    // The stream is created on this thread and stays here.
    let output = AudioOutput::new(Arc::clone(controls))?;
    let device_channels = output.channels();
    let output_channels = device_channels.min(2);
    let output_layout = match output_channels {
        1 => ffmpeg_next::ChannelLayout::MONO,
        _ => ffmpeg_next::ChannelLayout::STEREO,
    };

    let mut resampler = ffmpeg_next::software::resampling::Context::get(
        decoder.format(),
        decoder.channel_layout(),
        decoder.rate(),
        ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
        output_layout,
        output.sample_rate(),
    )
    .map_err(|e| Error::Video(format!("Failed to create resampler: {e}")))?;

    let mut is_playing = false;
    let mut end_of_stream = false;
    let mut seek_target: Option<f64> = None;

    loop {
        loop {
            match command_rx.try_recv() {
                Ok(AudioCommand::Play) => is_playing = true,
                Ok(AudioCommand::Pause) => is_playing = false,
                Ok(AudioCommand::Seek { target_secs }) => {
                    let timestamp = (target_secs.max(0.0) * 1_000_000.0) as i64;
                    match ictx.seek(timestamp, ..timestamp) {
                        Ok(()) => {
                            decoder.flush();
                            output.clear();
                            seek_target = Some(target_secs);
                            end_of_stream = false;
                        }
                        Err(err) => tracing::debug!(%err, "audio seek failed"),
                    }
                }
                Ok(AudioCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => {
                    return Ok(());
                }
                Err(mpsc::error::TryRecvError::Empty) => break,
            }
        }

        if !is_playing || end_of_stream || output.buffered_secs() >= AUDIO_LOOKAHEAD_SECS {
            std::thread::sleep(POLL_INTERVAL);
            continue;
        }

        let mut frame_decoded = false;
        for (stream, packet) in ictx.packets() {
            if stream.index() != audio_stream_index {
                continue;
            }
            if decoder.send_packet(&packet).is_err() {
                continue;
            }

            let mut decoded = ffmpeg_next::frame::Audio::empty();
            if decoder.receive_frame(&mut decoded).is_ok() {
                let mut resampled = ffmpeg_next::frame::Audio::empty();
                if let Err(err) = resampler.run(&decoded, &mut resampled) {
                    tracing::debug!(%err, "audio resampling failed");
                    continue;
                }
                let samples = extract_samples(resampled.data(0), resampled.samples(), output_channels);

                let pts_secs = decoded
                    .timestamp()
                    .map_or(0.0, |pts| timestamp_secs(pts, time_base));
                let frame_secs = samples.len() as f64
                    / (f64::from(output.sample_rate()) * f64::from(output_channels));

                match seek_target {
                    Some(target) if pts_secs + frame_secs < target => {}
                    _ => {
                        seek_target = None;
                        output.queue(&spread_channels(samples, output_channels, device_channels));
                    }
                }
                frame_decoded = true;
                break;
            }
        }

        if !frame_decoded {
            end_of_stream = true;
        }
    }
}

/// Reads interleaved little-endian f32 samples from a packed frame plane.
fn extract_samples(data: &[u8], frame_samples: usize, channels: u16) -> Vec<f32> {
    data.chunks_exact(4)
        .take(frame_samples * usize::from(channels))
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}

/// Maps mono/stereo frames onto a device with more channels; the extra
/// channels stay silent.
fn spread_channels(samples: Vec<f32>, from: u16, to: u16) -> Vec<f32> {
    if from == 0 || to <= from {
        return samples;
    }
    let mut spread = Vec::with_capacity(samples.len() / usize::from(from) * usize::from(to));
    for frame in samples.chunks_exact(usize::from(from)) {
        spread.extend_from_slice(frame);
        spread.extend(std::iter::repeat_n(0.0, usize::from(to - from)));
    }
    spread
}
