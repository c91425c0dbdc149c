// SPDX-License-Identifier: MPL-2.0
//! Audio output through the default device (cpal).
//!
//! Decoded samples are queued in a shared buffer that the device callback
//! drains. Volume, mute and pause live in [`AudioControls`] so the UI thread
//! can change them without going through the decoder thread.

use crate::error::{Error, Result};
use crate::ui::state::Volume;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

/// Live output controls shared between the element and the device callback.
#[derive(Debug)]
pub struct AudioControls {
    /// Volume stored as f32 bits.
    volume: AtomicU32,
    muted: AtomicBool,
    paused: AtomicBool,
}

impl AudioControls {
    #[must_use]
    pub fn new(volume: f32, muted: bool) -> Self {
        Self {
            volume: AtomicU32::new(Volume::new(volume).value().to_bits()),
            muted: AtomicBool::new(muted),
            paused: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume.load(Ordering::Relaxed))
    }

    pub fn set_volume(&self, volume: f32) {
        self.volume
            .store(Volume::new(volume).value().to_bits(), Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    /// Gain applied to samples, zero when muted.
    #[must_use]
    pub fn gain(&self) -> f32 {
        if self.is_muted() {
            0.0
        } else {
            Volume::new(self.volume()).gain()
        }
    }
}

type SampleBuffer = Arc<Mutex<VecDeque<f32>>>;

/// An open output stream on the default device.
///
/// `cpal::Stream` is not `Send`; the output lives on the thread that
/// created it.
pub struct AudioOutput {
    buffer: SampleBuffer,
    sample_rate: u32,
    channels: u16,
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Opens the default output device and starts its stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Video`] if there is no output device, its
    /// configuration cannot be read, or the stream fails to start.
    pub fn new(controls: Arc<AudioControls>) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Video("No audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Video(format!("Failed to get audio config: {e}")))?;

        let sample_rate = supported_config.sample_rate();
        let channels = supported_config.channels();

        let buffer: SampleBuffer = Arc::new(Mutex::new(VecDeque::new()));

        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(
                &device,
                &supported_config.into(),
                Arc::clone(&buffer),
                controls,
            )?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(
                &device,
                &supported_config.into(),
                Arc::clone(&buffer),
                controls,
            )?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(
                &device,
                &supported_config.into(),
                Arc::clone(&buffer),
                controls,
            )?,
            _ => return Err(Error::Video("Unsupported audio sample format".to_string())),
        };

        stream
            .play()
            .map_err(|e| Error::Video(format!("Failed to start audio stream: {e}")))?;

        Ok(Self {
            buffer,
            sample_rate,
            channels,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        buffer: SampleBuffer,
        controls: Arc<AudioControls>,
    ) -> Result<cpal::Stream> {
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    if controls.is_paused() {
                        data.fill(T::from_sample(0.0f32));
                        return;
                    }
                    let Ok(mut queued) = buffer.lock() else {
                        data.fill(T::from_sample(0.0f32));
                        return;
                    };
                    let gain = controls.gain();
                    for sample in data.iter_mut() {
                        let value = queued.pop_front().unwrap_or(0.0);
                        *sample = T::from_sample(mix_sample(value, gain));
                    }
                },
                |err| {
                    tracing::warn!(%err, "audio output error");
                },
                None,
            )
            .map_err(|e| Error::Video(format!("Failed to build audio stream: {e}")))
    }

    /// Appends interleaved samples to the playback queue.
    pub fn queue(&self, samples: &[f32]) {
        if let Ok(mut queued) = self.buffer.lock() {
            queued.extend(samples);
        }
    }

    /// Drops everything still queued (used on seek).
    pub fn clear(&self) {
        if let Ok(mut queued) = self.buffer.lock() {
            queued.clear();
        }
    }

    /// Seconds of audio waiting in the queue.
    #[must_use]
    pub fn buffered_secs(&self) -> f64 {
        let queued = self.buffer.lock().map_or(0, |queued| queued.len());
        buffered_secs(queued, self.sample_rate, self.channels)
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[must_use]
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

/// Applies `gain` and clamps to a range every sample format can represent.
fn mix_sample(value: f32, gain: f32) -> f32 {
    (value * gain).clamp(-1.0, 0.999_999_9)
}

fn buffered_secs(samples: usize, sample_rate: u32, channels: u16) -> f64 {
    let per_second = f64::from(sample_rate) * f64::from(channels);
    if per_second > 0.0 {
        samples as f64 / per_second
    } else {
        0.0
    }
}
