// SPDX-License-Identifier: MPL-2.0
//! [`PlaybackElement`] backed by the FFmpeg decoder threads.
//!
//! The element owns the video thread, the audio thread (spawned once the
//! container reports an audio track), the shared clock and the audio
//! controls. Decoder events are translated into [`MediaEvent`]s when the
//! transport drains them, so the transport sees the same event stream as
//! with any other element.

use super::audio::{AudioCommand, AudioDecoder};
use super::audio_output::AudioControls;
use super::decoder::{DecoderCommand, DecoderEvent, VideoDecoder};
use super::sync::{SharedSyncClock, SyncClock};
use crate::media::{ImageData, MediaEvent, PlaybackElement};
use std::collections::VecDeque;
use std::sync::Arc;

/// Decoder-backed playable element for one video URL.
#[derive(Debug)]
pub struct DecoderElement {
    url: String,
    video: VideoDecoder,
    audio: Option<AudioDecoder>,
    clock: SharedSyncClock,
    controls: Arc<AudioControls>,
    /// Known once the container is opened.
    duration_secs: Option<f64>,
    position_secs: f64,
    playing: bool,
    /// Play requested before the metadata arrived.
    play_requested: bool,
    awaiting_frame: bool,
    failed: bool,
    frame: Option<ImageData>,
    events: VecDeque<MediaEvent>,
}

impl DecoderElement {
    /// Starts opening `url` in the background.
    #[must_use]
    pub fn open(url: impl Into<String>) -> Self {
        let url = url.into();
        let clock: SharedSyncClock = Arc::new(SyncClock::new());
        let video = VideoDecoder::spawn(url.clone(), Arc::clone(&clock));
        Self {
            url,
            video,
            audio: None,
            clock,
            controls: Arc::new(AudioControls::new(1.0, false)),
            duration_secs: None,
            position_secs: 0.0,
            playing: false,
            play_requested: false,
            awaiting_frame: true,
            failed: false,
            frame: None,
            events: VecDeque::new(),
        }
    }

    fn emit(&mut self, event: MediaEvent) {
        self.events.push_back(event);
    }

    fn send_audio(&self, command: AudioCommand) {
        if let Some(audio) = &self.audio {
            audio.send(command);
        }
    }

    fn seek(&mut self, position_secs: f64) {
        self.clock.seek(position_secs);
        self.video.send(DecoderCommand::Seek {
            target_secs: position_secs,
        });
        self.send_audio(AudioCommand::Seek {
            target_secs: position_secs,
        });
        self.position_secs = position_secs;
        self.awaiting_frame = true;
        self.emit(MediaEvent::TimeUpdate { position_secs });
    }

    fn stop_playing(&mut self) {
        self.clock.pause();
        self.controls.set_paused(true);
        self.video.send(DecoderCommand::Pause);
        self.send_audio(AudioCommand::Pause);
        self.playing = false;
    }

    fn apply(&mut self, event: DecoderEvent) {
        match event {
            DecoderEvent::Opened(info) => {
                self.duration_secs = Some(info.duration_secs.max(0.0));
                self.emit(MediaEvent::LoadedMetadata {
                    duration_secs: info.duration_secs.max(0.0),
                });
                if info.has_audio {
                    self.audio = Some(AudioDecoder::spawn(
                        self.url.clone(),
                        Arc::clone(&self.controls),
                    ));
                }
                if std::mem::take(&mut self.play_requested) {
                    self.play();
                }
            }
            DecoderEvent::Frame(frame) => {
                self.awaiting_frame = false;
                self.frame = Some(ImageData::from_rgba(frame.width, frame.height, frame.rgba));
                if self.playing {
                    let duration = self.duration_secs.unwrap_or(frame.pts_secs);
                    self.position_secs = frame.pts_secs.clamp(0.0, duration.max(0.0));
                    self.emit(MediaEvent::TimeUpdate {
                        position_secs: self.position_secs,
                    });
                }
            }
            DecoderEvent::EndOfStream => {
                self.awaiting_frame = false;
                if self.playing {
                    self.stop_playing();
                    let end = self.duration_secs.unwrap_or(self.position_secs);
                    self.position_secs = end;
                    self.emit(MediaEvent::TimeUpdate { position_secs: end });
                    self.emit(MediaEvent::Pause);
                    self.emit(MediaEvent::Ended);
                }
            }
            DecoderEvent::Error(message) => {
                if self.playing {
                    self.stop_playing();
                    self.emit(MediaEvent::Pause);
                }
                self.failed = true;
                self.awaiting_frame = false;
                self.audio = None;
                self.emit(MediaEvent::Error { message });
            }
        }
    }
}

impl PlaybackElement for DecoderElement {
    fn play(&mut self) {
        if self.failed || self.playing {
            return;
        }
        let Some(duration) = self.duration_secs else {
            self.play_requested = true;
            return;
        };
        if duration > 0.0 && self.position_secs >= duration {
            self.seek(0.0);
        }
        self.clock.resume();
        self.controls.set_paused(false);
        self.video.send(DecoderCommand::Play);
        self.send_audio(AudioCommand::Play);
        self.playing = true;
        self.emit(MediaEvent::Play);
    }

    fn pause(&mut self) {
        self.play_requested = false;
        if !self.playing {
            return;
        }
        self.stop_playing();
        self.position_secs = self.clock.current_time_secs();
        self.emit(MediaEvent::Pause);
    }

    fn set_position(&mut self, position_secs: f64) {
        let Some(duration) = self.duration_secs else {
            return;
        };
        if self.failed || !position_secs.is_finite() {
            return;
        }
        self.seek(position_secs.clamp(0.0, duration));
    }

    fn set_volume(&mut self, volume: f32) {
        self.controls.set_volume(volume);
        self.emit(MediaEvent::VolumeChange {
            volume: self.controls.volume(),
            muted: self.controls.is_muted(),
        });
    }

    fn set_muted(&mut self, muted: bool) {
        self.controls.set_muted(muted);
        self.emit(MediaEvent::VolumeChange {
            volume: self.controls.volume(),
            muted,
        });
    }

    fn take_events(&mut self) -> Vec<MediaEvent> {
        while let Some(event) = self.video.try_recv() {
            self.apply(event);
        }
        self.events.drain(..).collect()
    }

    fn take_frame(&mut self) -> Option<ImageData> {
        self.frame.take()
    }

    fn is_busy(&self) -> bool {
        !self.failed && (self.duration_secs.is_none() || self.awaiting_frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn drain_until_error(element: &mut DecoderElement) -> Vec<MediaEvent> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut events = Vec::new();
        while Instant::now() < deadline {
            events.extend(element.take_events());
            if events.iter().any(|e| matches!(e, MediaEvent::Error { .. })) {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        events
    }

    #[test]
    fn unreachable_url_reports_error_and_goes_inert() {
        let mut element = DecoderElement::open("/nonexistent/memories-bed/clip.mp4");
        assert!(element.is_busy());

        let events = drain_until_error(&mut element);
        assert!(matches!(events.last(), Some(MediaEvent::Error { .. })));
        assert!(!element.is_busy());

        element.play();
        element.set_position(3.0);
        assert!(element.take_events().is_empty());
    }

    #[test]
    fn commands_before_metadata_are_deferred() {
        let mut element = DecoderElement::open("/nonexistent/memories-bed/clip.mp4");
        element.play();
        element.set_position(12.0);
        let events = element.take_events();
        assert!(!events.iter().any(|e| matches!(
            e,
            MediaEvent::Play | MediaEvent::TimeUpdate { .. }
        )));
    }

    #[test]
    fn volume_changes_are_reported_immediately() {
        let mut element = DecoderElement::open("/nonexistent/memories-bed/clip.mp4");
        element.set_volume(0.4);
        element.set_muted(true);
        let volume_events: Vec<_> = element
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, MediaEvent::VolumeChange { .. }))
            .collect();
        assert_eq!(
            volume_events,
            vec![
                MediaEvent::VolumeChange {
                    volume: 0.4,
                    muted: false
                },
                MediaEvent::VolumeChange {
                    volume: 0.4,
                    muted: true
                },
            ]
        );
    }
}
