//! Clock-driven transport for terminals
//!
//! A terminal has nowhere to render video, so this transport plays a
//! silent timeline of the lesson's length: position advances by
//! `elapsed * rate` while playing and the usual transport events are
//! raised as it goes. A source with no known length never loads.

use std::time::Duration;

use super::{MediaTransport, PlaybackSnapshot, TimeRange, TransportEvent};

/// How far ahead of the playhead the simulated buffer runs, in seconds of media
const READ_AHEAD_SECONDS: f64 = 30.0;

/// A simulated media player
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    source: String,
    /// Length to report once loaded; `None` means the source never loads
    media_duration: Option<f64>,
    loaded: bool,
    position: f64,
    playing: bool,
    volume: f64,
    muted: bool,
    fullscreen: bool,
    rate: f64,
    buffered_end: f64,
    pending: Vec<TransportEvent>,
}

impl SimulatedTransport {
    /// Create a transport for `source`. Metadata arrives on the first tick.
    pub fn new(source: impl Into<String>, media_duration: Option<f64>) -> Self {
        Self {
            source: source.into(),
            media_duration: media_duration.filter(|d| d.is_finite() && *d > 0.0),
            loaded: false,
            position: 0.0,
            playing: false,
            volume: 1.0,
            muted: false,
            fullscreen: false,
            rate: 1.0,
            buffered_end: 0.0,
            pending: Vec::new(),
        }
    }

    fn duration(&self) -> f64 {
        if self.loaded { self.media_duration.unwrap_or(0.0) } else { 0.0 }
    }

    fn grow_buffer(&mut self) {
        let target = (self.position + READ_AHEAD_SECONDS).min(self.duration());
        if target > self.buffered_end {
            self.buffered_end = target;
            self.pending.push(TransportEvent::Progress);
        }
    }
}

impl MediaTransport for SimulatedTransport {
    fn source(&self) -> &str {
        &self.source
    }

    fn play(&mut self) {
        if !self.loaded || self.playing {
            return;
        }
        // Playing from the end starts over, like a browser player
        if self.position >= self.duration() {
            self.position = 0.0;
        }
        self.playing = true;
        self.pending.push(TransportEvent::Play);
    }

    fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.pending.push(TransportEvent::Pause);
        }
    }

    fn seek(&mut self, time: f64) {
        if !self.loaded || !time.is_finite() {
            return;
        }
        self.position = time.clamp(0.0, self.duration());
        self.pending.push(TransportEvent::TimeUpdate);
        self.grow_buffer();
    }

    fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
        self.muted = self.volume == 0.0;
        self.pending.push(TransportEvent::VolumeChange);
    }

    fn set_muted(&mut self, muted: bool) {
        if self.muted != muted {
            self.muted = muted;
            self.pending.push(TransportEvent::VolumeChange);
        }
    }

    fn set_rate(&mut self, rate: f64) {
        if rate.is_finite() && rate > 0.0 && rate != self.rate {
            self.rate = rate;
            self.pending.push(TransportEvent::RateChange);
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if self.fullscreen != fullscreen {
            self.fullscreen = fullscreen;
            self.pending.push(TransportEvent::FullscreenChange);
        }
    }

    fn snapshot(&self) -> PlaybackSnapshot {
        let buffered = if self.buffered_end > 0.0 {
            vec![TimeRange { start: 0.0, end: self.buffered_end }]
        } else {
            Vec::new()
        };

        PlaybackSnapshot {
            is_playing: self.playing,
            current_time: self.position,
            duration: self.duration(),
            volume: self.volume,
            is_muted: self.muted,
            is_fullscreen: self.fullscreen,
            playback_rate: self.rate,
            buffered,
        }
    }

    fn tick(&mut self, elapsed: Duration) {
        if !self.loaded {
            if self.media_duration.is_some() {
                self.loaded = true;
                self.pending.push(TransportEvent::MetadataLoaded);
                self.grow_buffer();
            }
            return;
        }

        if !self.playing {
            return;
        }

        let duration = self.duration();
        self.position = (self.position + elapsed.as_secs_f64() * self.rate).min(duration);
        self.pending.push(TransportEvent::TimeUpdate);
        self.grow_buffer();

        if self.position >= duration {
            self.playing = false;
            self.pending.push(TransportEvent::Pause);
        }
    }

    fn drain_events(&mut self) -> Vec<TransportEvent> {
        std::mem::take(&mut self.pending)
    }
}
