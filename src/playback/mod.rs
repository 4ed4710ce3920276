//! Media transport boundary and playback state
//!
//! The player never decodes video itself. It drives a [`MediaTransport`]
//! (play, pause, seek, volume, rate, fullscreen) and reads back a full
//! [`PlaybackSnapshot`] whenever the transport reports an event.

pub mod observer;
pub mod simulated;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use observer::{Observation, PlaybackObserver, ReadyState};
pub use simulated::SimulatedTransport;

/// A buffered span of media, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

/// Complete playback state at one instant.
///
/// Every snapshot is authoritative; consumers never merge partial updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub is_playing: bool,
    /// Position in seconds
    pub current_time: f64,
    /// Media length in seconds, 0 when unknown
    pub duration: f64,
    /// 0.0 to 1.0
    pub volume: f64,
    pub is_muted: bool,
    pub is_fullscreen: bool,
    pub playback_rate: f64,
    pub buffered: Vec<TimeRange>,
}

impl Default for PlaybackSnapshot {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
            is_muted: false,
            is_fullscreen: false,
            playback_rate: 1.0,
            buffered: Vec::new(),
        }
    }
}

impl PlaybackSnapshot {
    /// End of the furthest buffered range
    pub fn buffered_end(&self) -> f64 {
        self.buffered.iter().map(|r| r.end).fold(0.0, f64::max)
    }
}

/// Events raised by a media transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportEvent {
    /// Duration and dimensions are known
    MetadataLoaded,
    Play,
    Pause,
    /// Playback position moved (playing or seeking)
    TimeUpdate,
    VolumeChange,
    RateChange,
    FullscreenChange,
    /// More media has been buffered
    Progress,
}

/// Control surface over a platform media player
pub trait MediaTransport {
    /// Source the transport was created for
    fn source(&self) -> &str;

    fn play(&mut self);

    fn pause(&mut self);

    /// Move the playhead to `time` seconds (clamped to the media)
    fn seek(&mut self, time: f64);

    /// Set volume in `[0, 1]`
    fn set_volume(&mut self, volume: f64);

    fn set_muted(&mut self, muted: bool);

    /// Set the playback rate multiplier
    fn set_rate(&mut self, rate: f64);

    fn set_fullscreen(&mut self, fullscreen: bool);

    /// Read the complete current state
    fn snapshot(&self) -> PlaybackSnapshot;

    /// Let the transport advance its own clock.
    ///
    /// Platform players run on their own; the default does nothing.
    fn tick(&mut self, _elapsed: Duration) {}

    /// Take every event raised since the last call, in order
    fn drain_events(&mut self) -> Vec<TransportEvent>;

    /// Toggle between playing and paused
    fn toggle_play(&mut self) {
        if self.snapshot().is_playing {
            self.pause();
        } else {
            self.play();
        }
    }
}

/// Format seconds as `m:ss`, or `h:mm:ss` from one hour up
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 { seconds.floor() as u64 } else { 0 };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
