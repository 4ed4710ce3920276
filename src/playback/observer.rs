//! Playback state observer
//!
//! Turns transport events into complete snapshots and tracks whether the
//! media has become ready. Readiness is a one-way latch; a source that
//! never reports metadata is reported as stalled once the grace period
//! runs out, and nothing is retried.

use std::time::Duration;

use super::{MediaTransport, PlaybackSnapshot, TransportEvent};

/// Whether the media can be controlled yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Waiting for metadata; controls are disabled
    Loading,
    /// Metadata received; controls are live
    Ready,
    /// Still waiting after the grace period
    Stalled,
}

/// Result of observing one transport event
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub event: TransportEvent,
    pub snapshot: PlaybackSnapshot,
    /// True only for the event that first made the media ready
    pub became_ready: bool,
}

/// Derives a snapshot from the transport on every event
#[derive(Debug, Clone)]
pub struct PlaybackObserver {
    ready: bool,
    waited: Duration,
    stall_timeout: Duration,
    latest: PlaybackSnapshot,
}

impl PlaybackObserver {
    pub fn new(stall_timeout: Duration) -> Self {
        Self {
            ready: false,
            waited: Duration::ZERO,
            stall_timeout,
            latest: PlaybackSnapshot::default(),
        }
    }

    /// Observe one event, replacing the previous snapshot
    pub fn observe<T: MediaTransport + ?Sized>(
        &mut self,
        event: TransportEvent,
        transport: &T,
    ) -> Observation {
        let became_ready = event == TransportEvent::MetadataLoaded && !self.ready;
        if became_ready {
            self.ready = true;
            tracing::debug!("Media ready: {}", transport.source());
        }

        self.latest = transport.snapshot();
        Observation { event, snapshot: self.latest.clone(), became_ready }
    }

    /// Account for time spent waiting on the source
    pub fn note_elapsed(&mut self, elapsed: Duration) {
        if !self.ready {
            let was_stalled = self.is_stalled();
            self.waited = self.waited.saturating_add(elapsed);
            if !was_stalled && self.is_stalled() {
                tracing::warn!("Media has not loaded after {:?}", self.waited);
            }
        }
    }

    fn is_stalled(&self) -> bool {
        !self.ready && self.waited >= self.stall_timeout
    }

    pub fn ready_state(&self) -> ReadyState {
        if self.ready {
            ReadyState::Ready
        } else if self.is_stalled() {
            ReadyState::Stalled
        } else {
            ReadyState::Loading
        }
    }

    /// Transport controls are only usable once the media is ready
    pub fn controls_enabled(&self) -> bool {
        self.ready
    }

    /// Most recent snapshot
    pub fn latest(&self) -> &PlaybackSnapshot {
        &self.latest
    }
}
