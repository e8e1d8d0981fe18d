//! Playback events
//!
//! Session changes are pushed to a single subscriber over an unbounded
//! channel. Subscribing again replaces the previous receiver.

use crate::types::{PlayMode, PlaybackState, RepeatMode};
use puff_core::TrackId;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;

/// Events emitted by the playback coordinator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PlaybackEvent {
    /// Transport state changed
    StateChanged {
        /// The new state
        state: PlaybackState,
    },

    /// A different track was loaded
    TrackChanged {
        /// ID of the new track
        track_id: TrackId,
        /// ID of the track it replaced
        previous_track_id: Option<TrackId>,
    },

    /// Position update from the backend or a seek
    PositionChanged {
        /// Current position
        position_ms: u64,
        /// Track duration, 0 while unknown
        duration_ms: u64,
    },

    /// Track reached its end
    TrackFinished {
        /// ID of the finished track
        track_id: TrackId,
    },

    /// Last track finished with repeat off
    QueueEnded,

    /// Repeat mode changed
    RepeatChanged {
        /// The new mode
        mode: RepeatMode,
    },

    /// Shuffle toggled
    ShuffleChanged {
        /// Whether shuffle is now on
        enabled: bool,
    },

    /// Audio/video rendition switched
    ModeChanged {
        /// The loaded rendition
        mode: PlayMode,
    },

    /// Error while handling a backend notification
    Error {
        /// Error message
        message: String,
    },
}

/// Single-subscriber event sender
#[derive(Debug, Default)]
pub(crate) struct EventBus {
    sender: Mutex<Option<mpsc::UnboundedSender<PlaybackEvent>>>,
}

impl EventBus {
    pub(crate) fn subscribe(&self) -> mpsc::UnboundedReceiver<PlaybackEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.sender.lock().unwrap_or_else(PoisonError::into_inner) = Some(tx);
        rx
    }

    pub(crate) fn emit(&self, event: PlaybackEvent) {
        let mut sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(tx) = sender.as_ref() {
            if tx.send(event).is_err() {
                // Receiver dropped
                *sender = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_without_subscriber_is_noop() {
        let bus = EventBus::default();
        bus.emit(PlaybackEvent::QueueEnded);
    }

    #[test]
    fn resubscribe_replaces_receiver() {
        let bus = EventBus::default();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        bus.emit(PlaybackEvent::QueueEnded);

        assert_eq!(second.try_recv().unwrap(), PlaybackEvent::QueueEnded);
        assert!(first.try_recv().is_err());
    }

    #[test]
    fn event_serialization() {
        let event = PlaybackEvent::RepeatChanged { mode: RepeatMode::All };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"RepeatChanged":{"mode":"all"}}"#);
    }
}
