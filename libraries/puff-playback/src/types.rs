//! Core types for playback control

use puff_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the queue ends
    #[default]
    Off,

    /// Loop the entire queue
    All,

    /// Loop the current track only
    One,
}

impl RepeatMode {
    /// Next mode in the off → all → one → off cycle
    pub fn cycle(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::Off,
        }
    }
}

/// Which rendition of the current track is loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    /// Audio file (every track has one)
    #[default]
    Audio,

    /// Secondary video file
    Video,
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track loaded
    Idle,

    /// Track loaded, not playing
    Paused,

    /// Currently playing
    Playing,
}

/// Point-in-time copy of the playback session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    /// Loaded track, if any
    pub current_track: Option<Track>,

    /// Transport state
    pub state: PlaybackState,

    /// Last known position
    pub position_ms: u64,

    /// Duration reported by the backend, 0 while unknown
    pub duration_ms: u64,

    /// Number of tracks in the active queue
    pub queue_len: usize,

    /// Index of the current track within the queue
    pub index: usize,

    /// Repeat mode
    pub repeat: RepeatMode,

    /// Shuffle flag
    pub shuffle: bool,

    /// Loaded rendition
    pub mode: PlayMode,
}

/// Configuration for the playback coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// `previous()` restarts the current track past this position (default: 3s)
    pub restart_threshold: Duration,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            restart_threshold: Duration::from_secs(3),
            repeat: RepeatMode::Off,
            shuffle: false,
        }
    }
}

/// Format milliseconds as `m:ss`
pub fn format_time(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycle() {
        assert_eq!(RepeatMode::Off.cycle(), RepeatMode::All);
        assert_eq!(RepeatMode::All.cycle(), RepeatMode::One);
        assert_eq!(RepeatMode::One.cycle(), RepeatMode::Off);
    }

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.restart_threshold, Duration::from_secs(3));
        assert_eq!(config.repeat, RepeatMode::Off);
        assert!(!config.shuffle);
    }

    #[test]
    fn format_time_pads_seconds() {
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(5_400), "0:05");
        assert_eq!(format_time(65_000), "1:05");
        assert_eq!(format_time(3_600_000), "60:00");
    }
}
