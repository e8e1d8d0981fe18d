//! Media backend abstraction
//!
//! The device's decoder and renderer sit behind `MediaBackend`. The
//! coordinator only ever talks to it through this trait, so tests drive it
//! with a recording mock and apps plug in their platform player.

use crate::error::{PlaybackError, Result};
use crate::types::PlayMode;
use async_trait::async_trait;
use puff_core::Track;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A loadable media file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// Audio-only file
    Audio(PathBuf),

    /// Video file (carries its own audio track)
    Video(PathBuf),
}

impl MediaSource {
    /// Source for `track` in the given mode
    ///
    /// # Errors
    ///
    /// Returns `NoVideo` if video mode is requested for a track without a
    /// video file.
    pub fn for_track(track: &Track, mode: PlayMode) -> Result<Self> {
        match mode {
            PlayMode::Audio => Ok(Self::Audio(track.file_path.clone())),
            PlayMode::Video => track
                .video_path
                .clone()
                .map(Self::Video)
                .ok_or_else(|| PlaybackError::NoVideo(track.id.clone())),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Audio(path) | Self::Video(path) => path,
        }
    }

    pub fn mode(&self) -> PlayMode {
        match self {
            Self::Audio(_) => PlayMode::Audio,
            Self::Video(_) => PlayMode::Video,
        }
    }
}

/// Status reported by the media backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaStatus {
    /// A source is loaded
    pub loaded: bool,

    /// The source is playing
    pub playing: bool,

    /// Current position
    pub position_ms: u64,

    /// Source duration, 0 while unknown
    pub duration_ms: u64,

    /// Set once when the source reaches its end
    pub just_finished: bool,

    /// Generation the source was loaded with
    pub generation: u64,
}

/// Platform media player
///
/// Holds at most one loaded source; `load` replaces whatever was loaded.
/// Status changes are pushed separately through a channel handed to
/// `PlaybackCoordinator::spawn_status_pump`, each stamped with the
/// generation of the source it describes. Notifications from an older
/// generation are dropped by the coordinator.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Load a source, replacing the current one. Does not start playback.
    async fn load(&self, source: &MediaSource, generation: u64) -> Result<()>;

    async fn play(&self) -> Result<()>;

    async fn pause(&self) -> Result<()>;

    /// Seek within the loaded source; the backend clamps out-of-range positions
    async fn seek(&self, position_ms: u64) -> Result<()>;

    async fn status(&self) -> Result<MediaStatus>;

    /// Drop the loaded source
    async fn unload(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use puff_core::TrackId;

    #[test]
    fn source_for_track() {
        let track = Track::new(TrackId::new("t"), "Song", PathBuf::from("/m/t.mp3"));
        assert_eq!(
            MediaSource::for_track(&track, PlayMode::Audio).unwrap(),
            MediaSource::Audio(PathBuf::from("/m/t.mp3"))
        );
        assert!(matches!(
            MediaSource::for_track(&track, PlayMode::Video),
            Err(PlaybackError::NoVideo(_))
        ));

        let track = track.with_video(PathBuf::from("/m/t.mp4"), "720p");
        let video = MediaSource::for_track(&track, PlayMode::Video).unwrap();
        assert_eq!(video.path(), Path::new("/m/t.mp4"));
        assert_eq!(video.mode(), PlayMode::Video);
    }
}
