//! Error types for playback control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Media backend refused to load a source
    #[error("Media load error: {0}")]
    MediaLoad(String),

    /// Media backend failed a transport command (play, pause, seek)
    #[error("Media backend error: {0}")]
    Backend(String),

    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Video mode requested for a track without a video rendition
    #[error("Track {0} has no video file")]
    NoVideo(puff_core::TrackId),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

impl From<PlaybackError> for puff_core::PuffError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::MediaLoad(msg) => Self::MediaLoad(msg),
            other => Self::Playback(other.to_string()),
        }
    }
}
