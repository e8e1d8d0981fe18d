/// Core error types for Puff
use crate::types::{PlaylistId, TrackId};
use thiserror::Error;

/// Result type alias using `PuffError`
pub type Result<T> = std::result::Result<T, PuffError>;

/// Core error type for Puff
///
/// Every crate-level error converts into this type so the presentation
/// layer has a single error to turn into a user-facing message.
#[derive(Error, Debug)]
pub enum PuffError {
    /// Persistence read/write failure
    #[error("Store error: {0}")]
    Store(String),

    /// Conversion API answered with a non-success status
    #[error("Backend error ({status}): {message}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Message from the response body, or the status reason
        message: String,
    },

    /// Conversion API answer is missing required fields
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Primary file download failed
    #[error("Download failed: {0}")]
    Download(String),

    /// Audio rendition download failed after the video download succeeded
    #[error("Secondary fetch failed: {0}")]
    SecondaryFetch(String),

    /// Media backend refused to load a source
    #[error("Media load error: {0}")]
    MediaLoad(String),

    /// Playback control failure other than loading
    #[error("Playback error: {0}")]
    Playback(String),

    /// Operation was cancelled by the caller
    #[error("Operation cancelled")]
    Cancelled,

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl PuffError {
    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the user can simply retry the action that failed
    ///
    /// Nothing in Puff is process-fatal; only invalid input needs the user
    /// to change something before retrying.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Self::InvalidInput(_) | Self::TrackNotFound(_) | Self::PlaylistNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_message_includes_status() {
        let err = PuffError::Backend {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Backend error (502): bad gateway");
        assert!(err.is_retryable());
    }

    #[test]
    fn invalid_input_is_not_retryable() {
        assert!(!PuffError::invalid_input("empty name").is_retryable());
        assert!(!PuffError::TrackNotFound(TrackId::new("x")).is_retryable());
    }
}
