//! Error types for acquisition jobs.

use thiserror::Error;

/// Errors that can occur while turning a link into a stored track.
#[derive(Error, Debug)]
pub enum AcquireError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Conversion API returned a non-success status
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Conversion API response is missing the link or file name
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Link is not from a supported host
    #[error("Unsupported link: {0}")]
    InvalidLink(String),

    /// Primary file download failed
    #[error("Download failed: {0}")]
    Download(String),

    /// Audio rendition download failed after the video download succeeded
    #[error("Secondary fetch failed: {0}")]
    SecondaryFetch(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error while writing a download
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Job was cancelled by the caller
    #[error("Acquisition cancelled")]
    Cancelled,
}

/// Result type for acquisition operations.
pub type Result<T> = std::result::Result<T, AcquireError>;

impl From<AcquireError> for puff_core::PuffError {
    fn from(err: AcquireError) -> Self {
        use puff_core::PuffError;

        match err {
            AcquireError::Backend { status, message } => PuffError::Backend { status, message },
            AcquireError::InvalidResponse(msg) => PuffError::InvalidResponse(msg),
            AcquireError::InvalidLink(msg) | AcquireError::Config(msg) => {
                PuffError::InvalidInput(msg)
            }
            AcquireError::SecondaryFetch(msg) => PuffError::SecondaryFetch(msg),
            AcquireError::Cancelled => PuffError::Cancelled,
            AcquireError::Io(e) => PuffError::Io(e),
            other @ (AcquireError::Request(_) | AcquireError::Download(_)) => {
                PuffError::Download(other.to_string())
            }
        }
    }
}
