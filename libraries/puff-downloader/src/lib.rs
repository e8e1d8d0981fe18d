//! Puff Downloader
//!
//! Turns a video-sharing link into a local `Track`: one request to the
//! conversion API, then one or two streamed file downloads.
//!
//! # Features
//!
//! - Audio jobs fetch a single `.mp3`
//! - Video jobs fetch the `.mp4` at a chosen quality, then its audio
//!   rendition, with progress blended into one 0–100 value
//! - Cancellation through `tokio_util::sync::CancellationToken`
//! - Partial and completed files of a failed job are removed
//!
//! # Example
//!
//! ```ignore
//! use puff_downloader::{AcquireRequest, AcquisitionCoordinator, ConverterClient, ConverterConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! let client = ConverterClient::new(ConverterConfig::default())?;
//! let coordinator = AcquisitionCoordinator::new(client, "/data/music");
//!
//! let request = AcquireRequest::audio("https://youtu.be/dQw4w9WgXcQ");
//! let track = coordinator
//!     .acquire(&request, &CancellationToken::new(), |p| println!("{:.0}%", p.percent))
//!     .await?;
//! ```

mod acquire;
mod client;
mod download;
mod error;
mod link;
mod progress;
mod types;

pub use acquire::{AcquisitionCoordinator, FILE_PREFIX};
pub use client::ConverterClient;
pub use download::{download_file, part_path};
pub use error::{AcquireError, Result};
pub use link::{
    cover_url_for, extract_video_id, is_supported_link, secondary_audio_url, title_from_filename,
    PLACEHOLDER_COVER_URL,
};
pub use progress::ProgressBlender;
pub use types::{
    AcquireKind, AcquireProgress, AcquireRequest, Conversion, ConverterConfig, DownloadProgress,
    Phase,
};

// Re-export for callers that only depend on this crate
pub use tokio_util::sync::CancellationToken;
