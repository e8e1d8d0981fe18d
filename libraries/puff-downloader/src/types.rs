//! Types for the conversion API and acquisition jobs.

use puff_core::QualityTier;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Conversion API endpoints and HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Endpoint returning an audio file link
    pub audio_endpoint: String,
    /// Endpoint returning a video file link
    pub video_endpoint: String,
    /// Timeout for the conversion request (not the file downloads)
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            audio_endpoint: "https://www.youtubemp3.ltd/convert".to_string(),
            video_endpoint: "https://www.youtubemp3.ltd/convert-video".to_string(),
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("Puff/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ConverterConfig {
    /// Both endpoints pointing at `base_url` (`/convert`, `/convert-video`)
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            audio_endpoint: format!("{base}/convert"),
            video_endpoint: format!("{base}/convert-video"),
            ..Self::default()
        }
    }
}

/// Raw conversion API response. Both fields are required in practice but
/// checked after parsing so a missing one is an `InvalidResponse`, not a
/// parse failure.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ConvertResponse {
    pub filename: Option<String>,
    pub link: Option<String>,
}

/// A successful conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// File name reported by the backend, e.g. `Song Title.mp3`
    pub file_name: String,
    /// Transport link for the converted file
    pub link: String,
}

/// What to fetch for a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireKind {
    /// Audio file only
    Audio,
    /// Video file at the given quality, plus its audio rendition
    Video { quality: QualityTier },
}

impl AcquireKind {
    pub fn is_video(self) -> bool {
        matches!(self, Self::Video { .. })
    }
}

/// One acquisition job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquireRequest {
    pub link: String,
    pub kind: AcquireKind,
}

impl AcquireRequest {
    pub fn audio(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            kind: AcquireKind::Audio,
        }
    }

    pub fn video(link: impl Into<String>, quality: QualityTier) -> Self {
        Self {
            link: link.into(),
            kind: AcquireKind::Video { quality },
        }
    }
}

/// Phase of an acquisition job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Converting,
    FetchingPrimary,
    FetchingSecondary,
    Done,
    Failed,
}

/// Progress report for a whole job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcquireProgress {
    pub phase: Phase,
    /// Blended progress, 0.0 to 100.0, never decreasing within a job
    pub percent: f32,
}

/// Progress of a single file download.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DownloadProgress {
    pub bytes_received: u64,
    pub bytes_total: Option<u64>,
    /// 0.0 to 1.0; stays 0.0 when the total size is unknown
    pub fraction: f32,
}
