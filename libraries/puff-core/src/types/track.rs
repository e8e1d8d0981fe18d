/// Track domain type
use crate::types::TrackId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A stored playable media item
///
/// The primary file is always the audio rendition. Tracks downloaded as
/// video also carry the video rendition and its quality label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Display title
    pub title: String,

    /// Cover image reference (URL)
    pub cover_url: String,

    /// Audio file used for playback
    pub file_path: PathBuf,

    /// Video rendition, if one was downloaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_path: Option<PathBuf>,

    /// Quality label of the video rendition (e.g. "720p")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_quality: Option<String>,

    /// Duration in milliseconds, 0 until the backend reports it
    #[serde(default)]
    pub duration_ms: u64,

    /// When the track was added
    pub added_at: DateTime<Utc>,
}

impl Track {
    /// Create an audio-only track
    pub fn new(id: TrackId, title: impl Into<String>, file_path: PathBuf) -> Self {
        Self {
            id,
            title: title.into(),
            cover_url: String::new(),
            file_path,
            video_path: None,
            video_quality: None,
            duration_ms: 0,
            added_at: Utc::now(),
        }
    }

    /// Set the cover reference
    #[must_use]
    pub fn with_cover(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = cover_url.into();
        self
    }

    /// Attach a video rendition
    #[must_use]
    pub fn with_video(mut self, video_path: PathBuf, quality: impl Into<String>) -> Self {
        self.video_path = Some(video_path);
        self.video_quality = Some(quality.into());
        self
    }

    /// Whether a video rendition is available
    pub fn has_video(&self) -> bool {
        self.video_path.is_some()
    }

    /// All media files belonging to this track
    pub fn media_files(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.file_path.as_path()).chain(self.video_path.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_track_has_single_media_file() {
        let track = Track::new(TrackId::new("1"), "Song", PathBuf::from("/m/1.mp3"));
        assert!(!track.has_video());
        assert_eq!(track.media_files().count(), 1);
    }

    #[test]
    fn video_track_lists_both_files() {
        let track = Track::new(TrackId::new("1"), "Song", PathBuf::from("/m/1.mp3"))
            .with_video(PathBuf::from("/m/1.mp4"), "720p");

        assert!(track.has_video());
        let files: Vec<_> = track.media_files().collect();
        assert_eq!(files, vec![Path::new("/m/1.mp3"), Path::new("/m/1.mp4")]);
        assert_eq!(track.video_quality.as_deref(), Some("720p"));
    }

    #[test]
    fn audio_track_json_omits_video_fields() {
        let track = Track::new(TrackId::new("1"), "Song", PathBuf::from("/m/1.mp3"));
        let json = serde_json::to_value(&track).unwrap();
        assert!(json.get("video_path").is_none());

        let back: Track = serde_json::from_value(json).unwrap();
        assert_eq!(back, track);
    }
}
