/// Playlist domain type
use crate::types::{PlaylistId, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name of the favorites playlist
pub const FAVORITES_PLAYLIST_NAME: &str = "Favorites";

/// Playlist
///
/// Track ids are kept in insertion order and never duplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: PlaylistId,

    /// Playlist name
    pub name: String,

    /// Track ids in display order
    #[serde(default)]
    pub track_ids: Vec<TrackId>,

    /// Cover image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Playlist {
    /// Create a new playlist
    pub fn new(name: impl Into<String>, cover_url: Option<String>) -> Self {
        Self::with_id(PlaylistId::generate(), name, cover_url)
    }

    /// Create a playlist with a specific ID
    pub fn with_id(id: PlaylistId, name: impl Into<String>, cover_url: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            track_ids: Vec::new(),
            cover_url,
            created_at: Utc::now(),
        }
    }

    /// Create the reserved favorites playlist
    pub fn favorites() -> Self {
        Self::with_id(PlaylistId::favorites(), FAVORITES_PLAYLIST_NAME, None)
    }

    /// Whether the playlist contains the track
    pub fn contains(&self, track_id: &TrackId) -> bool {
        self.track_ids.contains(track_id)
    }

    /// Append a track, unless it is already present
    ///
    /// Returns `true` if the track was added.
    pub fn insert(&mut self, track_id: TrackId) -> bool {
        if self.contains(&track_id) {
            return false;
        }
        self.track_ids.push(track_id);
        true
    }

    /// Remove a track
    ///
    /// Returns `true` if the track was present.
    pub fn remove(&mut self, track_id: &TrackId) -> bool {
        let before = self.track_ids.len();
        self.track_ids.retain(|id| id != track_id);
        self.track_ids.len() != before
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.track_ids.len()
    }

    /// Whether the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.track_ids.is_empty()
    }
}
