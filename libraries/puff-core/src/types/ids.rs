/// ID types for Puff entities
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Reserved identifier of the implicit favorites playlist
pub const FAVORITES_PLAYLIST_ID: &str = "favorites";

/// Track identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random track ID
    ///
    /// UUID v4, unique across concurrent acquisitions.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TrackId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Playlist identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaylistId(String);

impl PlaylistId {
    /// Create a new playlist ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random playlist ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The reserved favorites playlist ID
    pub fn favorites() -> Self {
        Self(FAVORITES_PLAYLIST_ID.to_string())
    }

    /// Whether this is the reserved favorites playlist ID
    pub fn is_favorites(&self) -> bool {
        self.0 == FAVORITES_PLAYLIST_ID
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_track_ids_are_uuids() {
        let id = TrackId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, TrackId::generate());
    }

    #[test]
    fn track_id_formats_as_file_name_part() {
        let id = TrackId::new("0b6f");
        assert_eq!(format!("puff_music_{id}.mp3"), "puff_music_0b6f.mp3");
    }

    #[test]
    fn generated_playlist_id_is_never_favorites() {
        assert!(PlaylistId::favorites().is_favorites());
        assert!(!PlaylistId::generate().is_favorites());
        assert_eq!(PlaylistId::favorites().to_string(), FAVORITES_PLAYLIST_ID);
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&TrackId::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }
}
