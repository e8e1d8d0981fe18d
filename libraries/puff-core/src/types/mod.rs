mod ids;
mod playlist;
mod quality;
mod track;

pub use ids::{PlaylistId, TrackId, FAVORITES_PLAYLIST_ID};
pub use playlist::{Playlist, FAVORITES_PLAYLIST_NAME};
pub use quality::QualityTier;
pub use track::Track;
