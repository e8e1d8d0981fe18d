//! Track, favorites and playlist collections
//!
//! `Library` is the only writer of the four collections. Every
//! read-modify-write cycle runs under one lock, so a favorites toggle is never
//! observed half-applied: the favorites set and the mirrored favorites
//! playlist are written together in a single `set_many`.

use crate::collections::{self, KEY_FAVORITES, KEY_LAST_PLAYED, KEY_PLAYLISTS, KEY_TRACKS};
use crate::memory::MemoryStore;
use crate::usage::{self, StorageInfo};
use puff_core::{KeyValueStore, Playlist, PlaylistId, PuffError, Result, Track, TrackId};
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Library of downloaded tracks, favorites and playlists
pub struct Library {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl Library {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Library over a fresh `MemoryStore`
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    // ===== Tracks =====

    /// All tracks, newest first
    pub async fn tracks(&self) -> Result<Vec<Track>> {
        collections::load(self.store.as_ref(), KEY_TRACKS).await
    }

    pub async fn track(&self, id: &TrackId) -> Result<Option<Track>> {
        Ok(self.tracks().await?.into_iter().find(|t| &t.id == id))
    }

    /// Add a track at the front of the collection
    pub async fn save_track(&self, track: Track) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut tracks: Vec<Track> = collections::load(self.store.as_ref(), KEY_TRACKS).await?;

        if tracks.iter().any(|t| t.id == track.id) {
            return Err(PuffError::invalid_input(format!(
                "track {} already exists",
                track.id
            )));
        }

        info!(track_id = %track.id, title = %track.title, "Saving track");
        tracks.insert(0, track);
        collections::save(self.store.as_ref(), KEY_TRACKS, &tracks).await
    }

    /// Remove a track and delete its media files
    ///
    /// Playlist and favorites references are left in place; readers skip
    /// ids that no longer resolve.
    pub async fn delete_track(&self, id: &TrackId) -> Result<Track> {
        let removed = {
            let _guard = self.write_lock.lock().await;
            let mut tracks: Vec<Track> =
                collections::load(self.store.as_ref(), KEY_TRACKS).await?;

            let position = tracks
                .iter()
                .position(|t| &t.id == id)
                .ok_or_else(|| PuffError::TrackNotFound(id.clone()))?;
            let removed = tracks.remove(position);

            collections::save(self.store.as_ref(), KEY_TRACKS, &tracks).await?;
            removed
        };

        for path in removed.media_files() {
            match tokio::fs::remove_file(path).await {
                Ok(()) => debug!(path = %path.display(), "Deleted media file"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Failed to delete media file"),
            }
        }

        info!(track_id = %id, "Track deleted");
        Ok(removed)
    }

    // ===== Favorites =====

    pub async fn favorites(&self) -> Result<Vec<TrackId>> {
        collections::load(self.store.as_ref(), KEY_FAVORITES).await
    }

    pub async fn is_favorite(&self, id: &TrackId) -> Result<bool> {
        Ok(self.favorites().await?.contains(id))
    }

    /// Flip a track's favorite status
    ///
    /// Returns `true` if the track is now a favorite. The favorites playlist
    /// is created on the first add and kept, possibly empty, from then on.
    pub async fn toggle_favorite(&self, id: &TrackId) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        self.toggle_favorite_locked(id).await
    }

    async fn toggle_favorite_locked(&self, id: &TrackId) -> Result<bool> {
        let mut favorites: Vec<TrackId> =
            collections::load(self.store.as_ref(), KEY_FAVORITES).await?;
        let mut playlists: Vec<Playlist> =
            collections::load(self.store.as_ref(), KEY_PLAYLISTS).await?;

        let now_favorite = if let Some(pos) = favorites.iter().position(|f| f == id) {
            favorites.remove(pos);
            if let Some(playlist) = playlists.iter_mut().find(|p| p.id.is_favorites()) {
                playlist.remove(id);
            }
            false
        } else {
            favorites.push(id.clone());
            let index = match playlists.iter().position(|p| p.id.is_favorites()) {
                Some(index) => index,
                None => {
                    playlists.push(Playlist::favorites());
                    playlists.len() - 1
                }
            };
            playlists[index].insert(id.clone());
            true
        };

        self.store
            .set_many(&[
                (KEY_FAVORITES, collections::encode(&favorites)?),
                (KEY_PLAYLISTS, collections::encode(&playlists)?),
            ])
            .await?;

        debug!(track_id = %id, favorite = now_favorite, "Favorite toggled");
        Ok(now_favorite)
    }

    // ===== Playlists =====

    pub async fn playlists(&self) -> Result<Vec<Playlist>> {
        collections::load(self.store.as_ref(), KEY_PLAYLISTS).await
    }

    pub async fn playlist(&self, id: &PlaylistId) -> Result<Option<Playlist>> {
        Ok(self.playlists().await?.into_iter().find(|p| &p.id == id))
    }

    pub async fn create_playlist(
        &self,
        name: &str,
        cover_url: Option<String>,
    ) -> Result<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PuffError::invalid_input("playlist name cannot be empty"));
        }

        let _guard = self.write_lock.lock().await;
        let mut playlists = self.playlists().await?;
        let playlist = Playlist::new(name, cover_url);
        playlists.push(playlist.clone());
        collections::save(self.store.as_ref(), KEY_PLAYLISTS, &playlists).await?;

        info!(playlist_id = %playlist.id, name = %playlist.name, "Playlist created");
        Ok(playlist)
    }

    pub async fn update_playlist_cover(&self, id: &PlaylistId, cover_url: &str) -> Result<()> {
        self.modify_playlist(id, |playlist| {
            playlist.cover_url = Some(cover_url.to_string());
            Ok(true)
        })
        .await
        .map(|_| ())
    }

    pub async fn rename_playlist(&self, id: &PlaylistId, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PuffError::invalid_input("playlist name cannot be empty"));
        }
        self.modify_playlist(id, |playlist| {
            playlist.name = name.to_string();
            Ok(true)
        })
        .await
        .map(|_| ())
    }

    /// Delete a playlist
    ///
    /// The favorites playlist mirrors the favorites set and cannot be
    /// deleted on its own.
    pub async fn delete_playlist(&self, id: &PlaylistId) -> Result<()> {
        if id.is_favorites() {
            return Err(PuffError::invalid_input(
                "the favorites playlist cannot be deleted",
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut playlists = self.playlists().await?;
        let before = playlists.len();
        playlists.retain(|p| &p.id != id);
        if playlists.len() == before {
            return Err(PuffError::PlaylistNotFound(id.clone()));
        }

        collections::save(self.store.as_ref(), KEY_PLAYLISTS, &playlists).await?;
        info!(playlist_id = %id, "Playlist deleted");
        Ok(())
    }

    /// Add a track to a playlist
    ///
    /// Returns `false` if the track was already in the playlist. Adding to
    /// the favorites playlist marks the track as a favorite.
    pub async fn add_to_playlist(&self, playlist_id: &PlaylistId, track_id: &TrackId) -> Result<bool> {
        if self.track(track_id).await?.is_none() {
            return Err(PuffError::TrackNotFound(track_id.clone()));
        }

        if playlist_id.is_favorites() {
            let _guard = self.write_lock.lock().await;
            if self.is_favorite(track_id).await? {
                return Ok(false);
            }
            return self.toggle_favorite_locked(track_id).await;
        }

        self.modify_playlist(playlist_id, |playlist| Ok(playlist.insert(track_id.clone())))
            .await
    }

    /// Remove a track from a playlist
    ///
    /// Returns `false` if the track was not in the playlist. Removing from
    /// the favorites playlist un-favorites the track.
    pub async fn remove_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        track_id: &TrackId,
    ) -> Result<bool> {
        if playlist_id.is_favorites() {
            let _guard = self.write_lock.lock().await;
            if !self.is_favorite(track_id).await? {
                return Ok(false);
            }
            return self.toggle_favorite_locked(track_id).await.map(|now| !now);
        }

        self.modify_playlist(playlist_id, |playlist| Ok(playlist.remove(track_id)))
            .await
    }

    /// Tracks of a playlist in display order
    ///
    /// Ids that no longer resolve to a stored track are skipped.
    pub async fn playlist_tracks(&self, playlist_id: &PlaylistId) -> Result<Vec<Track>> {
        let playlist = self
            .playlist(playlist_id)
            .await?
            .ok_or_else(|| PuffError::PlaylistNotFound(playlist_id.clone()))?;
        let tracks = self.tracks().await?;

        Ok(playlist
            .track_ids
            .iter()
            .filter_map(|id| tracks.iter().find(|t| &t.id == id).cloned())
            .collect())
    }

    /// Apply `change` to one playlist and save if it reports a modification
    async fn modify_playlist<F>(&self, id: &PlaylistId, change: F) -> Result<bool>
    where
        F: FnOnce(&mut Playlist) -> Result<bool>,
    {
        let _guard = self.write_lock.lock().await;
        let mut playlists = self.playlists().await?;
        let playlist = playlists
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| PuffError::PlaylistNotFound(id.clone()))?;

        let changed = change(playlist)?;
        if changed {
            collections::save(self.store.as_ref(), KEY_PLAYLISTS, &playlists).await?;
        }
        Ok(changed)
    }

    // ===== Last played =====

    pub async fn set_last_played(&self, id: &TrackId) -> Result<()> {
        self.store.set(KEY_LAST_PLAYED, id.as_str()).await
    }

    pub async fn last_played(&self) -> Result<Option<TrackId>> {
        Ok(self.store.get(KEY_LAST_PLAYED).await?.map(TrackId::new))
    }

    // ===== Maintenance =====

    /// Forget every collection
    ///
    /// Media files on disk are left alone.
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.store
            .remove(&[KEY_TRACKS, KEY_FAVORITES, KEY_PLAYLISTS, KEY_LAST_PLAYED])
            .await?;
        info!("Library cleared");
        Ok(())
    }

    pub async fn storage_info(&self) -> Result<StorageInfo> {
        let tracks = self.tracks().await?;
        Ok(usage::measure(&tracks).await)
    }
}
