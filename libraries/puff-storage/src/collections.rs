//! Collection keys and (de)serialization helpers

use crate::error::StorageError;
use puff_core::{KeyValueStore, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Track collection (newest first)
pub const KEY_TRACKS: &str = "puff.tracks";

/// Favorite track ids
pub const KEY_FAVORITES: &str = "puff.favorites";

/// Playlists, including the favorites playlist
pub const KEY_PLAYLISTS: &str = "puff.playlists";

/// Id of the last played track
pub const KEY_LAST_PLAYED: &str = "puff.last_played";

/// Read a whole collection, empty if nothing is stored yet
pub(crate) async fn load<T>(store: &dyn KeyValueStore, key: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    match store.get(key).await? {
        Some(raw) => Ok(serde_json::from_str(&raw).map_err(StorageError::from)?),
        None => Ok(Vec::new()),
    }
}

pub(crate) fn encode<T>(items: &[T]) -> Result<String>
where
    T: Serialize,
{
    Ok(serde_json::to_string(items).map_err(StorageError::from)?)
}

/// Replace a whole collection
pub(crate) async fn save<T>(store: &dyn KeyValueStore, key: &str, items: &[T]) -> Result<()>
where
    T: Serialize,
{
    store.set(key, &encode(items)?).await
}
