//! Test helpers for storage integration tests
//!
//! Databases are real `SQLite` files in a temp dir so WAL mode and
//! migrations behave as they do in the app.

#![allow(dead_code)]

use puff_core::{Track, TrackId};
use puff_storage::{Library, SqliteStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub store: SqliteStore,
    temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("puff.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = puff_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");
        puff_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            store: SqliteStore::new(pool),
            temp_dir,
        }
    }

    pub fn library(&self) -> Library {
        Library::new(Arc::new(self.store.clone()))
    }

    /// Directory for media files that lives as long as the database
    pub fn media_dir(&self) -> &Path {
        self.temp_dir.path()
    }
}

/// Track whose audio file does not exist on disk
pub fn test_track(id: &str) -> Track {
    Track::new(
        TrackId::new(id),
        format!("Test Track {id}"),
        PathBuf::from(format!("/nonexistent/puff_music_{id}.mp3")),
    )
    .with_cover(format!("https://img.youtube.com/vi/{id}/maxresdefault.jpg"))
}

/// Track backed by a real audio file of `size` bytes
pub async fn track_with_file(dir: &Path, id: &str, size: usize) -> Track {
    let path = dir.join(format!("puff_music_{id}.mp3"));
    tokio::fs::write(&path, vec![0u8; size])
        .await
        .expect("Failed to write media file");
    Track::new(TrackId::new(id), format!("Test Track {id}"), path)
}
