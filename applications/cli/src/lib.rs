//! Puff command-line application
//!
//! Wires configuration, the SQLite-backed library and the acquisition
//! coordinator together. `main.rs` only parses arguments and prints.

pub mod config;
pub mod error;

use crate::config::PuffConfig;
use crate::error::Result;
use puff_core::{QualityTier, Track};
use puff_downloader::{
    AcquireProgress, AcquireRequest, AcquisitionCoordinator, CancellationToken, ConverterClient,
};
use puff_storage::{create_pool, run_migrations, Library, SqliteStore, StorageError};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Opened application state
pub struct App {
    pub config: PuffConfig,
    pub library: Library,
    pub acquirer: AcquisitionCoordinator,
}

impl App {
    /// Validate `config`, open the database and prepare the download directory
    pub async fn open(config: PuffConfig) -> Result<Self> {
        config.validate()?;

        tokio::fs::create_dir_all(&config.storage.download_dir).await?;
        if let Some(parent) = sqlite_file_parent(&config.storage.database_url) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let pool = create_pool(&config.storage.database_url)
            .await
            .map_err(StorageError::from)?;
        run_migrations(&pool).await.map_err(StorageError::from)?;
        info!(url = %config.storage.database_url, "Database ready");

        let library = Library::new(Arc::new(SqliteStore::new(pool)));
        let client = ConverterClient::new(config.converter_config())?;
        let acquirer = AcquisitionCoordinator::new(client, config.storage.download_dir.clone());

        Ok(Self {
            config,
            library,
            acquirer,
        })
    }

    /// Acquire `link` and save the resulting track
    ///
    /// `quality` is only used for video; `None` falls back to the configured
    /// default tier.
    pub async fn download<F>(
        &self,
        link: &str,
        video: bool,
        quality: Option<QualityTier>,
        cancel: &CancellationToken,
        on_progress: F,
    ) -> Result<Track>
    where
        F: FnMut(AcquireProgress),
    {
        let request = if video {
            let quality = quality.unwrap_or(self.config.download.default_quality);
            AcquireRequest::video(link, quality)
        } else {
            AcquireRequest::audio(link)
        };

        let track = self.acquirer.acquire(&request, cancel, on_progress).await?;
        self.library.save_track(track.clone()).await?;
        Ok(track)
    }
}

/// Directory holding the database file, for file-backed sqlite URLs
fn sqlite_file_parent(url: &str) -> Option<&Path> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next()?;
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    Path::new(path).parent().filter(|p| !p.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_parent_dir() {
        assert_eq!(
            sqlite_file_parent("sqlite://./data/puff.db"),
            Some(Path::new("./data"))
        );
        assert_eq!(
            sqlite_file_parent("sqlite:/tmp/x/puff.db?mode=rwc"),
            Some(Path::new("/tmp/x"))
        );
        assert_eq!(sqlite_file_parent("sqlite::memory:"), None);
        assert_eq!(sqlite_file_parent("sqlite://puff.db"), None);
    }
}
