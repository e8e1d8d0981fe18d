//! Puff Storage
//!
//! Persistence for the track collection, favorites, playlists and the
//! last-played track.
//!
//! # Architecture
//!
//! - **Opaque store**: everything goes through `puff_core::KeyValueStore`;
//!   each logical collection is one JSON value under a fixed key
//! - **Whole-collection writes**: callers read a collection, mutate it in
//!   memory and write it back
//! - **Backends**: `SqliteStore` for the app, `MemoryStore` for tests and
//!   throwaway sessions
//!
//! # Example
//!
//! ```rust,no_run
//! use puff_storage::{create_pool, run_migrations, Library, SqliteStore};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://puff.db").await?;
//! run_migrations(&pool).await?;
//!
//! let library = Library::new(Arc::new(SqliteStore::new(pool)));
//! let tracks = library.tracks().await?;
//! # Ok(())
//! # }
//! ```

mod collections;
mod error;
mod kv;
mod library;
mod memory;
mod usage;

pub use collections::{KEY_FAVORITES, KEY_LAST_PLAYED, KEY_PLAYLISTS, KEY_TRACKS};
pub use error::StorageError;
pub use kv::SqliteStore;
pub use library::Library;
pub use memory::MemoryStore;
pub use usage::{format_bytes, StorageInfo};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use tracing::debug;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://puff.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    debug!(url = %database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    // In-memory databases are per-connection, so keep exactly one
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    debug!("SQLite pool ready");

    Ok(pool)
}
