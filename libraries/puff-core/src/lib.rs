//! Puff Core
//!
//! Platform-agnostic core types, traits, and error handling for Puff.
//!
//! This crate provides the building blocks shared by the storage, playback
//! and downloader crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `TrackId`, `PlaylistId`, `QualityTier`
//! - **Core Traits**: `KeyValueStore`
//! - **Error Handling**: Unified `PuffError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use puff_core::types::{Playlist, Track, TrackId};
//! use std::path::PathBuf;
//!
//! let track = Track::new(
//!     TrackId::generate(),
//!     "My Favorite Song",
//!     PathBuf::from("/music/song.mp3"),
//! );
//!
//! let mut playlist = Playlist::new("Road trip", None);
//! assert!(playlist.insert(track.id.clone()));
//! assert!(!playlist.insert(track.id.clone()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{PuffError, Result};
pub use traits::KeyValueStore;

pub use types::{Playlist, PlaylistId, QualityTier, Track, TrackId, FAVORITES_PLAYLIST_ID};
