//! Puff Playback
//!
//! The "now playing" session for Puff: which track is loaded, the queue it
//! was started from, repeat and shuffle modes, and audio/video switching.
//!
//! # Architecture
//!
//! - **One session**: `PlaybackCoordinator` owns it behind an async lock,
//!   so operations never interleave and only one load is in flight
//! - **Backend trait**: the platform player implements `MediaBackend`
//! - **Push status**: backend notifications arrive over a channel drained by
//!   `spawn_status_pump`, which advances the queue on track completion
//! - **Events**: session changes go to a single subscriber
//!
//! # Example
//!
//! ```rust,no_run
//! use puff_playback::{MediaBackend, PlaybackConfig, PlaybackCoordinator};
//! use puff_core::Track;
//! use std::sync::Arc;
//!
//! # async fn example<B: MediaBackend + 'static>(backend: B, tracks: Vec<Track>) -> puff_playback::Result<()> {
//! let coordinator = Arc::new(PlaybackCoordinator::new(Arc::new(backend), PlaybackConfig::default()));
//! coordinator.set_default_queue(tracks.clone()).await;
//!
//! coordinator.play(tracks[0].clone(), None).await?;
//! coordinator.next().await?;
//! coordinator.toggle_repeat().await;
//! # Ok(())
//! # }
//! ```

pub mod coordinator;
pub mod error;
pub mod events;
pub mod queue;
pub mod source;
pub mod types;

pub use coordinator::PlaybackCoordinator;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use queue::PlayQueue;
pub use source::{MediaBackend, MediaSource, MediaStatus};
pub use types::{format_time, PlayMode, PlaybackConfig, PlaybackSnapshot, PlaybackState, RepeatMode};
