//! Playback coordinator
//!
//! Owns the one "now playing" session. Every operation takes the session
//! lock for its whole duration, including the backend awaits, so at most one
//! load is in flight and overlapping calls run one after another in arrival
//! order.

use crate::error::{PlaybackError, Result};
use crate::events::{EventBus, PlaybackEvent};
use crate::queue::PlayQueue;
use crate::source::{MediaBackend, MediaSource, MediaStatus};
use crate::types::{PlayMode, PlaybackConfig, PlaybackSnapshot, PlaybackState, RepeatMode};
use puff_core::{Track, TrackId};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Session {
    current: Option<Track>,
    playing: bool,
    position_ms: u64,
    duration_ms: u64,
    queue: PlayQueue,
    repeat: RepeatMode,
    shuffle: bool,
    mode: PlayMode,
    default_queue: Vec<Track>,
    /// Generation of the source the backend holds
    generation: u64,
    /// Last generation handed to the backend, loaded or not
    loads: u64,
}

impl Session {
    /// Reserve a generation for the next backend load
    fn next_generation(&mut self) -> u64 {
        self.loads += 1;
        self.loads
    }

    fn state(&self) -> PlaybackState {
        match (&self.current, self.playing) {
            (None, _) => PlaybackState::Idle,
            (Some(_), false) => PlaybackState::Paused,
            (Some(_), true) => PlaybackState::Playing,
        }
    }
}

/// Transport controls over a `MediaBackend`
pub struct PlaybackCoordinator<B: MediaBackend> {
    backend: Arc<B>,
    session: Mutex<Session>,
    events: EventBus,
    config: PlaybackConfig,
}

impl<B: MediaBackend + 'static> PlaybackCoordinator<B> {
    pub fn new(backend: Arc<B>, config: PlaybackConfig) -> Self {
        let session = Session {
            repeat: config.repeat,
            shuffle: config.shuffle,
            ..Session::default()
        };

        Self {
            backend,
            session: Mutex::new(session),
            events: EventBus::default(),
            config,
        }
    }

    pub fn backend(&self) -> &Arc<B> {
        &self.backend
    }

    /// Receive session events; replaces any previous subscriber
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<PlaybackEvent> {
        self.events.subscribe()
    }

    /// Queue used by `play` when the caller supplies none (usually the
    /// whole track collection)
    pub async fn set_default_queue(&self, tracks: Vec<Track>) {
        self.session.lock().await.default_queue = tracks;
    }

    // ===== Transport =====

    /// Play `track` in audio mode
    ///
    /// `queue` becomes the active queue; `None` uses the default queue. The
    /// index is the track's first position in the queue, or 0 if it is not
    /// there.
    ///
    /// # Errors
    ///
    /// Backend failures propagate. If loading fails the session keeps its
    /// previous track, queue and index; if the previous track had to be
    /// paused first it stays paused. If the new track loads but does not
    /// start, the session holds it paused.
    pub async fn play(&self, track: Track, queue: Option<Vec<Track>>) -> Result<()> {
        self.play_with_mode(track, queue, PlayMode::Audio).await
    }

    /// Like `play`, loading the chosen rendition
    pub async fn play_with_mode(
        &self,
        track: Track,
        queue: Option<Vec<Track>>,
        mode: PlayMode,
    ) -> Result<()> {
        let mut session = self.session.lock().await;

        let mut queue = queue.unwrap_or_else(|| session.default_queue.clone());
        if queue.is_empty() {
            queue.push(track.clone());
        }
        let index = match queue.iter().position(|t| t.id == track.id) {
            Some(index) => index,
            None => {
                warn!(track_id = %track.id, "Track not in its queue, defaulting to index 0");
                0
            }
        };

        self.load_locked(&mut session, track, mode).await?;
        session.queue = PlayQueue::new(queue, index);
        self.start_locked(&mut session).await
    }

    /// Pause; no-op when nothing is playing
    pub async fn pause(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        if !session.playing {
            return Ok(());
        }

        self.backend.pause().await?;
        session.playing = false;
        self.events.emit(PlaybackEvent::StateChanged {
            state: PlaybackState::Paused,
        });
        Ok(())
    }

    /// Resume the loaded track; no-op when already playing
    ///
    /// # Errors
    ///
    /// Returns `NoTrackLoaded` when the session is idle.
    pub async fn resume(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        if session.current.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        if session.playing {
            return Ok(());
        }

        self.backend.play().await?;
        session.playing = true;
        self.events.emit(PlaybackEvent::StateChanged {
            state: PlaybackState::Playing,
        });
        Ok(())
    }

    /// Advance the queue
    ///
    /// With shuffle on, a random queue entry other than the current one is
    /// chosen; otherwise the index steps forward and wraps. Empty queue is a
    /// no-op.
    #[allow(clippy::should_implement_trait)]
    pub async fn next(&self) -> Result<()> {
        let mut session = self.session.lock().await;
        self.next_locked(&mut session).await
    }

    /// Restart the current track if past the restart threshold, otherwise
    /// step back in the queue (wrapping to the last track)
    pub async fn previous(&self) -> Result<()> {
        let mut session = self.session.lock().await;

        if session.current.is_some() {
            let status = self.backend.status().await?;
            session.position_ms = status.position_ms;

            let threshold = u64::try_from(self.config.restart_threshold.as_millis())
                .unwrap_or(u64::MAX);
            if status.position_ms > threshold {
                debug!(position_ms = status.position_ms, "Restarting current track");
                return self.seek_locked(&mut session, 0).await;
            }
        }

        match session.queue.previous_index() {
            Some(index) => self.play_index_locked(&mut session, index).await,
            None => Ok(()),
        }
    }

    /// Seek within the current track; the backend clamps the position
    pub async fn seek_to(&self, position_ms: u64) -> Result<()> {
        let mut session = self.session.lock().await;
        if session.current.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }
        self.seek_locked(&mut session, position_ms).await
    }

    /// Cycle repeat off → all → one → off, returning the new mode
    pub async fn toggle_repeat(&self) -> RepeatMode {
        let mut session = self.session.lock().await;
        session.repeat = session.repeat.cycle();
        self.events.emit(PlaybackEvent::RepeatChanged {
            mode: session.repeat,
        });
        session.repeat
    }

    /// Flip shuffle, returning the new flag
    pub async fn toggle_shuffle(&self) -> bool {
        let mut session = self.session.lock().await;
        session.shuffle = !session.shuffle;
        self.events.emit(PlaybackEvent::ShuffleChanged {
            enabled: session.shuffle,
        });
        session.shuffle
    }

    /// Reload the current track in another rendition, keeping position and
    /// playing state
    ///
    /// # Errors
    ///
    /// `NoTrackLoaded` when idle, `NoVideo` when switching to video on a
    /// track without a video file, and backend failures. A failed load keeps
    /// the previous mode; once the new rendition is loaded the session
    /// follows it even if seeking or resuming fails.
    pub async fn switch_play_mode(&self, mode: PlayMode) -> Result<()> {
        let mut session = self.session.lock().await;
        let track = session.current.clone().ok_or(PlaybackError::NoTrackLoaded)?;
        if session.mode == mode {
            return Ok(());
        }

        let source = MediaSource::for_track(&track, mode)?;
        let position_ms = self.backend.status().await?.position_ms;
        let was_playing = session.playing;

        info!(track_id = %track.id, ?mode, position_ms, "Switching play mode");

        let generation = session.next_generation();
        self.backend.load(&source, generation).await?;

        // The backend now holds the new rendition, stopped at 0
        session.mode = mode;
        session.generation = generation;
        session.playing = false;
        session.position_ms = 0;
        self.events.emit(PlaybackEvent::ModeChanged { mode });

        let restored = self
            .restore_locked(&mut session, position_ms, was_playing)
            .await;
        if restored.is_err() && was_playing {
            self.events.emit(PlaybackEvent::StateChanged {
                state: PlaybackState::Paused,
            });
        }
        restored
    }

    // ===== Backend notifications =====

    /// Apply a status notification from the backend
    ///
    /// Notifications stamped with an older generation than the loaded source
    /// are ignored. Otherwise mirrors position and duration, and advances the
    /// queue when the track finished: repeat one replays the same track from 0, repeat all or a
    /// non-final index goes to the next track, otherwise playback stops at
    /// the end with the track still loaded.
    pub async fn handle_status(&self, status: MediaStatus) -> Result<()> {
        let mut session = self.session.lock().await;
        let Some(current) = session.current.clone() else {
            return Ok(());
        };
        if status.generation != session.generation {
            debug!(
                generation = status.generation,
                loaded = session.generation,
                "Ignoring status from a replaced source"
            );
            return Ok(());
        }

        session.position_ms = status.position_ms;
        session.duration_ms = status.duration_ms;
        self.events.emit(PlaybackEvent::PositionChanged {
            position_ms: status.position_ms,
            duration_ms: status.duration_ms,
        });

        if !status.just_finished {
            return Ok(());
        }

        debug!(track_id = %current.id, repeat = ?session.repeat, "Track finished");
        self.events.emit(PlaybackEvent::TrackFinished {
            track_id: current.id.clone(),
        });
        // The backend stops by itself at the end of a source
        session.playing = false;

        if session.repeat == RepeatMode::One {
            let mode = session.mode;
            self.load_locked(&mut session, current, mode).await?;
            return self.start_locked(&mut session).await;
        }

        if session.repeat == RepeatMode::All || !session.queue.is_last() {
            return self.next_locked(&mut session).await;
        }

        self.events.emit(PlaybackEvent::StateChanged {
            state: PlaybackState::Paused,
        });
        self.events.emit(PlaybackEvent::QueueEnded);
        info!("Queue ended");
        Ok(())
    }

    /// Feed backend status notifications into `handle_status` until the
    /// sender is dropped
    ///
    /// Errors are logged and emitted as `PlaybackEvent::Error`.
    pub fn spawn_status_pump(self: &Arc<Self>, mut rx: mpsc::Receiver<MediaStatus>) -> JoinHandle<()> {
        let coordinator = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(status) = rx.recv().await {
                if let Err(e) = coordinator.handle_status(status).await {
                    warn!(error = %e, "Failed to handle media status");
                    coordinator.events.emit(PlaybackEvent::Error {
                        message: e.to_string(),
                    });
                }
            }
            debug!("Status pump stopped");
        })
    }

    // ===== Library changes =====

    /// Forget a deleted track
    ///
    /// Removes it from the active and default queues. If it is the current
    /// track the backend is unloaded and the session goes idle; a failed
    /// unload leaves the session untouched. A current track that outlives
    /// every queue entry becomes the whole queue.
    pub async fn remove_track(&self, id: &TrackId) -> Result<()> {
        let mut session = self.session.lock().await;

        let removes_current = session.current.as_ref().is_some_and(|t| &t.id == id);
        if removes_current {
            self.backend.unload().await?;
        }

        session.queue.remove(id);
        session.default_queue.retain(|t| &t.id != id);

        if !removes_current {
            if let Some(current) = session.current.clone() {
                if session.queue.is_empty() {
                    session.queue = PlayQueue::new(vec![current], 0);
                }
            }
            return Ok(());
        }

        session.current = None;
        session.playing = false;
        session.position_ms = 0;
        session.duration_ms = 0;
        session.mode = PlayMode::Audio;
        info!(track_id = %id, "Current track removed, session idle");
        self.events.emit(PlaybackEvent::StateChanged {
            state: PlaybackState::Idle,
        });
        Ok(())
    }

    // ===== Queries =====

    pub async fn snapshot(&self) -> PlaybackSnapshot {
        let session = self.session.lock().await;
        PlaybackSnapshot {
            current_track: session.current.clone(),
            state: session.state(),
            position_ms: session.position_ms,
            duration_ms: session.duration_ms,
            queue_len: session.queue.len(),
            index: session.queue.index(),
            repeat: session.repeat,
            shuffle: session.shuffle,
            mode: session.mode,
        }
    }

    pub async fn current_track(&self) -> Option<Track> {
        self.session.lock().await.current.clone()
    }

    pub async fn queue(&self) -> Vec<Track> {
        self.session.lock().await.queue.tracks().to_vec()
    }

    // ===== Internals (session lock held) =====

    async fn next_locked(&self, session: &mut Session) -> Result<()> {
        let index = if session.shuffle {
            session.queue.shuffle_index(&mut rand::thread_rng())
        } else {
            session.queue.next_index()
        };

        match index {
            Some(index) => self.play_index_locked(session, index).await,
            None => Ok(()),
        }
    }

    async fn play_index_locked(&self, session: &mut Session, index: usize) -> Result<()> {
        let Some(track) = session.queue.get(index).cloned() else {
            return Ok(());
        };
        self.load_locked(session, track, PlayMode::Audio).await?;
        session.queue.set_index(index);
        self.start_locked(session).await
    }

    async fn seek_locked(&self, session: &mut Session, position_ms: u64) -> Result<()> {
        self.backend.seek(position_ms).await?;
        session.position_ms = if session.duration_ms > 0 {
            position_ms.min(session.duration_ms)
        } else {
            position_ms
        };
        self.events.emit(PlaybackEvent::PositionChanged {
            position_ms: session.position_ms,
            duration_ms: session.duration_ms,
        });
        Ok(())
    }

    /// Seek to `position_ms`, then start playback if `resume`
    async fn restore_locked(
        &self,
        session: &mut Session,
        position_ms: u64,
        resume: bool,
    ) -> Result<()> {
        self.seek_locked(session, position_ms).await?;
        if resume {
            self.backend.play().await?;
            session.playing = true;
        }
        Ok(())
    }

    /// Pause whatever is playing, then load `track`
    ///
    /// The session takes the new track, stopped at 0, as soon as the backend
    /// holds it. A failed load leaves the session on its previous track.
    async fn load_locked(&self, session: &mut Session, track: Track, mode: PlayMode) -> Result<()> {
        let source = MediaSource::for_track(&track, mode)?;

        if session.playing {
            self.backend.pause().await?;
            session.playing = false;
            self.events.emit(PlaybackEvent::StateChanged {
                state: PlaybackState::Paused,
            });
        }

        let generation = session.next_generation();
        debug!(track_id = %track.id, path = %source.path().display(), generation, "Loading track");
        if let Err(e) = self.backend.load(&source, generation).await {
            warn!(track_id = %track.id, error = %e, "Failed to load track");
            return Err(e);
        }

        let previous_track_id = session.current.as_ref().map(|t| t.id.clone());
        let status = self.backend.status().await.unwrap_or_default();

        self.events.emit(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });

        session.current = Some(track);
        session.generation = generation;
        session.position_ms = 0;
        session.duration_ms = status.duration_ms;
        session.mode = mode;
        Ok(())
    }

    /// Start the loaded track
    async fn start_locked(&self, session: &mut Session) -> Result<()> {
        self.backend.play().await?;
        session.playing = true;

        if let Some(track) = &session.current {
            info!(track_id = %track.id, title = %track.title, mode = ?session.mode, "Now playing");
        }
        self.events.emit(PlaybackEvent::StateChanged {
            state: PlaybackState::Playing,
        });
        Ok(())
    }
}
