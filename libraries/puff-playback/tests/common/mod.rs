//! Recording media backend shared by the playback tests

#![allow(dead_code)]

use async_trait::async_trait;
use puff_core::{Track, TrackId};
use puff_playback::{MediaBackend, MediaSource, MediaStatus, PlaybackError, Result};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

/// Backend call, in the order the coordinator made it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Load(MediaSource),
    Play,
    Pause,
    Seek(u64),
    Unload,
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    loaded: Option<MediaSource>,
    playing: bool,
    position_ms: u64,
    duration_ms: u64,
    generation: u64,
    fail_loads: bool,
    fail_plays: bool,
    fail_seeks: bool,
    fail_unloads: bool,
}

/// Mock backend that records every call and keeps a simple player state
#[derive(Debug, Default)]
pub struct MockBackend {
    state: Mutex<State>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn loaded(&self) -> Option<MediaSource> {
        self.state().loaded.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.state().playing
    }

    /// Pretend playback has advanced
    pub fn set_position(&self, position_ms: u64) {
        self.state().position_ms = position_ms;
    }

    /// Make every `load` fail until reset
    pub fn fail_loads(&self, fail: bool) {
        self.state().fail_loads = fail;
    }

    pub fn fail_plays(&self, fail: bool) {
        self.state().fail_plays = fail;
    }

    pub fn fail_seeks(&self, fail: bool) {
        self.state().fail_seeks = fail;
    }

    pub fn fail_unloads(&self, fail: bool) {
        self.state().fail_unloads = fail;
    }

    /// Generation of the loaded source
    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    /// End-of-track notification for the loaded source
    pub fn finished(&self) -> MediaStatus {
        finished_at(self.generation())
    }
}

#[async_trait]
impl MediaBackend for MockBackend {
    async fn load(&self, source: &MediaSource, generation: u64) -> Result<()> {
        let mut state = self.state();
        state.calls.push(Call::Load(source.clone()));
        if state.fail_loads {
            return Err(PlaybackError::MediaLoad(format!(
                "cannot open {}",
                source.path().display()
            )));
        }
        state.loaded = Some(source.clone());
        state.generation = generation;
        state.playing = false;
        state.position_ms = 0;
        state.duration_ms = 180_000;
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        let mut state = self.state();
        state.calls.push(Call::Play);
        if state.fail_plays {
            return Err(PlaybackError::Backend("output device unavailable".to_string()));
        }
        state.playing = true;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        let mut state = self.state();
        state.calls.push(Call::Pause);
        state.playing = false;
        Ok(())
    }

    async fn seek(&self, position_ms: u64) -> Result<()> {
        let mut state = self.state();
        state.calls.push(Call::Seek(position_ms));
        if state.fail_seeks {
            return Err(PlaybackError::Backend("seek not supported".to_string()));
        }
        state.position_ms = position_ms.min(state.duration_ms);
        Ok(())
    }

    async fn status(&self) -> Result<MediaStatus> {
        let state = self.state();
        Ok(MediaStatus {
            loaded: state.loaded.is_some(),
            playing: state.playing,
            position_ms: state.position_ms,
            duration_ms: state.duration_ms,
            just_finished: false,
            generation: state.generation,
        })
    }

    async fn unload(&self) -> Result<()> {
        let mut state = self.state();
        state.calls.push(Call::Unload);
        if state.fail_unloads {
            return Err(PlaybackError::Backend("player busy".to_string()));
        }
        state.loaded = None;
        state.playing = false;
        Ok(())
    }
}

pub fn track(id: &str) -> Track {
    Track::new(
        TrackId::new(id),
        format!("Track {id}"),
        PathBuf::from(format!("/music/puff_music_{id}.mp3")),
    )
}

pub fn video_track(id: &str) -> Track {
    track(id).with_video(PathBuf::from(format!("/music/puff_music_{id}.mp4")), "720p")
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

/// End-of-track notification for the source loaded with `generation`
pub fn finished_at(generation: u64) -> MediaStatus {
    MediaStatus {
        loaded: true,
        playing: false,
        position_ms: 180_000,
        duration_ms: 180_000,
        just_finished: true,
        generation,
    }
}
