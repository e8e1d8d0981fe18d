//! Active play queue
//!
//! Index-based: the queue never reorders, shuffle only picks which index
//! plays next.

use puff_core::{Track, TrackId};
use rand::Rng;

/// Ordered tracks being stepped through plus the current position
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    tracks: Vec<Track>,
    index: usize,
}

impl PlayQueue {
    /// Create a queue positioned at `index`
    ///
    /// An out-of-range index is clamped to the last track.
    pub fn new(tracks: Vec<Track>, index: usize) -> Self {
        let index = index.min(tracks.len().saturating_sub(1));
        Self { tracks, index }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Move to `index` (ignored if out of range)
    pub fn set_index(&mut self, index: usize) {
        if index < self.tracks.len() {
            self.index = index;
        }
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.tracks.len()
    }

    /// Index after the current one, wrapping to 0
    pub fn next_index(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        Some((self.index + 1) % self.tracks.len())
    }

    /// Index before the current one, wrapping to the last track
    pub fn previous_index(&self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        let len = self.tracks.len();
        Some((self.index + len - 1) % len)
    }

    /// Random index, different from the current one when there is a choice
    pub fn shuffle_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        match self.tracks.len() {
            0 => None,
            1 => Some(0),
            len => {
                let pick = rng.gen_range(0..len - 1);
                Some(if pick >= self.index { pick + 1 } else { pick })
            }
        }
    }

    /// Drop every entry for `id`, keeping the index on the same track
    ///
    /// Returns the number of entries removed.
    pub fn remove(&mut self, id: &TrackId) -> usize {
        let before_current = self.tracks[..self.index.min(self.tracks.len())]
            .iter()
            .filter(|t| &t.id == id)
            .count();
        let before = self.tracks.len();
        self.tracks.retain(|t| &t.id != id);

        self.index = self
            .index
            .saturating_sub(before_current)
            .min(self.tracks.len().saturating_sub(1));
        before - self.tracks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tracks(ids: &[&str]) -> Vec<Track> {
        ids.iter()
            .map(|id| Track::new(TrackId::new(*id), *id, PathBuf::from(format!("/m/{id}.mp3"))))
            .collect()
    }

    #[test]
    fn stepping_wraps() {
        let queue = PlayQueue::new(tracks(&["a", "b", "c"]), 2);
        assert_eq!(queue.next_index(), Some(0));
        assert_eq!(queue.previous_index(), Some(1));

        let queue = PlayQueue::new(tracks(&["a", "b", "c"]), 0);
        assert_eq!(queue.previous_index(), Some(2));
    }

    #[test]
    fn empty_queue_has_no_neighbours() {
        let queue = PlayQueue::default();
        assert_eq!(queue.next_index(), None);
        assert_eq!(queue.previous_index(), None);
        assert_eq!(queue.shuffle_index(&mut rand::thread_rng()), None);
    }

    #[test]
    fn shuffle_avoids_current_track() {
        let mut rng = rand::thread_rng();
        let queue = PlayQueue::new(tracks(&["a", "b", "c", "d"]), 1);
        for _ in 0..200 {
            let pick = queue.shuffle_index(&mut rng).unwrap();
            assert!(pick < 4);
            assert_ne!(pick, 1);
        }
        let single = PlayQueue::new(tracks(&["a"]), 0);
        assert_eq!(single.shuffle_index(&mut rng), Some(0));
    }

    #[test]
    fn remove_keeps_current_track() {
        let mut queue = PlayQueue::new(tracks(&["a", "b", "c", "b"]), 2);
        assert_eq!(queue.remove(&TrackId::new("b")), 2);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.get(queue.index()).unwrap().id, TrackId::new("c"));
    }

    #[test]
    fn remove_last_entry_clamps_index() {
        let mut queue = PlayQueue::new(tracks(&["a", "b"]), 1);
        queue.remove(&TrackId::new("b"));
        assert_eq!(queue.index(), 0);

        queue.remove(&TrackId::new("a"));
        assert!(queue.is_empty());
        assert_eq!(queue.index(), 0);
    }
}
