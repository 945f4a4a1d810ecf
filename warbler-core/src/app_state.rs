use std::time::Duration;

use rand::Rng;
use warbler_state::Track;

use crate::{History, LikedSongs, PlaylistSet};

/// The engine's single in-memory state. Mutated only by the session's event
/// handlers; the discipline is "mutate, then push".
pub struct AppState {
    /// The ordered sequence currently being traversed.
    pub playlist: Vec<Track>,
    /// Index of the in-focus track. In bounds whenever the playlist is
    /// non-empty.
    pub current_idx: usize,
    /// Predicted up-next tracks, distinct from the active playlist.
    pub queue: Vec<Track>,
    pub is_shuffle: bool,
    pub is_autoplay: bool,

    pub history: History,
    pub liked: LikedSongs,
    pub playlists: PlaylistSet,

    /// Mirror of the transport's playback offset.
    pub position: Duration,
    /// Duration of the loaded track, when known.
    pub duration: Option<Duration>,
    pub paused: bool,
    /// The elapsed-seconds value of the last periodic checkpoint.
    pub(crate) last_checkpoint_secs: Option<u64>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            playlist: vec![],
            current_idx: 0,
            queue: vec![],
            is_shuffle: false,
            is_autoplay: true,
            history: History::new(),
            liked: LikedSongs::new(),
            playlists: PlaylistSet::with_default(),
            position: Duration::ZERO,
            duration: None,
            paused: true,
            last_checkpoint_secs: None,
        }
    }
}

/// Where the next playback transition should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Advance {
    /// Jump straight to a playlist index.
    Index(usize),
    /// Consume the head of the predicted queue.
    QueueHead,
}

impl AppState {
    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.current_idx)
    }

    /// The next-transition rule. Priority order: shuffle jump, queue head,
    /// sequential advance, wrap to the start. Shuffle deliberately takes
    /// precedence over a populated queue: it expresses explicit user intent
    /// to override prediction.
    pub(crate) fn next_advance(&self, rng: &mut impl Rng) -> Option<Advance> {
        if self.is_shuffle && !self.playlist.is_empty() {
            Some(Advance::Index(rng.random_range(0..self.playlist.len())))
        } else if !self.queue.is_empty() {
            Some(Advance::QueueHead)
        } else if self.playlist.is_empty() {
            None
        } else if self.current_idx + 1 < self.playlist.len() {
            Some(Advance::Index(self.current_idx + 1))
        } else {
            Some(Advance::Index(0))
        }
    }

    /// The previous-transition rule: step back, or wrap to the last index.
    pub(crate) fn prev_index(&self) -> Option<usize> {
        if self.playlist.is_empty() {
            None
        } else if self.current_idx > 0 {
            Some(self.current_idx - 1)
        } else {
            Some(self.playlist.len() - 1)
        }
    }

    /// Consume a queue entry: remove it from the queue and splice it into
    /// the playlist immediately after the current index. Returns the new
    /// current index, which points at the spliced track.
    pub(crate) fn consume_queue(&mut self, queue_idx: usize) -> Option<usize> {
        if queue_idx >= self.queue.len() {
            return None;
        }
        let track = self.queue.remove(queue_idx);
        Some(self.splice_after_current(track))
    }

    /// Splice a track immediately after the current index and focus it.
    /// Returns the new current index.
    pub(crate) fn splice_after_current(&mut self, track: Track) -> usize {
        let insert_at = if self.playlist.is_empty() {
            0
        } else {
            self.current_idx + 1
        };
        self.playlist.insert(insert_at, track);
        self.current_idx = insert_at;
        insert_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use warbler_state::TrackId;

    fn track(id: &str) -> Track {
        Track {
            id: TrackId(id.to_string()),
            name: format!("Track {id}"),
            primary_artists: "Test Artist".to_string(),
            image: vec![],
            duration: None,
        }
    }

    fn state_with_playlist(ids: &[&str], current_idx: usize) -> AppState {
        AppState {
            playlist: ids.iter().map(|id| track(id)).collect(),
            current_idx,
            ..AppState::default()
        }
    }

    /// Emulates a `next()` transition against the pure rules.
    fn advance(state: &mut AppState, rng: &mut impl Rng) {
        match state.next_advance(rng) {
            Some(Advance::Index(idx)) => state.current_idx = idx,
            Some(Advance::QueueHead) => {
                state.consume_queue(0);
            }
            None => {}
        }
    }

    #[test]
    fn next_wraps_at_last_index() {
        let mut state = state_with_playlist(&["a", "b", "c"], 2);
        let mut rng = StdRng::seed_from_u64(0);
        advance(&mut state, &mut rng);
        assert_eq!(state.current_idx, 0);
    }

    #[test]
    fn next_advances_sequentially() {
        let mut state = state_with_playlist(&["a", "b", "c"], 0);
        let mut rng = StdRng::seed_from_u64(0);
        advance(&mut state, &mut rng);
        assert_eq!(state.current_idx, 1);
    }

    #[test]
    fn shuffle_always_lands_in_bounds() {
        let mut state = state_with_playlist(&["a", "b", "c", "d", "e"], 0);
        state.is_shuffle = true;
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            advance(&mut state, &mut rng);
            assert!(state.current_idx < state.playlist.len());
        }
    }

    #[test]
    fn shuffle_takes_precedence_over_queue() {
        let mut state = state_with_playlist(&["a", "b"], 0);
        state.is_shuffle = true;
        state.queue = vec![track("q1")];
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            state.next_advance(&mut rng),
            Some(Advance::Index(_))
        ));
        assert_eq!(state.queue.len(), 1);
    }

    #[test]
    fn queue_is_consumed_in_order_before_sequential_advance() {
        let mut state = state_with_playlist(&["a"], 0);
        state.queue = vec![track("q1"), track("q2"), track("q3")];
        let mut rng = StdRng::seed_from_u64(0);

        for expected in ["q1", "q2", "q3"] {
            advance(&mut state, &mut rng);
            assert_eq!(state.current_track().unwrap().id.as_str(), expected);
        }
        assert!(state.queue.is_empty());

        // Queue exhausted: the next transition falls back to the playlist.
        advance(&mut state, &mut rng);
        assert_eq!(state.current_idx, 0);
    }

    #[test]
    fn consume_queue_splices_after_current() {
        let mut state = state_with_playlist(&["a", "b", "c"], 1);
        state.queue = vec![track("q1"), track("q2")];
        let playlist_len = state.playlist.len();
        let queue_len = state.queue.len();

        let new_idx = state.consume_queue(1).unwrap();

        assert_eq!(state.queue.len(), queue_len - 1);
        assert_eq!(state.playlist.len(), playlist_len + 1);
        assert_eq!(new_idx, 2);
        assert_eq!(state.current_idx, 2);
        assert_eq!(state.playlist[2].id.as_str(), "q2");
    }

    #[test]
    fn consume_queue_out_of_bounds_is_noop() {
        let mut state = state_with_playlist(&["a"], 0);
        assert!(state.consume_queue(0).is_none());
        assert_eq!(state.playlist.len(), 1);
    }

    #[test]
    fn splice_into_empty_playlist() {
        let mut state = AppState::default();
        let idx = state.splice_after_current(track("x"));
        assert_eq!(idx, 0);
        assert_eq!(state.current_track().unwrap().id.as_str(), "x");
    }

    #[test]
    fn prev_steps_back_and_wraps() {
        let mut state = state_with_playlist(&["a", "b", "c"], 2);
        assert_eq!(state.prev_index(), Some(1));
        state.current_idx = 0;
        assert_eq!(state.prev_index(), Some(2));
    }

    #[test]
    fn empty_playlist_has_no_transitions() {
        let state = AppState::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(state.next_advance(&mut rng).is_none());
        assert!(state.prev_index().is_none());
        assert!(state.current_track().is_none());
    }
}
