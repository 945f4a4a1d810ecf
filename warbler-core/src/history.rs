use warbler_state::{Track, TrackId};

/// The recently-played ledger: most recent first, bounded, deduplicated by
/// track ID. Re-playing a track moves it to the front rather than
/// duplicating it.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<Track>,
}

impl History {
    pub const MAX_ENTRIES: usize = 100;

    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate from persisted entries, enforcing the bound.
    pub fn from_tracks(mut entries: Vec<Track>) -> Self {
        entries.truncate(Self::MAX_ENTRIES);
        Self { entries }
    }

    /// Record a play: any existing entry with the same ID is removed, the
    /// track goes to the front, and the ledger is truncated to the bound.
    pub fn record(&mut self, track: Track) {
        self.entries.retain(|t| t.id != track.id);
        self.entries.insert(0, track);
        self.entries.truncate(Self::MAX_ENTRIES);
    }

    /// Remove the entry with the given ID. Returns whether one was present.
    pub fn remove(&mut self, id: &TrackId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|t| &t.id != id);
        self.entries.len() != before
    }

    pub fn tracks(&self) -> &[Track] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: TrackId(id.to_string()),
            name: format!("Track {id}"),
            primary_artists: "Test Artist".to_string(),
            image: vec![],
            duration: None,
        }
    }

    #[test]
    fn record_puts_most_recent_first() {
        let mut history = History::new();
        history.record(track("a"));
        history.record(track("b"));
        assert_eq!(history.tracks()[0].id.as_str(), "b");
        assert_eq!(history.tracks()[1].id.as_str(), "a");
    }

    #[test]
    fn replay_moves_to_front_without_duplicating() {
        let mut history = History::new();
        history.record(track("a"));
        history.record(track("b"));
        // History is [B, A]; replaying A must yield [A, B].
        history.record(track("a"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.tracks()[0].id.as_str(), "a");
        assert_eq!(history.tracks()[1].id.as_str(), "b");
    }

    #[test]
    fn never_exceeds_bound_and_never_duplicates() {
        let mut history = History::new();
        for i in 0..250 {
            history.record(track(&format!("id-{}", i % 120)));
            assert!(history.len() <= History::MAX_ENTRIES);
        }
        let mut ids: Vec<_> = history.tracks().iter().map(|t| t.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), history.len());
    }

    #[test]
    fn remove_by_id() {
        let mut history = History::new();
        history.record(track("a"));
        history.record(track("b"));
        assert!(history.remove(&TrackId("a".to_string())));
        assert!(!history.remove(&TrackId("a".to_string())));
        assert_eq!(history.len(), 1);
        assert_eq!(history.tracks()[0].id.as_str(), "b");
    }

    #[test]
    fn from_tracks_enforces_bound() {
        let entries = (0..150).map(|i| track(&format!("id-{i}"))).collect();
        let history = History::from_tracks(entries);
        assert_eq!(history.len(), History::MAX_ENTRIES);
    }
}
