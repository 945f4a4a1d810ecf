use warbler_state::{DEFAULT_PLAYLIST, Playlists, Track, TrackId};

/// The liked-songs set. Membership is keyed by track ID; tracks are stored
/// in like order for stable persistence round-trips.
#[derive(Debug, Clone, Default)]
pub struct LikedSongs {
    tracks: Vec<Track>,
}

impl LikedSongs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Toggle membership for the given track. Returns whether the track is
    /// liked after the toggle.
    pub fn toggle(&mut self, track: Track) -> bool {
        if let Some(idx) = self.tracks.iter().position(|t| t.id == track.id) {
            self.tracks.remove(idx);
            false
        } else {
            self.tracks.push(track);
            true
        }
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.tracks.iter().any(|t| &t.id == id)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// The outcome of adding a track to a named playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

/// Named playlists. A default "My Favorites" playlist always exists after
/// initialization; each playlist is ordered and deduplicated by track ID.
#[derive(Debug, Clone)]
pub struct PlaylistSet {
    lists: Playlists,
}

impl PlaylistSet {
    pub fn with_default() -> Self {
        let mut lists = Playlists::new();
        lists.insert(DEFAULT_PLAYLIST.to_string(), vec![]);
        Self { lists }
    }

    pub fn from_map(lists: Playlists) -> Self {
        Self { lists }
    }

    /// Add a track to the named playlist, creating the playlist if absent.
    /// Reports [`AddOutcome::AlreadyPresent`] as a no-op.
    pub fn add(&mut self, name: &str, track: Track) -> AddOutcome {
        let list = self.lists.entry(name.to_string()).or_default();
        if list.iter().any(|t| t.id == track.id) {
            AddOutcome::AlreadyPresent
        } else {
            list.push(track);
            AddOutcome::Added
        }
    }

    /// Delete the named playlist entirely. Returns whether it existed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.lists.remove(name).is_some()
    }

    /// Remove a track from the named playlist. Returns whether it was
    /// present.
    pub fn remove_track(&mut self, name: &str, id: &TrackId) -> bool {
        let Some(list) = self.lists.get_mut(name) else {
            return false;
        };
        let before = list.len();
        list.retain(|t| &t.id != id);
        list.len() != before
    }

    pub fn get(&self, name: &str) -> Option<&[Track]> {
        self.lists.get(name).map(|l| l.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(|n| n.as_str())
    }

    pub fn as_map(&self) -> &Playlists {
        &self.lists
    }
}

impl Default for PlaylistSet {
    fn default() -> Self {
        Self::with_default()
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
    fn double_toggle_restores_membership() {
        let mut liked = LikedSongs::new();
        let id = TrackId("a".to_string());
        assert!(!liked.contains(&id));
        assert!(liked.toggle(track("a")));
        assert!(liked.contains(&id));
        assert!(!liked.toggle(track("a")));
        assert!(!liked.contains(&id));
    }

    #[test]
    fn default_playlist_exists() {
        let playlists = PlaylistSet::with_default();
        assert!(playlists.get(DEFAULT_PLAYLIST).is_some());
    }

    #[test]
    fn add_creates_playlist_and_dedupes() {
        let mut playlists = PlaylistSet::with_default();
        assert_eq!(playlists.add("Gym", track("a")), AddOutcome::Added);
        // Second add of the same track is a no-op.
        assert_eq!(playlists.add("Gym", track("a")), AddOutcome::AlreadyPresent);
        assert_eq!(playlists.get("Gym").unwrap().len(), 1);
    }

    #[test]
    fn delete_playlist() {
        let mut playlists = PlaylistSet::with_default();
        playlists.add("Gym", track("a"));
        assert!(playlists.delete("Gym"));
        assert!(!playlists.delete("Gym"));
        assert!(playlists.get("Gym").is_none());
    }

    #[test]
    fn remove_track_filters_by_id() {
        let mut playlists = PlaylistSet::with_default();
        playlists.add("Gym", track("a"));
        playlists.add("Gym", track("b"));
        assert!(playlists.remove_track("Gym", &TrackId("a".to_string())));
        assert!(!playlists.remove_track("Gym", &TrackId("a".to_string())));
        assert!(!playlists.remove_track("Nope", &TrackId("b".to_string())));
        assert_eq!(playlists.get("Gym").unwrap().len(), 1);
    }
}
