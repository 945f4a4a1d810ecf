use std::collections::BTreeMap;

use crate::{Track, wa};

/// Named playlists: playlist name to ordered tracks.
pub type Playlists = BTreeMap<String, Vec<Track>>;

/// The name of the playlist that always exists after initialization.
pub const DEFAULT_PLAYLIST: &str = "My Favorites";

/// The durable projection of user state: history, liked songs, named
/// playlists, and the last-played track with its offset. The active playlist
/// and queue are deliberately not part of it.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Recently played tracks, most recent first, capped upstream.
    pub history: Vec<Track>,
    /// Liked tracks, membership keyed by track ID.
    pub liked: Vec<Track>,
    /// Named playlists.
    pub playlists: Playlists,
    /// The last track that was playing.
    pub last_song: Option<Track>,
    /// The playback offset of the last track, in seconds.
    pub last_time: f64,
}

impl Snapshot {
    /// Hydrate a snapshot from the backend's wire form, applying defaults:
    /// a missing playlist map becomes a single empty "My Favorites".
    pub fn from_wire(state: wa::UserState) -> Self {
        let mut playlists: Playlists = state
            .playlists
            .into_iter()
            .map(|(name, tracks)| (name, tracks.into_iter().map(Track::from).collect()))
            .collect();
        if playlists.is_empty() {
            playlists.insert(DEFAULT_PLAYLIST.to_string(), vec![]);
        }

        Snapshot {
            history: state.history.into_iter().map(Track::from).collect(),
            liked: state.liked.into_iter().map(Track::from).collect(),
            playlists,
            last_song: state.last_song.map(Track::from),
            last_time: state.last_time.unwrap_or_default(),
        }
    }

    /// Project the snapshot back into the backend's wire form.
    pub fn to_wire(&self) -> wa::UserState {
        wa::UserState {
            history: self.history.iter().map(Into::into).collect(),
            liked: self.liked.iter().map(Into::into).collect(),
            playlists: self
                .playlists
                .iter()
                .map(|(name, tracks)| (name.clone(), tracks.iter().map(Into::into).collect()))
                .collect(),
            last_song: self.last_song.as_ref().map(Into::into),
            last_time: Some(self.last_time),
        }
    }
}
