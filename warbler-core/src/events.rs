use std::time::Duration;

use warbler_state::Track;

use crate::TransportState;

/// Events emitted by the engine for the frontend to render. Advisory:
/// consumers that fall behind only miss display updates, never state.
#[derive(Debug, Clone)]
pub enum Event {
    /// A track began playing.
    TrackStarted { track: Track, liked: bool },
    /// The last-played track was restored from the persisted snapshot,
    /// without starting playback.
    TrackRestored {
        track: Track,
        position: Duration,
        liked: bool,
    },
    PositionChanged {
        position: Duration,
        duration: Option<Duration>,
    },
    PlaybackStateChanged(TransportState),
    /// The predicted queue was replaced.
    QueueUpdated(Vec<Track>),
    /// Search results arrived for an explicit search.
    SearchLoaded { query: String, tracks: Vec<Track> },
    /// The discovery feed finished loading. Empty sections are dropped.
    HomeLoaded(Vec<HomeSection>),
    RecommendationsLoaded(Vec<Track>),
    /// A chunk of streamed chat output, to be rendered as it arrives.
    ChatChunk(String),
    ChatEnded,
    /// A user-facing message, e.g. empty search results.
    Notice(String),
}

/// One section of the discovery feed.
#[derive(Debug, Clone)]
pub struct HomeSection {
    pub label: String,
    pub tracks: Vec<Track>,
}
