use std::{
    sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::Duration,
};

use warbler_api as wa;
use warbler_state::{Playlists, Track, TrackId};

use crate::{
    AddOutcome, AppState, Event,
    tokio_thread::{TokioHandle, TokioThread},
    transport::{Transport, TransportCommand, TransportEvent, TransportRx},
};

/// Arguments for constructing a [`Logic`].
pub struct LogicArgs {
    pub base_url: String,
}

/// The playback session: owns the engine state, the backend client, the
/// background runtime, and the media transport. Constructed once at startup
/// and long-lived for the whole session.
pub struct Logic {
    shared: Shared,
    _tokio_thread: TokioThread,
    _transport: Transport,
    transport_rx: Mutex<TransportRx>,
}

/// The cloneable bundle of handles that background tasks capture. Every
/// engine operation is expressed against this so that spawned futures can
/// drive the same transitions the UI thread does.
#[derive(Clone)]
pub(crate) struct Shared {
    pub(crate) state: Arc<RwLock<AppState>>,
    pub(crate) client: Arc<wa::Client>,
    pub(crate) transport: crate::transport::TransportSendHandle,
    pub(crate) events: tokio::sync::broadcast::Sender<Event>,
    pub(crate) tokio: TokioHandle,
}

impl Shared {
    pub(crate) fn read_state(&self) -> RwLockReadGuard<'_, AppState> {
        self.state.read().unwrap()
    }

    pub(crate) fn write_state(&self) -> RwLockWriteGuard<'_, AppState> {
        self.state.write().unwrap()
    }

    pub(crate) fn emit(&self, event: Event) {
        // Send fails only when no frontend is subscribed; that's fine.
        let _ = self.events.send(event);
    }

    pub(crate) fn spawn(&self, task: impl Future<Output = ()> + Send + 'static) {
        self.tokio.spawn(task);
    }
}

/// Now-playing details for display.
pub struct PlayingInfo {
    pub track: Track,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub paused: bool,
    pub liked: bool,
}

impl Logic {
    pub fn new(args: LogicArgs) -> Self {
        let tokio_thread = TokioThread::new();
        let transport = Transport::new();
        let (events_tx, _) = tokio::sync::broadcast::channel(100);

        let shared = Shared {
            state: Arc::new(RwLock::new(AppState::default())),
            client: Arc::new(wa::Client::new(args.base_url)),
            transport: transport.send_handle(),
            events: events_tx,
            tokio: tokio_thread.handle(),
        };

        let logic = Logic {
            transport_rx: Mutex::new(transport.subscribe()),
            shared,
            _tokio_thread: tokio_thread,
            _transport: transport,
        };
        // Hydrate from the persisted snapshot; failures fall back to empty
        // defaults without blocking startup.
        logic.shared.pull_state();
        logic
    }

    /// Subscribe to engine events.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<Event> {
        self.events().subscribe()
    }

    fn events(&self) -> &tokio::sync::broadcast::Sender<Event> {
        &self.shared.events
    }

    /// Pump transport events. Call regularly from the frontend's tick loop;
    /// this is where end-of-track advance and periodic checkpoints happen.
    pub fn update(&self) {
        use tokio::sync::broadcast::error::TryRecvError;

        let mut rx = self.transport_rx.lock().unwrap();
        loop {
            match rx.try_recv() {
                Ok(event) => self.handle_transport_event(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("transport events lagged by {skipped}");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
    }

    fn handle_transport_event(&self, event: TransportEvent) {
        match event {
            TransportEvent::PositionChanged(position) => {
                self.shared.observe_position(position);
            }
            TransportEvent::TrackEnded => {
                tracing::debug!("track ended; advancing");
                self.shared.next_track();
            }
            TransportEvent::StateChanged(state) => {
                self.shared.write_state().paused =
                    !matches!(state, crate::TransportState::Playing);
                self.shared.emit(Event::PlaybackStateChanged(state));
            }
        }
    }
}

/// Playback controls.
impl Logic {
    pub fn play_at(&self, idx: usize) {
        self.shared.play_at(idx, crate::playback::PlayKind::Fresh);
    }

    pub fn play_from_queue(&self, queue_idx: usize) {
        self.shared.play_from_queue(queue_idx);
    }

    pub fn next_track(&self) {
        self.shared.next_track();
    }

    pub fn prev_track(&self) {
        self.shared.prev_track();
    }

    pub fn toggle_playback(&self) {
        self.shared.transport.send(TransportCommand::TogglePlayback);
    }

    /// Flip the shuffle flag. Affects only future transitions.
    pub fn toggle_shuffle(&self) -> bool {
        let mut state = self.shared.write_state();
        state.is_shuffle = !state.is_shuffle;
        state.is_shuffle
    }

    /// Flip the autoplay flag. Affects only future transitions.
    pub fn toggle_autoplay(&self) -> bool {
        let mut state = self.shared.write_state();
        state.is_autoplay = !state.is_autoplay;
        state.is_autoplay
    }

    /// Seek to a fraction of the track's duration. Seeking is a strong
    /// signal of a position the user cares about, so it pushes immediately.
    pub fn seek(&self, fraction: f64) {
        self.shared.seek_fraction(fraction);
    }

    /// Splice a track in right after the current one and play it.
    pub fn play_external(&self, track: Track) {
        self.shared.play_external(track);
    }

    /// Replace the active playlist with a collection and play `idx`.
    pub fn play_collection(&self, tracks: Vec<Track>, idx: usize) {
        self.shared.play_collection(tracks, idx);
    }

    /// Replace the active playlist with the liked songs and play `idx`.
    pub fn play_liked(&self, idx: usize) {
        let tracks = self.shared.read_state().liked.tracks().to_vec();
        self.shared.play_collection(tracks, idx);
    }

    /// Replace the active playlist with a named playlist and play `idx`.
    pub fn play_playlist(&self, name: &str, idx: usize) {
        let Some(tracks) = self
            .shared
            .read_state()
            .playlists
            .get(name)
            .map(|t| t.to_vec())
        else {
            self.shared
                .emit(Event::Notice(format!("No playlist named \"{name}\".")));
            return;
        };
        self.shared.play_collection(tracks, idx);
    }
}

/// Search and discovery.
impl Logic {
    /// Search and replace the playlist with the results, without starting
    /// playback.
    pub fn search(&self, query: String) {
        self.shared.run_search(query, false);
    }

    /// Search, replace the playlist, and play the first result.
    pub fn search_and_play(&self, query: String) {
        self.shared.run_search(query, true);
    }

    /// Load the discovery feed: independent sections, fetched concurrently.
    pub fn load_home(&self) {
        self.shared.load_home();
    }

    /// Ask the assistant for recommendations matching a free-text prompt.
    pub fn recommend(&self, prompt: String) {
        self.shared.recommend(prompt);
    }

    /// Chat with the assistant; the reply streams in as [`Event::ChatChunk`]s.
    pub fn chat(&self, prompt: String) {
        self.shared.chat(prompt);
    }
}

/// History, likes, and playlists.
impl Logic {
    /// Toggle the like state of the current track. Returns the new state,
    /// or `None` when nothing is playing.
    pub fn toggle_like_current(&self) -> Option<bool> {
        let liked = {
            let mut state = self.shared.write_state();
            let track = state.current_track()?.clone();
            state.liked.toggle(track)
        };
        self.shared.push_state();
        Some(liked)
    }

    /// Add the current track to a named playlist, creating it if absent.
    pub fn add_current_to_playlist(&self, name: &str) -> Option<AddOutcome> {
        let outcome = {
            let mut state = self.shared.write_state();
            let track = state.current_track()?.clone();
            state.playlists.add(name, track)
        };
        if outcome == AddOutcome::Added {
            self.shared.push_state();
        }
        Some(outcome)
    }

    /// Delete a named playlist. Irreversible once persisted.
    pub fn delete_playlist(&self, name: &str) -> bool {
        let deleted = self.shared.write_state().playlists.delete(name);
        if deleted {
            self.shared.push_state();
        }
        deleted
    }

    /// Remove a track from a named playlist. Irreversible once persisted.
    pub fn remove_from_playlist(&self, name: &str, id: &TrackId) -> bool {
        let removed = self.shared.write_state().playlists.remove_track(name, id);
        if removed {
            self.shared.push_state();
        }
        removed
    }

    /// Remove a history entry locally and request the backend deletion.
    pub fn remove_history(&self, id: TrackId) {
        self.shared.remove_history(id);
    }
}

/// State accessors for rendering.
impl Logic {
    pub fn now_playing(&self) -> Option<PlayingInfo> {
        let state = self.shared.read_state();
        let track = state.current_track()?.clone();
        let liked = state.liked.contains(&track.id);
        Some(PlayingInfo {
            position: state.position,
            duration: state.duration,
            paused: state.paused,
            liked,
            track,
        })
    }

    pub fn playlist(&self) -> Vec<Track> {
        self.shared.read_state().playlist.clone()
    }

    pub fn current_index(&self) -> usize {
        self.shared.read_state().current_idx
    }

    pub fn queue(&self) -> Vec<Track> {
        self.shared.read_state().queue.clone()
    }

    pub fn history(&self) -> Vec<Track> {
        self.shared.read_state().history.tracks().to_vec()
    }

    pub fn liked(&self) -> Vec<Track> {
        self.shared.read_state().liked.tracks().to_vec()
    }

    pub fn playlists(&self) -> Playlists {
        self.shared.read_state().playlists.as_map().clone()
    }

    pub fn is_shuffle(&self) -> bool {
        self.shared.read_state().is_shuffle
    }

    pub fn is_autoplay(&self) -> bool {
        self.shared.read_state().is_autoplay
    }

    /// The proxy-audio URL of the current track; also the download target.
    pub fn download_url(&self) -> Option<String> {
        let state = self.shared.read_state();
        let track = state.current_track()?;
        Some(self.shared.client.proxy_audio_url(track.id.as_str()))
    }
}
