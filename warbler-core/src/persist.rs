use std::time::Duration;

use warbler_state::{Snapshot, TrackId};

use crate::{Event, logic::Shared, transport::TransportCommand};

impl Shared {
    /// Project the engine state into a durable snapshot under one read lock.
    fn snapshot(&self) -> Snapshot {
        let state = self.read_state();
        Snapshot {
            history: state.history.tracks().to_vec(),
            liked: state.liked.tracks().to_vec(),
            playlists: state.playlists.as_map().clone(),
            last_song: state.current_track().cloned(),
            last_time: state.position.as_secs_f64(),
        }
    }

    /// Push the current snapshot to the backend, fire-and-forget. Skipped
    /// while nothing has ever played; a snapshot with no last song would
    /// clobber the restore target. Failures are logged and the local state
    /// stays authoritative until the next push.
    pub(crate) fn push_state(&self) {
        let snapshot = self.snapshot();
        if snapshot.last_song.is_none() {
            return;
        }
        let shared = self.clone();
        self.spawn(async move {
            if let Err(err) = shared.client.save_user_state(&snapshot.to_wire()).await {
                tracing::warn!("failed to save user state: {err}");
            }
        });
    }

    /// Fetch the persisted snapshot and hydrate the session: history, likes,
    /// playlists, and the last-played track paused at its saved offset.
    /// A failed fetch degrades to empty defaults.
    pub(crate) fn pull_state(&self) {
        let shared = self.clone();
        self.spawn(async move {
            let snapshot = match shared.client.get_user_state().await {
                Ok(state) => Snapshot::from_wire(state),
                Err(err) => {
                    tracing::warn!("failed to load user state, starting empty: {err}");
                    Snapshot::default()
                }
            };

            let restored = {
                let mut state = shared.write_state();
                state.history = crate::History::from_tracks(snapshot.history);
                state.liked = crate::LikedSongs::from_tracks(snapshot.liked);
                if !snapshot.playlists.is_empty() {
                    state.playlists = crate::PlaylistSet::from_map(snapshot.playlists);
                }

                snapshot.last_song.map(|track| {
                    // Saved offsets come from JSON; reject anything that
                    // isn't a sane non-negative number.
                    let position = if snapshot.last_time.is_finite() && snapshot.last_time > 0.0 {
                        Duration::from_secs_f64(snapshot.last_time)
                    } else {
                        Duration::ZERO
                    };
                    state.playlist = vec![track.clone()];
                    state.current_idx = 0;
                    state.position = position;
                    state.duration = track.duration;
                    state.paused = true;
                    (track, position)
                })
            };

            if let Some((track, position)) = restored {
                tracing::info!("restored \"{}\" at {position:?}", track.name);
                shared.transport.send(TransportCommand::Load {
                    track_id: track.id.clone(),
                    url: shared.client.proxy_audio_url(track.id.as_str()),
                    duration: track.duration,
                    position,
                    autostart: false,
                });
                let liked = shared.read_state().liked.contains(&track.id);
                shared.emit(Event::TrackRestored {
                    track,
                    position,
                    liked,
                });
            }
        });
    }

    /// Remove a history entry: locally first, then the backend. The local
    /// removal is kept even if the backend call fails, so the worst case is
    /// the entry reappearing on the next session.
    pub(crate) fn remove_history(&self, id: TrackId) {
        if !self.write_state().history.remove(&id) {
            return;
        }
        let shared = self.clone();
        self.spawn(async move {
            if let Err(err) = shared.client.delete_history(id.as_str()).await {
                tracing::warn!("failed to delete history entry {id}: {err}");
            }
        });
    }
}
