use std::time::Duration;

use warbler_state::Track;

use crate::{Event, app_state::Advance, logic::Shared, transport::TransportCommand};

/// How a playback was initiated. Queue consumption must not retrigger
/// prediction, or the queue would churn on every predicted track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayKind {
    Fresh,
    FromQueue,
}

impl Shared {
    /// Start playback of the playlist track at `idx`. Out-of-bounds indices
    /// are ignored. Records history, loads the transport, and (for fresh
    /// plays with autoplay on) kicks off queue prediction.
    pub(crate) fn play_at(&self, idx: usize, kind: PlayKind) {
        let (track, liked, predict) = {
            let mut state = self.write_state();
            let Some(track) = state.playlist.get(idx).cloned() else {
                return;
            };
            state.current_idx = idx;
            state.position = Duration::ZERO;
            state.duration = track.duration;
            state.paused = false;
            state.last_checkpoint_secs = None;
            state.history.record(track.clone());
            let liked = state.liked.contains(&track.id);
            let predict = kind == PlayKind::Fresh && state.is_autoplay;
            (track, liked, predict)
        };

        tracing::info!("playing \"{}\" at index {idx}", track.name);
        self.transport.send(TransportCommand::Load {
            track_id: track.id.clone(),
            url: self.client.proxy_audio_url(track.id.as_str()),
            duration: track.duration,
            position: Duration::ZERO,
            autostart: true,
        });
        self.emit(Event::TrackStarted {
            track: track.clone(),
            liked,
        });
        self.push_state();

        if predict {
            self.refresh_autoplay_queue(track);
        }
    }

    /// Play a predicted queue entry: splice it into the playlist after the
    /// current track, then play it without retriggering prediction.
    pub(crate) fn play_from_queue(&self, queue_idx: usize) {
        let Some(idx) = self.write_state().consume_queue(queue_idx) else {
            return;
        };
        let queue = self.read_state().queue.clone();
        self.emit(Event::QueueUpdated(queue));
        self.play_at(idx, PlayKind::FromQueue);
    }

    pub(crate) fn next_track(&self) {
        let advance = self.read_state().next_advance(&mut rand::rng());
        match advance {
            Some(Advance::Index(idx)) => self.play_at(idx, PlayKind::Fresh),
            Some(Advance::QueueHead) => self.play_from_queue(0),
            None => {}
        }
    }

    pub(crate) fn prev_track(&self) {
        if let Some(idx) = self.read_state().prev_index() {
            self.play_at(idx, PlayKind::Fresh);
        }
    }

    /// Splice an out-of-playlist track (home feed, recommendation, queue
    /// preview) in after the current one and play it.
    pub(crate) fn play_external(&self, track: Track) {
        let idx = self.write_state().splice_after_current(track);
        self.play_at(idx, PlayKind::Fresh);
    }

    /// Replace the active playlist with `tracks` and play the one at `idx`.
    pub(crate) fn play_collection(&self, tracks: Vec<Track>, idx: usize) {
        {
            let mut state = self.write_state();
            state.playlist = tracks;
            state.current_idx = 0;
        }
        self.play_at(idx, PlayKind::Fresh);
    }

    /// Seek to a fraction of the known duration. A no-op until the duration
    /// is known, matching a transport that hasn't loaded metadata yet.
    pub(crate) fn seek_fraction(&self, fraction: f64) {
        let Some(duration) = self.read_state().duration else {
            return;
        };
        let fraction = fraction.clamp(0.0, 1.0);
        let position = duration.mul_f64(fraction);
        self.write_state().position = position;
        self.transport.send(TransportCommand::Seek(position));
        self.push_state();
    }

    /// Fold a transport position report into state, checkpointing the
    /// persisted offset every 15 seconds of playback.
    pub(crate) fn observe_position(&self, position: Duration) {
        let (duration, checkpoint) = {
            let mut state = self.write_state();
            state.position = position;
            let secs = position.as_secs();
            let due = checkpoint_due(secs, state.last_checkpoint_secs);
            if due {
                state.last_checkpoint_secs = Some(secs);
            }
            (state.duration, due)
        };
        self.emit(Event::PositionChanged { position, duration });
        if checkpoint {
            self.push_state();
        }
    }
}

/// A checkpoint is due on each 15-second boundary, at most once per
/// boundary. Position reports arrive several times a second, so the same
/// boundary is observed repeatedly.
fn checkpoint_due(secs: u64, last: Option<u64>) -> bool {
    secs > 0 && secs % 15 == 0 && last != Some(secs)
}
