use std::time::{Duration, Instant};

use warbler_state::TrackId;

/// The media transport: warbler's stand-in for a media element. Decoding is
/// delegated to whatever actually plays the proxy-audio URL; this thread owns
/// the playback clock the engine observes, advancing the position while
/// playing and reporting end-of-track when the known duration is reached.
pub struct Transport {
    command_tx: TransportSendHandle,
    _transport_thread_handle: std::thread::JoinHandle<()>,
    event_rx: TransportRx,
}
pub type TransportRx = tokio::sync::broadcast::Receiver<TransportEvent>;
#[derive(Clone)]
pub struct TransportSendHandle(std::sync::mpsc::Sender<TransportCommand>);
impl TransportSendHandle {
    pub fn send(&self, command: TransportCommand) {
        self.0.send(command).unwrap();
    }
}

#[derive(Debug, Clone)]
pub enum TransportCommand {
    Load {
        track_id: TrackId,
        url: String,
        duration: Option<Duration>,
        position: Duration,
        autostart: bool,
    },
    TogglePlayback,
    Stop,
    Seek(Duration),
}

#[derive(Debug, Clone)]
pub enum TransportEvent {
    PositionChanged(Duration),
    TrackEnded,
    StateChanged(TransportState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Playing,
    Paused,
    Stopped,
}

struct LoadedTrack {
    duration: Option<Duration>,
    position: Duration,
    playing: bool,
}

impl Transport {
    pub fn new() -> Self {
        let (command_tx, command_rx) = std::sync::mpsc::channel::<TransportCommand>();
        let (event_tx, event_rx) = tokio::sync::broadcast::channel::<TransportEvent>(100);

        let transport_thread_handle = std::thread::spawn(move || {
            Self::run(command_rx, event_tx);
        });

        Self {
            command_tx: TransportSendHandle(command_tx),
            _transport_thread_handle: transport_thread_handle,
            event_rx,
        }
    }

    pub fn send_handle(&self) -> TransportSendHandle {
        self.command_tx.clone()
    }

    pub fn subscribe(&self) -> TransportRx {
        self.event_rx.resubscribe()
    }

    fn run(
        command_rx: std::sync::mpsc::Receiver<TransportCommand>,
        event_tx: tokio::sync::broadcast::Sender<TransportEvent>,
    ) {
        use TransportCommand as TC;
        use TransportEvent as TE;

        const POSITION_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

        let mut loaded: Option<LoadedTrack> = None;
        let mut last_tick = Instant::now();
        let mut last_position_update = Instant::now();

        loop {
            // Process all available commands without blocking
            while let Ok(command) = command_rx.try_recv() {
                match command {
                    TC::Load {
                        track_id,
                        url,
                        duration,
                        position,
                        autostart,
                    } => {
                        tracing::debug!("transport loading {track_id} from {url}");
                        loaded = Some(LoadedTrack {
                            duration,
                            position,
                            playing: autostart,
                        });
                        let _ = event_tx.send(TE::StateChanged(if autostart {
                            TransportState::Playing
                        } else {
                            TransportState::Paused
                        }));
                        let _ = event_tx.send(TE::PositionChanged(position));
                    }
                    TC::TogglePlayback => {
                        if let Some(track) = loaded.as_mut() {
                            track.playing = !track.playing;
                            let _ = event_tx.send(TE::StateChanged(if track.playing {
                                TransportState::Playing
                            } else {
                                TransportState::Paused
                            }));
                        }
                    }
                    TC::Stop => {
                        loaded = None;
                        let _ = event_tx.send(TE::StateChanged(TransportState::Stopped));
                    }
                    TC::Seek(position) => {
                        // Every seek is applied; when several are pending
                        // in one drain, the last one wins.
                        if let Some(track) = loaded.as_mut() {
                            track.position = match track.duration {
                                Some(duration) => position.min(duration),
                                None => position,
                            };
                            let _ = event_tx.send(TE::PositionChanged(track.position));
                        }
                    }
                }
            }

            // Advance the clock while playing, clamping at the known duration
            let now = Instant::now();
            let elapsed = now.duration_since(last_tick);
            last_tick = now;
            if let Some(track) = loaded.as_mut()
                && track.playing
            {
                track.position += elapsed;
                if let Some(duration) = track.duration
                    && track.position >= duration
                {
                    track.position = duration;
                    track.playing = false;
                    let _ = event_tx.send(TE::PositionChanged(track.position));
                    let _ = event_tx.send(TE::TrackEnded);
                } else if now.duration_since(last_position_update) >= POSITION_UPDATE_INTERVAL {
                    last_position_update = now;
                    let _ = event_tx.send(TE::PositionChanged(track.position));
                }
            }

            // Sleep for 10ms between iterations
            std::thread::sleep(Duration::from_millis(10));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_for_position(rx: &mut TransportRx, expected: Duration) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            match rx.try_recv() {
                Ok(TransportEvent::PositionChanged(position)) if position == expected => {
                    return true;
                }
                Ok(_) => {}
                Err(_) => std::thread::sleep(Duration::from_millis(10)),
            }
        }
        false
    }

    #[test]
    fn seek_immediately_after_load_is_applied() {
        let transport = Transport::new();
        let mut rx = transport.subscribe();
        let handle = transport.send_handle();

        handle.send(TransportCommand::Load {
            track_id: TrackId("abc".to_string()),
            url: "http://backend/proxy-audio?yt_id=abc".to_string(),
            duration: Some(Duration::from_secs(60)),
            position: Duration::ZERO,
            autostart: false,
        });
        handle.send(TransportCommand::Seek(Duration::from_secs(30)));

        // The track is paused, so the only way to see 30s is the seek.
        assert!(wait_for_position(&mut rx, Duration::from_secs(30)));
    }

    #[test]
    fn seek_clamps_to_duration() {
        let transport = Transport::new();
        let mut rx = transport.subscribe();
        let handle = transport.send_handle();

        handle.send(TransportCommand::Load {
            track_id: TrackId("abc".to_string()),
            url: "http://backend/proxy-audio?yt_id=abc".to_string(),
            duration: Some(Duration::from_secs(60)),
            position: Duration::ZERO,
            autostart: false,
        });
        handle.send(TransportCommand::Seek(Duration::from_secs(600)));

        assert!(wait_for_position(&mut rx, Duration::from_secs(60)));
    }
}
