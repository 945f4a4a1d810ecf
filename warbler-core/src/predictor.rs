use warbler_api as wa;
use warbler_state::Track;

use crate::{Event, logic::Shared};

/// Cap on predicted queue length. The assistant is asked for this many, but
/// its output is advisory; the filter enforces the cap regardless.
const MAX_SUGGESTIONS: usize = 10;

/// Extract usable "Artist - Title" suggestion lines from raw assistant
/// output. The completion often carries preamble, blank lines, and trailing
/// chatter; only lines that look like a track reference survive.
fn filter_suggestions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| line.len() > 3 && line.contains('-'))
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}

impl Shared {
    /// Rebuild the predicted queue for `seed`. Runs in the background;
    /// failures are logged and leave the existing queue untouched. Each
    /// suggestion is resolved to a concrete track sequentially, with
    /// duplicates (by track ID) dropped.
    pub(crate) fn refresh_autoplay_queue(&self, seed: Track) {
        let shared = self.clone();
        self.spawn(async move {
            let prompt = seed.prompt_key();
            let request = wa::AssistantRequest::autoplay(&prompt);
            let raw = match shared.client.assistant_complete(&request).await {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::debug!("autoplay prediction failed: {err}");
                    return;
                }
            };

            // Zero usable suggestions degrades the queue to empty rather
            // than leaving a stale prediction for the previous track.
            let suggestions = filter_suggestions(&raw);
            let mut queue: Vec<Track> = Vec::with_capacity(suggestions.len());
            for suggestion in &suggestions {
                // The suffix biases search toward playable uploads rather
                // than lyric videos or covers.
                let query = format!("{suggestion} official audio");
                match shared.client.search(&query).await {
                    Ok(results) => {
                        if let Some(item) = results.into_iter().next() {
                            let track = Track::from(item);
                            if track.id != seed.id && !queue.iter().any(|t| t.id == track.id) {
                                queue.push(track);
                            }
                        }
                    }
                    Err(err) => {
                        tracing::debug!("queue resolution failed for {suggestion:?}: {err}");
                    }
                }
            }

            tracing::debug!(
                "predicted queue: {} of {} suggestions resolved",
                queue.len(),
                suggestions.len()
            );
            shared.write_state().queue = queue.clone();
            shared.emit(Event::QueueUpdated(queue));
        });
    }
}
