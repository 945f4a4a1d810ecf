use futures::future::join_all;
use warbler_api as wa;
use warbler_state::Track;

use crate::{Event, logic::Shared};

/// Strip list decoration from a recommendation line: a leading "N." ordinal
/// and surrounding quotes. "2Pac - Changes" keeps its 2; only digits
/// followed by a dot are an ordinal.
fn clean_recommendation(line: &str) -> String {
    let line = line.trim();
    let stripped = match line.find('.') {
        Some(dot) if dot > 0 && line[..dot].bytes().all(|b| b.is_ascii_digit()) => {
            line[dot + 1..].trim_start()
        }
        _ => line,
    };
    stripped.replace('"', "").trim().to_string()
}

/// Extract recommendation lines from assistant output. Stricter than the
/// autoplay filter: recommendations are shown to the user, so short
/// fragments are not worth resolving.
fn filter_recommendations(raw: &str) -> Vec<String> {
    raw.lines()
        .map(clean_recommendation)
        .filter(|line| line.len() > 5 && line.contains('-'))
        .collect()
}

impl Shared {
    /// Resolve a free-text mood prompt to concrete tracks. Suggestions are
    /// resolved concurrently, preserving the assistant's ordering; lines
    /// that resolve to nothing are dropped.
    pub(crate) fn recommend(&self, prompt: String) {
        let shared = self.clone();
        self.spawn(async move {
            let request = wa::AssistantRequest::recommendation(&prompt);
            let raw = match shared.client.assistant_complete(&request).await {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::warn!("recommendation request failed: {err}");
                    shared.emit(Event::Notice(
                        "Recommendations are unavailable right now.".to_string(),
                    ));
                    return;
                }
            };

            let suggestions = filter_recommendations(&raw);
            if suggestions.is_empty() {
                shared.emit(Event::Notice(
                    "No matches found. Try another artist!".to_string(),
                ));
                return;
            }

            let lookups = suggestions.iter().map(|suggestion| {
                let client = shared.client.clone();
                async move {
                    match client.search(suggestion).await {
                        Ok(items) => items.into_iter().next().map(Track::from),
                        Err(err) => {
                            tracing::debug!("recommendation lookup failed for {suggestion:?}: {err}");
                            None
                        }
                    }
                }
            });

            let tracks: Vec<Track> = join_all(lookups).await.into_iter().flatten().collect();
            if tracks.is_empty() {
                shared.emit(Event::Notice("Failed to load track details.".to_string()));
                return;
            }
            shared.emit(Event::RecommendationsLoaded(tracks));
        });
    }

    /// Stream a chat reply, forwarding each chunk as it arrives. Always
    /// terminated by [`Event::ChatEnded`], even on failure.
    pub(crate) fn chat(&self, prompt: String) {
        let shared = self.clone();
        self.spawn(async move {
            let events = shared.events.clone();
            let result = shared
                .client
                .assistant_chat(&prompt, |chunk| {
                    let _ = events.send(Event::ChatChunk(chunk.to_string()));
                })
                .await;
            if let Err(err) = result {
                tracing::warn!("chat request failed: {err}");
                shared.emit(Event::Notice(
                    "The assistant is unavailable right now.".to_string(),
                ));
            }
            shared.emit(Event::ChatEnded);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_ordinals_and_quotes() {
        assert_eq!(
            clean_recommendation("1. \"Tum Hi Ho\" - Arijit Singh"),
            "Tum Hi Ho - Arijit Singh"
        );
        assert_eq!(clean_recommendation("12. Shayad - Pritam"), "Shayad - Pritam");
    }

    #[test]
    fn clean_keeps_leading_digits_without_dot() {
        assert_eq!(clean_recommendation("2Pac - Changes"), "2Pac - Changes");
    }

    #[test]
    fn filter_drops_short_and_separatorless_lines() {
        let raw = "Sure! Here you go:\n1. Kesariya - Arijit Singh\na-b\nThanks";
        assert_eq!(filter_recommendations(raw), vec!["Kesariya - Arijit Singh"]);
    }
}
