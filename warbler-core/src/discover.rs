use futures::future::join_all;
use warbler_state::Track;

use crate::{Event, HomeSection, logic::Shared, playback::PlayKind};

/// Derive the search prefix personalizing the mood sections: a regional
/// bucket keyed off the track's name and artists, followed by the artist
/// names themselves. Keyword buckets, not a classifier; unknown tracks get
/// the global bucket.
fn vibe_key(name: &str, artists: &str) -> String {
    let a = format!("{name} {artists}").to_lowercase();
    const BUCKETS: &[(&[&str], &str)] = &[
        (
            &[
                "arijit", "jubin", "neha", "badshah", "shreya", "t-series", "vishal", "shekhar",
            ],
            "Bollywood ",
        ),
        (
            &["bts", "blackpink", "twice", "stray kids", "newjeans"],
            "K-Pop ",
        ),
        (
            &["sidhu", "diljit", "karan", "ap dhillon"],
            "Punjabi ",
        ),
        (
            &["anirudh", "ar rahman", "sid sriram"],
            "South Indian Movie ",
        ),
        (
            &["bad bunny", "j balvin", "karol g"],
            "Latin ",
        ),
    ];
    let prefix = BUCKETS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| a.contains(k)))
        .map(|(_, prefix)| *prefix)
        .unwrap_or("Global English ");
    format!("{prefix}{artists} ")
}

/// The discovery feed layout: mood sections, personalized by the current
/// track's vibe when something is playing.
fn section_queries(playing: Option<&Track>) -> Vec<(String, String)> {
    let mut sections = Vec::new();
    if let Some(track) = playing {
        let vibe = vibe_key(&track.name, &track.primary_artists);
        sections.push((
            "More of what you love".to_string(),
            format!("{} latest collection", track.primary_artists),
        ));
        sections.push((
            "Feel Good Morning".to_string(),
            format!("{vibe}happy morning energetic songs"),
        ));
        sections.push((
            "Action & Power".to_string(),
            format!("{vibe}workout motivation powerful beats"),
        ));
        sections.push((
            "Romantic Evening".to_string(),
            format!("{vibe}romantic love songs"),
        ));
        sections.push((
            "Late Night Lo-Fi".to_string(),
            format!("{vibe}lofi chill relax beats"),
        ));
    } else {
        sections.push((
            "Feel Good Morning".to_string(),
            "happy morning energetic songs".to_string(),
        ));
        sections.push((
            "Action & Power".to_string(),
            "workout motivation powerful beats".to_string(),
        ));
        sections.push((
            "Romantic Evening".to_string(),
            "romantic love songs".to_string(),
        ));
        sections.push((
            "Late Night Lo-Fi".to_string(),
            "lofi chill relax beats".to_string(),
        ));
    }
    sections
}

impl Shared {
    /// Load the discovery feed. Sections are fetched concurrently; a failed
    /// or empty section is dropped rather than failing the feed.
    pub(crate) fn load_home(&self) {
        let playing = self.read_state().current_track().cloned();
        let shared = self.clone();
        self.spawn(async move {
            let queries = section_queries(playing.as_ref());
            let fetches = queries.into_iter().map(|(label, query)| {
                let client = shared.client.clone();
                async move {
                    match client.search(&query).await {
                        Ok(items) => Some(HomeSection {
                            label,
                            tracks: items.into_iter().map(Track::from).collect(),
                        }),
                        Err(err) => {
                            tracing::debug!("home section {label:?} failed: {err}");
                            None
                        }
                    }
                }
            });

            let sections: Vec<HomeSection> = join_all(fetches)
                .await
                .into_iter()
                .flatten()
                .filter(|section| !section.tracks.is_empty())
                .collect();
            shared.emit(Event::HomeLoaded(sections));
        });
    }

    /// Run a search and replace the active playlist with the results.
    /// Optionally starts playing the first result.
    pub(crate) fn run_search(&self, query: String, autoplay_first: bool) {
        let shared = self.clone();
        self.spawn(async move {
            let tracks: Vec<Track> = match shared.client.search(&query).await {
                Ok(items) => items.into_iter().map(Track::from).collect(),
                Err(err) => {
                    tracing::warn!("search {query:?} failed: {err}");
                    shared.emit(Event::Notice("Search failed. Try again.".to_string()));
                    return;
                }
            };

            if tracks.is_empty() {
                shared.emit(Event::Notice(format!("No results for \"{query}\".")));
                return;
            }

            {
                let mut state = shared.write_state();
                state.playlist = tracks.clone();
                state.current_idx = 0;
            }
            shared.emit(Event::SearchLoaded { query, tracks });
            if autoplay_first {
                shared.play_at(0, PlayKind::Fresh);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vibe_buckets_by_keyword_and_appends_artists() {
        assert_eq!(vibe_key("Tum Hi Ho", "Arijit Singh"), "Bollywood Arijit Singh ");
        assert_eq!(vibe_key("Dynamite", "BTS"), "K-Pop BTS ");
        assert_eq!(vibe_key("Brown Munde", "AP Dhillon"), "Punjabi AP Dhillon ");
        assert_eq!(
            vibe_key("Vaathi Coming", "Anirudh Ravichander"),
            "South Indian Movie Anirudh Ravichander "
        );
        assert_eq!(vibe_key("Titi Me Pregunto", "Bad Bunny"), "Latin Bad Bunny ");
        assert_eq!(
            vibe_key("Anti-Hero", "Taylor Swift"),
            "Global English Taylor Swift "
        );
    }

    #[test]
    fn vibe_matches_on_track_name_too() {
        // The name carries the signal when the artist field is generic.
        assert_eq!(
            vibe_key("BTS Dynamite Remix", "Various Artists"),
            "K-Pop Various Artists "
        );
    }

    #[test]
    fn sections_personalize_when_playing() {
        let track = Track {
            id: warbler_state::TrackId("abc123xyz00".to_string()),
            name: "Tum Hi Ho".to_string(),
            primary_artists: "Arijit Singh".to_string(),
            image: vec![],
            duration: None,
        };
        let sections = section_queries(Some(&track));
        assert_eq!(sections.len(), 5);
        assert_eq!(sections[0].0, "More of what you love");
        assert!(sections[0].1.contains("Arijit Singh"));
        // Every mood section carries the bucket and the artist names.
        for (_, query) in &sections[1..] {
            assert!(query.starts_with("Bollywood Arijit Singh "));
        }
    }

    #[test]
    fn sections_generic_when_idle() {
        let sections = section_queries(None);
        assert_eq!(sections.len(), 4);
        assert!(sections.iter().all(|(label, _)| label != "More of what you love"));
    }
}
