use serde::{Deserialize, Serialize};

use crate::wa;

/// A track ID: the stream-source (`youtube_id`) identity key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackId(pub String);
impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl TrackId {
    /// The ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A track, as `warbler` cares about it. Immutable once constructed;
/// compared and deduplicated solely by [`TrackId`].
#[derive(Debug, Clone)]
pub struct Track {
    /// The track ID
    pub id: TrackId,
    /// The track name
    pub name: String,
    /// The primary artists display string
    pub primary_artists: String,
    /// Image variant URLs, ordered by resolution tier
    pub image: Vec<wa::ImageVariant>,
    /// The duration, when the backend knows it
    pub duration: Option<std::time::Duration>,
}
impl Track {
    /// The resolution tier used as the canonical display size.
    const DISPLAY_TIER: usize = 2;

    /// The canonical display image URL: tier 2 when present, falling back
    /// to the first variant.
    pub fn display_image(&self) -> Option<&str> {
        self.image
            .get(Self::DISPLAY_TIER)
            .or_else(|| self.image.first())
            .map(|v| v.url.as_str())
    }

    /// The `"NAME" by ARTISTS` form used as an assistant prompt key.
    pub fn prompt_key(&self) -> String {
        format!("\"{}\" by {}", self.name, self.primary_artists)
    }
}
impl From<wa::TrackItem> for Track {
    fn from(item: wa::TrackItem) -> Self {
        Track {
            id: TrackId(item.youtube_id),
            name: item.name,
            primary_artists: item.primary_artists,
            image: item.image,
            duration: item
                .duration
                .filter(|d| d.is_finite() && *d > 0.0)
                .map(std::time::Duration::from_secs_f64),
        }
    }
}
impl From<&Track> for wa::TrackItem {
    fn from(track: &Track) -> Self {
        wa::TrackItem {
            youtube_id: track.id.0.clone(),
            name: track.name.clone(),
            primary_artists: track.primary_artists.clone(),
            image: track.image.clone(),
            duration: track.duration.map(|d| d.as_secs_f64()),
        }
    }
}
impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Track {}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_with_tiers(tiers: &[&str]) -> Track {
        Track {
            id: TrackId("id".to_string()),
            name: "Song".to_string(),
            primary_artists: "Artist".to_string(),
            image: tiers
                .iter()
                .map(|url| wa::ImageVariant {
                    quality: None,
                    url: url.to_string(),
                })
                .collect(),
            duration: None,
        }
    }

    #[test]
    fn display_image_prefers_tier_two() {
        let track = track_with_tiers(&["low", "mid", "high"]);
        assert_eq!(track.display_image(), Some("high"));
    }

    #[test]
    fn display_image_falls_back_to_first() {
        let track = track_with_tiers(&["only"]);
        assert_eq!(track.display_image(), Some("only"));
        assert_eq!(track_with_tiers(&[]).display_image(), None);
    }

    #[test]
    fn prompt_key_quotes_name_and_artists() {
        let track = track_with_tiers(&[]);
        assert_eq!(track.prompt_key(), "\"Song\" by Artist");
    }

    #[test]
    fn equality_is_by_id_only() {
        let mut a = track_with_tiers(&[]);
        let mut b = track_with_tiers(&[]);
        b.name = "Different Name".to_string();
        assert_eq!(a, b);
        a.id = TrackId("other".to_string());
        assert_ne!(a, b);
    }
}
