use serde::{Deserialize, Serialize};

/// A track record as the backend returns it from search and state endpoints.
///
/// Field names follow the backend's wire format, which mixes snake_case
/// (`youtube_id`) and camelCase (`primaryArtists`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItem {
    /// The stream-source ID. Globally unique per song; the sole identity key.
    pub youtube_id: String,
    /// The display name of the track.
    pub name: String,
    /// The display string of the primary artists.
    #[serde(rename = "primaryArtists", default)]
    pub primary_artists: String,
    /// Image variants, ordered by resolution tier.
    #[serde(default)]
    pub image: Vec<ImageVariant>,
    /// The duration in seconds, when the backend knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// A single image variant at a given resolution tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageVariant {
    /// The resolution label, e.g. `"500x500"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// The image URL.
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_track() {
        let json = r#"{
            "youtube_id": "dQw4w9WgXcQ",
            "name": "Never Gonna Give You Up",
            "primaryArtists": "Rick Astley",
            "image": [
                {"quality": "50x50", "url": "http://img/50.jpg"},
                {"quality": "150x150", "url": "http://img/150.jpg"},
                {"quality": "500x500", "url": "http://img/500.jpg"}
            ],
            "duration": 213.0
        }"#;
        let track: TrackItem = serde_json::from_str(json).unwrap();
        assert_eq!(track.youtube_id, "dQw4w9WgXcQ");
        assert_eq!(track.primary_artists, "Rick Astley");
        assert_eq!(track.image.len(), 3);
        assert_eq!(track.image[2].url, "http://img/500.jpg");
        assert_eq!(track.duration, Some(213.0));
    }

    #[test]
    fn missing_optional_fields_default() {
        let json = r#"{"youtube_id": "abc123", "name": "Some Song"}"#;
        let track: TrackItem = serde_json::from_str(json).unwrap();
        assert_eq!(track.primary_artists, "");
        assert!(track.image.is_empty());
        assert!(track.duration.is_none());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let track = TrackItem {
            youtube_id: "abc123".to_string(),
            name: "Some Song".to_string(),
            primary_artists: "Some Artist".to_string(),
            image: vec![],
            duration: None,
        };
        let value = serde_json::to_value(&track).unwrap();
        assert!(value.get("primaryArtists").is_some());
        assert!(value.get("youtube_id").is_some());
    }
}
