use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Client, ClientResult, TrackItem};

/// The full persisted user-state payload exchanged with the backend.
///
/// Absent fields imply the documented defaults: empty history, empty liked
/// set, no playlists, no last-played track.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserState {
    /// Recently played tracks, most recent first.
    #[serde(default)]
    pub history: Vec<TrackItem>,
    /// Liked tracks.
    #[serde(default)]
    pub liked: Vec<TrackItem>,
    /// Named playlists.
    #[serde(default)]
    pub playlists: BTreeMap<String, Vec<TrackItem>>,
    /// The last track that was playing, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_song: Option<TrackItem>,
    /// The playback offset of the last track, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_time: Option<f64>,
}

/// User-state persistence endpoints.
impl Client {
    /// Fetch the stored user-state snapshot.
    pub async fn get_user_state(&self) -> ClientResult<UserState> {
        self.get_json("/api/user_state", &[]).await
    }

    /// Store the user-state snapshot as a full replacement.
    pub async fn save_user_state(&self, state: &UserState) -> ClientResult<()> {
        self.post_json("/api/user_state", state).await
    }

    /// Delete a history entry server-side.
    pub async fn delete_history(&self, yt_id: &str) -> ClientResult<()> {
        #[derive(Serialize)]
        struct DeleteHistoryRequest<'a> {
            yt_id: &'a str,
        }

        self.post_json("/api/delete_history", &DeleteHistoryRequest { yt_id })
            .await
    }
}
