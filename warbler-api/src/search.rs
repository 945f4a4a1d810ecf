use crate::{Client, ClientResult, TrackItem};

/// Search-related functionality.
impl Client {
    /// Search the backend catalogue. Returns an ordered list of tracks,
    /// possibly empty.
    pub async fn search(&self, query: &str) -> ClientResult<Vec<TrackItem>> {
        self.get_json("/api/search", &[("q", query.to_string())])
            .await
    }
}
