use crate::{Client, ClientResult};

/// Audio proxy endpoints.
impl Client {
    /// The streamable audio URL for a track. Used directly as the playback
    /// source and as the download target.
    pub fn proxy_audio_url(&self, yt_id: &str) -> String {
        format!("{}/proxy-audio?yt_id={yt_id}", self.base_url)
    }

    /// Download the audio bytes for a track.
    pub async fn download(&self, yt_id: &str) -> ClientResult<Vec<u8>> {
        let response = self
            .client
            .get(format!("{}/proxy-audio", self.base_url))
            .query(&[("yt_id", yt_id)])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.into())
    }
}
