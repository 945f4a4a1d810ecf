use futures::StreamExt as _;
use serde::Serialize;

use crate::{Client, ClientResult};

/// A request to the `/stream-ai` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AssistantRequest<'a> {
    /// The free-text prompt.
    pub prompt: &'a str,
    /// When set, the backend returns a complete blob of up-next suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_autoplay: Option<bool>,
    /// When set, the backend returns a complete blob of recommendations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_recommendation: Option<bool>,
}

impl<'a> AssistantRequest<'a> {
    /// A chat request; the response is a text stream.
    pub fn chat(prompt: &'a str) -> Self {
        Self {
            prompt,
            is_autoplay: None,
            is_recommendation: None,
        }
    }

    /// An autoplay-prediction request; the response is a complete blob.
    pub fn autoplay(prompt: &'a str) -> Self {
        Self {
            prompt,
            is_autoplay: Some(true),
            is_recommendation: None,
        }
    }

    /// A recommendation request; the response is a complete blob.
    pub fn recommendation(prompt: &'a str) -> Self {
        Self {
            prompt,
            is_autoplay: None,
            is_recommendation: Some(true),
        }
    }
}

/// AI assistant endpoints.
impl Client {
    /// Request a complete text blob from the assistant. Used for autoplay
    /// prediction and recommendations, whose lines are candidate suggestions.
    pub async fn assistant_complete(&self, request: &AssistantRequest<'_>) -> ClientResult<String> {
        let response = self.post_json_response("/stream-ai", request).await?;
        Ok(response.text().await?)
    }

    /// Request a chat response, forwarding each chunk to `on_chunk` as it
    /// arrives. Returns the accumulated text once the stream ends.
    ///
    /// Chunks are decoded lossily: a chunk boundary may fall inside a UTF-8
    /// sequence, and the display layer only needs best-effort text.
    pub async fn assistant_chat(
        &self,
        prompt: &str,
        mut on_chunk: impl FnMut(&str),
    ) -> ClientResult<String> {
        let response = self
            .post_json_response("/stream-ai", &AssistantRequest::chat(prompt))
            .await?;

        let mut accumulated = String::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            let text = String::from_utf8_lossy(&chunk);
            on_chunk(&text);
            accumulated.push_str(&text);
        }
        Ok(accumulated)
    }
}
