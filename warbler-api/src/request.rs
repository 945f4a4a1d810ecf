use serde::{Serialize, de::DeserializeOwned};

use crate::{Client, ClientError, ClientResult};

/// Making requests to the backend API.
impl Client {
    /// Make a GET request to the backend and deserialize the JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        parameters: &[(&str, String)],
    ) -> ClientResult<T> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(parameters)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(serde_json::from_slice(&response.bytes().await?)?)
    }

    /// Make a POST request with a JSON body and discard the response body.
    pub(crate) async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let response = self.post_json_raw(path, body).await?;
        let _ = Self::check_status(response).await?;
        Ok(())
    }

    /// Make a POST request with a JSON body and return the raw response,
    /// status-checked. Used by endpoints that stream or return text.
    pub(crate) async fn post_json_response<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<reqwest::Response> {
        let response = self.post_json_raw(path, body).await?;
        Self::check_status(response).await
    }

    async fn post_json_raw<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}{path}", self.base_url))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(body)?)
            .send()
            .await?)
    }

    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(ClientError::StatusError {
            status: status.as_u16(),
            body: response.text().await.ok().filter(|b| !b.is_empty()),
        })
    }
}
