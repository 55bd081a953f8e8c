use crate::error::UploadError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

/// Step one: put a file somewhere durable and get its long link back.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// `encoded_content` is the bare base64 payload, without the data URL
    /// prefix.
    async fn store(
        &self,
        name: &str,
        mime_type: &str,
        encoded_content: &str,
    ) -> Result<String, UploadError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StorePayload<'a> {
    filename: &'a str,
    mime_type: &'a str,
    file_content: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreResponse {
    status: String,
    download_url: Option<String>,
    message: Option<String>,
}

/// Store client backed by the storage script endpoint
#[derive(Clone)]
pub struct ReqwestStoreClient {
    client: reqwest::Client,
    url: String,
}

impl ReqwestStoreClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl StoreClient for ReqwestStoreClient {
    #[tracing::instrument(skip(self, encoded_content), fields(payload_len = encoded_content.len()))]
    async fn store(
        &self,
        name: &str,
        mime_type: &str,
        encoded_content: &str,
    ) -> Result<String, UploadError> {
        let payload = StorePayload {
            filename: name,
            mime_type,
            file_content: encoded_content,
        };
        let body = serde_json::to_string(&payload)
            .map_err(|e| UploadError::MalformedResponse(e.to_string()))?;

        // The script endpoint reads the raw body; a plain text post keeps it
        // a simple request.
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %self.url, error = %e, "Store request failed");
                e
            })?;

        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(status = status.as_u16(), response_len = text.len(), "Store request completed");

        parse_store_response(&text)
    }
}

/// Interpret the store endpoint's JSON body. The body's `status` field decides
/// success, not the HTTP code.
pub fn parse_store_response(body: &str) -> Result<String, UploadError> {
    let response: StoreResponse = serde_json::from_str(body)
        .map_err(|e| UploadError::MalformedResponse(e.to_string()))?;

    if response.status != "success" {
        return Err(UploadError::Remote(
            response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Storage endpoint error".to_string()),
        ));
    }

    response.download_url.ok_or_else(|| {
        UploadError::MalformedResponse("success without downloadUrl".to_string())
    })
}
