use crate::error::ShortenError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Step two: swap a long link for a short one. Failure here is soft.
#[async_trait]
pub trait Shortener: Send + Sync {
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenError>;
}

#[derive(Serialize)]
struct ShortenRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ShortenResponse {
    status: String,
    short_url: Option<String>,
}

#[derive(Clone)]
pub struct ReqwestShortener {
    client: reqwest::Client,
    url: String,
}

impl ReqwestShortener {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Shortener for ReqwestShortener {
    #[tracing::instrument(skip(self))]
    async fn shorten(&self, long_url: &str) -> Result<String, ShortenError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ShortenRequest { url: long_url })
            .send()
            .await?;

        // HTTP-level failure is checked before the body's own status
        let status = response.status();
        if !status.is_success() {
            return Err(ShortenError::Http(status.as_u16()));
        }

        let body = response.text().await?;
        parse_shorten_response(&body)
    }
}

pub fn parse_shorten_response(body: &str) -> Result<String, ShortenError> {
    let response: ShortenResponse =
        serde_json::from_str(body).map_err(|e| ShortenError::Malformed(e.to_string()))?;

    match response {
        ShortenResponse {
            status,
            short_url: Some(short_url),
        } if status == "success" => Ok(short_url),
        _ => Err(ShortenError::Rejected(body.to_string())),
    }
}
