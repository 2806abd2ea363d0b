use crate::metrics;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{header, StatusCode};
use std::time::Duration;
use tracing::instrument;
use url::Url;

pub const DEFAULT_CONTENT_TYPE: &str = "image/png";

#[derive(thiserror::Error, Debug)]
pub enum AvatarError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("avatar host responded with {0}")]
    Status(StatusCode),
    #[error("avatar is larger than {0} bytes")]
    TooLarge(usize),
}

/// Downloads avatars and inlines them as `data:` uris so the rendered image
/// has no external references.
#[derive(Debug, Clone)]
pub struct AvatarFetcher {
    client: reqwest::Client,
    max_size: usize,
}

impl AvatarFetcher {
    pub fn new(timeout: Duration, max_size: usize) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, max_size })
    }

    /// Never fails: a missing, slow or oversized avatar is logged and dropped.
    #[instrument(name = "og:fetch_avatar", skip(self), fields(url = %url), level = "debug")]
    pub async fn fetch_data_uri(&self, url: &Url) -> Option<String> {
        match self.fetch(url).await {
            Ok(data_uri) => {
                metrics::OG_AVATAR_TOTAL
                    .with_label_values(&["embedded"])
                    .inc();
                Some(data_uri)
            }
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "avatar skipped");
                metrics::OG_AVATAR_TOTAL.with_label_values(&["failed"]).inc();
                None
            }
        }
    }

    async fn fetch(&self, url: &Url) -> Result<String, AvatarError> {
        let mut response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(AvatarError::Status(response.status()));
        }
        if response
            .content_length()
            .is_some_and(|length| length > self.max_size as u64)
        {
            return Err(AvatarError::TooLarge(self.max_size));
        }

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_size {
                return Err(AvatarError::TooLarge(self.max_size));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(data_uri(&content_type, &body))
    }
}

pub fn data_uri(content_type: &str, data: &[u8]) -> String {
    format!("data:{content_type};base64,{}", STANDARD.encode(data))
}
