use super::{ScoreError, ScoreRecord, ScoreSource, UpstreamScore};
use crate::metrics;
use alloy::primitives::Address;
use async_trait::async_trait;
use cached::proc_macro::cached;
use reqwest::{header, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;
use url::Url;

#[derive(Debug, Clone)]
pub struct ScoreClient {
    url: Url,
    inner: reqwest::Client,
}

impl ScoreClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, ScoreError> {
        if url.cannot_be_a_base() {
            return Err(ScoreError::InvalidUrl(url));
        }
        let inner = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, inner })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// `<url>/<checksummed address>`, a trailing slash of the base url is ignored.
    pub fn score_url(&self, address: &Address) -> Url {
        let mut url = self.url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&address.to_checksum(None));
        }
        url
    }
}

#[async_trait]
impl ScoreSource for ScoreClient {
    #[instrument(name = "score_api:fetch_score", skip(self), err, level = "debug")]
    async fn fetch_score(&self, address: Address) -> Result<ScoreRecord, ScoreError> {
        cached_score(self, &address).await
    }
}

#[cached(
    key = "String",
    convert = r#"{ format!("{}/{}", client.url(), address) }"#,
    result = true,
    time = 60,
    size = 10_000,
)]
async fn cached_score(client: &ScoreClient, address: &Address) -> Result<ScoreRecord, ScoreError> {
    let result = request_score(client, address).await;
    if result.is_err() {
        metrics::UPSTREAM_TOTAL.with_label_values(&["error"]).inc();
    }
    result
}

async fn request_score(client: &ScoreClient, address: &Address) -> Result<ScoreRecord, ScoreError> {
    let response = client
        .inner
        .get(client.score_url(address))
        .header(header::ACCEPT, "application/json")
        .send()
        .await?;

    match response.status() {
        StatusCode::NOT_FOUND => {
            tracing::debug!(%address, "score api has no record for address");
            metrics::UPSTREAM_TOTAL
                .with_label_values(&["not_found"])
                .inc();
            Ok(ScoreRecord::empty(*address))
        }
        status if status.is_success() => {
            let body = response.bytes().await?;
            let upstream: UpstreamScore = serde_json::from_slice(&body)
                .map_err(|err| ScoreError::InvalidResponse(err.to_string()))?;
            metrics::UPSTREAM_TOTAL.with_label_values(&["ok"]).inc();
            Ok(ScoreRecord::from_upstream(upstream, *address))
        }
        status => {
            let body = response.text().await.unwrap_or_default();
            Err(ScoreError::Upstream {
                status,
                message: upstream_message(status, &body),
            })
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

fn upstream_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorBody { error }) = serde_json::from_str(body) {
        return error;
    }
    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    } else {
        body.to_string()
    }
}
