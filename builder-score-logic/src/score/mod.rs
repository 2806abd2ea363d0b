mod client;

pub use client::ScoreClient;

use alloy::primitives::Address;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

pub const DEFAULT_SLUG: &str = "builder_score";

#[derive(thiserror::Error, Debug)]
pub enum ScoreError {
    #[error("score api request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("score api responded with {status}: {message}")]
    Upstream {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("score api returned invalid response: {0}")]
    InvalidResponse(String),
    #[error("score api url '{0}' cannot be used as a base url")]
    InvalidUrl(url::Url),
}

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait ScoreSource: Send + Sync {
    async fn fetch_score(&self, address: Address) -> Result<ScoreRecord, ScoreError>;
}

/// Reputation score as reported by the score api. Only the fields this
/// service reads are typed, everything else is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderScore {
    pub points: u64,
    #[serde(default)]
    pub rank_position: Option<u64>,
    #[serde(default)]
    pub last_calculated_at: Option<DateTime<Utc>>,
    #[serde(default = "default_slug")]
    pub slug: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BuilderScore {
    /// Score of an address the score api knows nothing about.
    pub fn empty() -> Self {
        Self {
            points: 0,
            rank_position: None,
            last_calculated_at: None,
            slug: default_slug(),
            extra: Map::new(),
        }
    }

    /// Upstream uses `0` for "no rank" in some responses.
    fn normalize(mut self) -> Self {
        if self.rank_position == Some(0) {
            tracing::warn!(
                slug = %self.slug,
                "score api returned rank_position 0, treating as unranked"
            );
            self.rank_position = None;
        }
        self
    }
}

fn default_slug() -> String {
    DEFAULT_SLUG.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: BuilderScore,
    #[serde(serialize_with = "serialize_checksummed")]
    pub address: Address,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScoreRecord {
    pub fn empty(address: Address) -> Self {
        Self {
            score: BuilderScore::empty(),
            address,
            extra: Map::new(),
        }
    }

    fn from_upstream(upstream: UpstreamScore, address: Address) -> Self {
        let mut extra = upstream.extra;
        extra.remove("address");
        Self {
            score: upstream.score.normalize(),
            address,
            extra,
        }
    }
}

/// Successful score api body.
#[derive(Debug, Deserialize)]
struct UpstreamScore {
    score: BuilderScore,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn serialize_checksummed<S>(address: &Address, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&address.to_checksum(None))
}
