use crate::{
    resolver::{AddressResolver, ResolveError},
    score::{ScoreError, ScoreRecord, ScoreSource},
};
use std::sync::Arc;
use tracing::instrument;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("name is required")]
    InvalidInput,
    #[error("could not resolve this name")]
    NotFound,
    #[error("{message}")]
    Upstream {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("{0}")]
    Internal(String),
}

impl From<ResolveError> for PipelineError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidInput => PipelineError::InvalidInput,
            ResolveError::NotFound(_) => PipelineError::NotFound,
            ResolveError::Rpc(err) => PipelineError::Internal(err.to_string()),
        }
    }
}

impl From<ScoreError> for PipelineError {
    fn from(err: ScoreError) -> Self {
        match err {
            ScoreError::Upstream { status, message } => PipelineError::Upstream { status, message },
            err => PipelineError::Internal(err.to_string()),
        }
    }
}

/// Name in, score record out: resolve the name, then ask the score source
/// about the resolved address. Steps never run concurrently and are never
/// retried.
#[derive(Clone)]
pub struct ScorePipeline {
    resolver: Arc<dyn AddressResolver>,
    scores: Arc<dyn ScoreSource>,
}

impl ScorePipeline {
    pub fn new(resolver: Arc<dyn AddressResolver>, scores: Arc<dyn ScoreSource>) -> Self {
        Self { resolver, scores }
    }

    #[instrument(name = "pipeline:builder_score", skip(self), err, level = "info")]
    pub async fn builder_score(&self, name: Option<&str>) -> Result<ScoreRecord, PipelineError> {
        let name = name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or(PipelineError::InvalidInput)?;
        let address = self.resolver.resolve(name).await?;
        let record = self.scores.fetch_score(address).await?;
        Ok(record)
    }
}

impl std::fmt::Debug for ScorePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScorePipeline").finish_non_exhaustive()
    }
}
