use crate::error::ApiError;
use actix_web::{web, HttpRequest};
use builder_score_logic::{PipelineError, ScorePipeline, ScoreRecord};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
struct BuilderScoreQuery {
    name: Option<String>,
}

pub struct BuilderScoreService {
    pipeline: ScorePipeline,
}

impl BuilderScoreService {
    pub fn new(pipeline: ScorePipeline) -> Self {
        Self { pipeline }
    }

    pub async fn builder_score(&self, name: Option<&str>) -> Result<ScoreRecord, ApiError> {
        self.pipeline.builder_score(name).await.map_err(|err| {
            match &err {
                PipelineError::InvalidInput | PipelineError::NotFound => {
                    tracing::debug!(?name, error = %err, "builder score request rejected")
                }
                PipelineError::Upstream { status, .. } => {
                    tracing::error!(?name, %status, error = %err, "score api failed")
                }
                PipelineError::Internal(_) => {
                    tracing::error!(?name, error = %err, "builder score request failed")
                }
            };
            ApiError::from(err)
        })
    }
}

async fn builder_score(
    service: web::Data<BuilderScoreService>,
    request: HttpRequest,
) -> Result<web::Json<ScoreRecord>, ApiError> {
    let query = web::Query::<BuilderScoreQuery>::from_query(request.query_string())
        .map(web::Query::into_inner)
        .unwrap_or_default();
    let record = service.builder_score(query.name.as_deref()).await?;
    Ok(web::Json(record))
}

pub fn route_builder_score(config: &mut web::ServiceConfig, service: Arc<BuilderScoreService>) {
    config
        .app_data(web::Data::from(service))
        .route("/api/builder-score", web::get().to(builder_score));
}
