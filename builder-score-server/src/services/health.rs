use actix_web::web;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServingStatus {
    Serving,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResponse {
    pub status: ServingStatus,
}

#[derive(Debug, Default)]
pub struct HealthService;

impl HealthService {
    pub fn check(&self) -> HealthCheckResponse {
        HealthCheckResponse {
            status: ServingStatus::Serving,
        }
    }
}

async fn health(service: web::Data<HealthService>) -> web::Json<HealthCheckResponse> {
    web::Json(service.check())
}

pub fn route_health(config: &mut web::ServiceConfig, service: Arc<HealthService>) {
    config
        .app_data(web::Data::from(service))
        .route("/health", web::get().to(health));
}
