use actix_web::{http::header, web, HttpRequest, HttpResponse};
use builder_score_logic::og::{ImageComposer, OgParams, CACHE_CONTROL};
use std::sync::Arc;

pub struct OgService {
    composer: ImageComposer,
}

impl OgService {
    pub fn new(composer: ImageComposer) -> Self {
        Self { composer }
    }
}

/// Always 200: a missing or broken card degrades to the fallback image.
async fn og(service: web::Data<OgService>, request: HttpRequest) -> HttpResponse {
    let params = OgParams::from_query(request.query_string());
    let image = service.composer.compose(&params).await;
    HttpResponse::Ok()
        .content_type(service.composer.content_type())
        .insert_header((header::CACHE_CONTROL, CACHE_CONTROL))
        .body(image)
}

pub fn route_og(config: &mut web::ServiceConfig, service: Arc<OgService>) {
    config
        .app_data(web::Data::from(service))
        .route("/api/og", web::get().to(og));
}
