use actix_web::{web, HttpRequest};
use builder_score_logic::{og::OgParams, share::PageMetadata};
use std::sync::Arc;
use url::Url;

pub struct MetadataService {
    app_url: Url,
}

impl MetadataService {
    pub fn new(app_url: Url) -> Self {
        Self { app_url }
    }

    pub fn page_metadata(&self, params: &OgParams) -> PageMetadata {
        PageMetadata::from_query(&self.app_url, params.name(), params.score(), params.rank())
    }
}

async fn metadata(
    service: web::Data<MetadataService>,
    request: HttpRequest,
) -> web::Json<PageMetadata> {
    let params = OgParams::from_query(request.query_string());
    web::Json(service.page_metadata(&params))
}

pub fn route_metadata(config: &mut web::ServiceConfig, service: Arc<MetadataService>) {
    config
        .app_data(web::Data::from(service))
        .route("/api/metadata", web::get().to(metadata));
}
