use crate::{
    services::{
        route_builder_score, route_health, route_metadata, route_og, BuilderScoreService,
        HealthService, MetadataService, OgService,
    },
    settings::Settings,
};
use anyhow::Context;
use blockscout_service_launcher::{launcher, launcher::LaunchSettings};
use builder_score_logic::{
    og::{AvatarFetcher, IdenticonTemplates, ImageComposer, ImageRenderer},
    OnchainResolver, ScoreClient, ScorePipeline,
};
use std::sync::Arc;

const SERVICE_NAME: &str = "builder_score";

#[derive(Clone)]
struct Router {
    builder_score: Arc<BuilderScoreService>,
    og: Arc<OgService>,
    metadata: Arc<MetadataService>,
    health: Arc<HealthService>,
}

impl Router {
    pub fn grpc_router(&self) -> tonic::transport::server::Router {
        let (_reporter, health) = tonic_health::server::health_reporter();
        tonic::transport::Server::builder().add_service(health)
    }
}

impl launcher::HttpRouter for Router {
    fn register_routes(&self, service_config: &mut actix_web::web::ServiceConfig) {
        service_config.configure(|config| route_health(config, self.health.clone()));
        service_config
            .configure(|config| route_builder_score(config, self.builder_score.clone()));
        service_config.configure(|config| route_og(config, self.og.clone()));
        service_config.configure(|config| route_metadata(config, self.metadata.clone()));
    }
}

pub async fn run(settings: Settings) -> Result<(), anyhow::Error> {
    blockscout_service_launcher::tracing::init_logs(
        SERVICE_NAME,
        &settings.tracing,
        &settings.jaeger,
    )?;

    let resolver = OnchainResolver::new(
        settings.resolver.rpc_url,
        settings.resolver.resolver_contract,
        settings.resolver.suffix,
    );
    tracing::info!(?resolver, "name resolver configured");
    let scores = ScoreClient::new(settings.score_api.url, settings.score_api.timeout)
        .context("failed to build score api client")?;
    let pipeline = ScorePipeline::new(Arc::new(resolver), Arc::new(scores));

    let renderer =
        ImageRenderer::new(settings.og.format).context("failed to initialize image renderer")?;
    let avatars = AvatarFetcher::new(settings.og.avatar_timeout, settings.og.avatar_max_size)
        .context("failed to build avatar client")?;
    let identicons = IdenticonTemplates {
        address: settings.og.address_identicon_url,
        name: settings.og.name_identicon_url,
    };
    let composer = ImageComposer::new(renderer, avatars, identicons)
        .context("failed to render fallback image")?
        .allow_private_avatar_hosts(settings.og.allow_private_avatar_hosts);

    let router = Router {
        builder_score: Arc::new(BuilderScoreService::new(pipeline)),
        og: Arc::new(OgService::new(composer)),
        metadata: Arc::new(MetadataService::new(settings.share.app_url)),
        health: Arc::new(HealthService),
    };

    let grpc_router = router.grpc_router();
    let http_router = router;

    let launch_settings = LaunchSettings {
        service_name: SERVICE_NAME.to_string(),
        server: settings.server,
        metrics: settings.metrics,
        graceful_shutdown: Default::default(),
    };

    launcher::launch(launch_settings, http_router, grpc_router).await
}
