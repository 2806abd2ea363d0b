mod avatar;
mod params;
mod render;

pub use avatar::{data_uri, AvatarError, AvatarFetcher, DEFAULT_CONTENT_TYPE};
pub use params::{
    group_digits, is_public_host, AvatarSource, IdenticonTemplates, OgParams, RankLabel,
    DEFAULT_ADDRESS_IDENTICON_URL, DEFAULT_NAME_IDENTICON_URL,
};
pub use render::{ImageFormat, ImageRenderer, RenderError, HEIGHT, WIDTH};

use crate::metrics;
use render::{CARD_TEMPLATE, FALLBACK_TEMPLATE};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// Unique query strings act as cache busters, so a rendered image never changes.
pub const CACHE_CONTROL: &str = "public, immutable, no-transform, max-age=31536000";

/// Everything the personalised card shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub name: String,
    pub score: String,
    pub rank: String,
    pub avatar: Option<String>,
}

#[derive(Debug)]
pub struct ImageComposer {
    renderer: Arc<ImageRenderer>,
    avatars: AvatarFetcher,
    identicons: IdenticonTemplates,
    private_avatar_hosts: bool,
    fallback: Vec<u8>,
}

impl ImageComposer {
    /// Renders the fallback image once, so serving it can not fail later.
    pub fn new(
        renderer: ImageRenderer,
        avatars: AvatarFetcher,
        identicons: IdenticonTemplates,
    ) -> Result<Self, RenderError> {
        let fallback = renderer.render(FALLBACK_TEMPLATE, &serde_json::json!({}))?;
        Ok(Self {
            renderer: Arc::new(renderer),
            avatars,
            identicons,
            private_avatar_hosts: false,
            fallback,
        })
    }

    /// Lets explicit avatars point at loopback and private network hosts.
    pub fn allow_private_avatar_hosts(mut self, allow: bool) -> Self {
        self.private_avatar_hosts = allow;
        self
    }

    pub fn content_type(&self) -> &'static str {
        self.renderer.format().content_type()
    }

    pub fn fallback(&self) -> &[u8] {
        &self.fallback
    }

    /// Always produces an image: the branded fallback when name or score is
    /// missing or when the card cannot be rendered.
    #[instrument(name = "og:compose", skip_all, fields(name = ?params.name, score = ?params.score))]
    pub async fn compose(&self, params: &OgParams) -> Vec<u8> {
        let Some(view) = self.card_view(params).await else {
            metrics::OG_RENDER_TOTAL.with_label_values(&["fallback"]).inc();
            return self.fallback.clone();
        };
        let renderer = self.renderer.clone();
        let rendered =
            tokio::task::spawn_blocking(move || renderer.render(CARD_TEMPLATE, &view)).await;
        match rendered.map_err(RenderError::from).and_then(|result| result) {
            Ok(image) => {
                metrics::OG_RENDER_TOTAL.with_label_values(&["card"]).inc();
                image
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to render card, serving fallback image");
                metrics::OG_RENDER_TOTAL.with_label_values(&["fallback"]).inc();
                self.fallback.clone()
            }
        }
    }

    /// `None` when the fallback image should be drawn. No avatar is fetched
    /// in that case.
    pub async fn card_view(&self, params: &OgParams) -> Option<CardView> {
        let (name, score) = params.card()?;
        let rank = RankLabel::parse(params.rank());
        let avatar = match AvatarSource::choose(params, &self.identicons) {
            Some(AvatarSource::Explicit(url))
                if !self.private_avatar_hosts && !is_public_host(&url) =>
            {
                tracing::warn!(url = %url, "avatar host is not public, skipped");
                metrics::OG_AVATAR_TOTAL.with_label_values(&["skipped"]).inc();
                None
            }
            Some(source) => self.avatars.fetch_data_uri(source.url()).await,
            None => {
                metrics::OG_AVATAR_TOTAL.with_label_values(&["skipped"]).inc();
                None
            }
        };
        Some(CardView {
            name: name.to_string(),
            score: score.to_string(),
            rank: rank.to_string(),
            avatar,
        })
    }
}
