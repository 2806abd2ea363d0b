use resvg::{tiny_skia, usvg};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};
use tera::{Context, Tera};

pub const WIDTH: u32 = 1200;
pub const HEIGHT: u32 = 800;

pub const CARD_TEMPLATE: &str = "card.svg";
pub const FALLBACK_TEMPLATE: &str = "fallback.svg";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Svg => "image/svg+xml",
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("invalid svg: {0}")]
    Svg(#[from] usvg::Error),
    #[error("rasterization failed: {0}")]
    Raster(String),
    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Fills svg templates and, for png output, rasterizes them at the fixed
/// preview size.
pub struct ImageRenderer {
    templates: Tera,
    format: ImageFormat,
    fonts: Arc<usvg::fontdb::Database>,
}

impl ImageRenderer {
    pub fn new(format: ImageFormat) -> Result<Self, RenderError> {
        let mut templates = Tera::default();
        templates.autoescape_on(vec![".svg"]);
        templates.add_raw_templates(vec![
            (CARD_TEMPLATE, include_str!("templates/card.svg")),
            (FALLBACK_TEMPLATE, include_str!("templates/fallback.svg")),
        ])?;

        let mut fonts = usvg::fontdb::Database::new();
        if format == ImageFormat::Png {
            fonts.load_system_fonts();
            tracing::info!(faces = fonts.len(), "loaded system fonts");
        }

        Ok(Self {
            templates,
            format,
            fonts: Arc::new(fonts),
        })
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[tracing::instrument(name = "og:render", skip(self, view), level = "debug", err)]
    pub fn render<T: Serialize>(&self, template: &str, view: &T) -> Result<Vec<u8>, RenderError> {
        let mut context = Context::from_serialize(view)?;
        context.insert("width", &WIDTH);
        context.insert("height", &HEIGHT);
        let svg = self.templates.render(template, &context)?;
        match self.format {
            ImageFormat::Svg => Ok(svg.into_bytes()),
            ImageFormat::Png => self.rasterize(&svg),
        }
    }

    fn rasterize(&self, svg: &str) -> Result<Vec<u8>, RenderError> {
        let options = usvg::Options {
            fontdb: self.fonts.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(svg, &options)?;
        let mut pixmap = tiny_skia::Pixmap::new(WIDTH, HEIGHT)
            .ok_or_else(|| RenderError::Raster("cannot allocate canvas".to_string()))?;
        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());
        pixmap
            .encode_png()
            .map_err(|err| RenderError::Raster(err.to_string()))
    }
}

impl fmt::Debug for ImageRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageRenderer")
            .field("format", &self.format)
            .field("fonts", &self.fonts.len())
            .finish_non_exhaustive()
    }
}
