mod error;
mod server;
mod services;
mod settings;

pub use error::{ApiError, ErrorBody};
pub use server::run;
pub use settings::{OgSettings, ResolverSettings, ScoreApiSettings, Settings, ShareSettings};
