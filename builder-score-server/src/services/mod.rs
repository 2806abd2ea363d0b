mod builder_score;
mod health;
mod metadata;
mod og;

pub use builder_score::{route_builder_score, BuilderScoreService};
pub use health::{route_health, HealthService};
pub use metadata::{route_metadata, MetadataService};
pub use og::{route_og, OgService};
