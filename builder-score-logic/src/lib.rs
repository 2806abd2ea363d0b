pub mod metrics;
pub mod name;
pub mod og;
pub mod pipeline;
pub mod resolver;
pub mod score;
pub mod share;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use alloy::primitives::Address;
pub use pipeline::{PipelineError, ScorePipeline};
pub use resolver::{AddressResolver, OnchainResolver, ResolveError};
pub use score::{BuilderScore, ScoreClient, ScoreError, ScoreRecord, ScoreSource};
