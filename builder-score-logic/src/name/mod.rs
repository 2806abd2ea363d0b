mod hash_name;
mod normalize;

pub use hash_name::{hex, namehash};
pub use normalize::{normalize_query, NameNormalizer};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("name is required")]
    Empty,
    #[error("name '{0}' is invalid: {1}")]
    Invalid(String, String),
}
