use super::{namehash, NameError};
use alloy::primitives::B256;
use ens_normalize_rs::EnsNameNormalizer;

const DELIMITER: char = '.';

/// Turns user input into a resolvable name: trimmed, lowercased and, for a
/// bare label, suffixed with `.<suffix>`. Names that already contain a
/// delimiter keep their domain part, whatever it is.
pub fn normalize_query(query: &str, suffix: &str) -> Result<String, NameError> {
    let name = query.trim().to_lowercase();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.contains(DELIMITER) {
        Ok(name)
    } else {
        let suffix = suffix.trim().trim_start_matches(DELIMITER).to_lowercase();
        Ok(format!("{name}{DELIMITER}{suffix}"))
    }
}

pub struct NameNormalizer {
    suffix: String,
    ens: EnsNameNormalizer,
}

impl NameNormalizer {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
            ens: EnsNameNormalizer::default(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn normalize_query(&self, query: &str) -> Result<String, NameError> {
        normalize_query(query, &self.suffix)
    }

    /// ENSIP-15 normalization followed by namehash.
    pub fn node(&self, name: &str) -> Result<B256, NameError> {
        let normalized = self
            .ens
            .normalize(name)
            .map_err(|err| NameError::Invalid(name.to_string(), err.to_string()))?;
        Ok(namehash(&normalized))
    }
}

impl std::fmt::Debug for NameNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameNormalizer")
            .field("suffix", &self.suffix)
            .finish_non_exhaustive()
    }
}
