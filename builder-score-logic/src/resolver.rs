use crate::{
    metrics,
    name::{NameError, NameNormalizer},
};
use alloy::{
    network::Ethereum,
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
    sol,
};
use async_trait::async_trait;
use tracing::instrument;
use url::Url;

sol! {
    #[sol(rpc)]
    interface IAddrResolver {
        function addr(bytes32 node) external view returns (address);
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    #[error("name is required")]
    InvalidInput,
    #[error("could not resolve name '{0}'")]
    NotFound(String),
    #[error("resolver call failed: {0}")]
    Rpc(#[from] alloy::contract::Error),
}

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolves user input (a bare label or a full name) into an account address.
    async fn resolve(&self, query: &str) -> Result<Address, ResolveError>;
}

/// Resolves names with a single `addr(bytes32)` read against one fixed
/// resolver contract. The universal resolver is not used: it reverts for
/// unregistered names instead of returning the zero address.
pub struct OnchainResolver {
    provider: DynProvider<Ethereum>,
    resolver_contract: Address,
    names: NameNormalizer,
}

impl OnchainResolver {
    pub fn new(rpc_url: Url, resolver_contract: Address, suffix: impl Into<String>) -> Self {
        let provider = ProviderBuilder::new().connect_http(rpc_url).erased();
        Self {
            provider,
            resolver_contract,
            names: NameNormalizer::new(suffix),
        }
    }
}

impl std::fmt::Debug for OnchainResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnchainResolver")
            .field("resolver_contract", &self.resolver_contract)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AddressResolver for OnchainResolver {
    #[instrument(name = "resolver:addr", skip(self), level = "debug", err)]
    async fn resolve(&self, query: &str) -> Result<Address, ResolveError> {
        let name = self.names.normalize_query(query)?;
        let node = match self.names.node(&name) {
            Ok(node) => node,
            Err(err) => {
                tracing::debug!(name = %name, error = %err, "name cannot be normalized");
                metrics::RESOLVE_TOTAL.with_label_values(&["not_found"]).inc();
                return Err(ResolveError::NotFound(name));
            }
        };

        let resolver = IAddrResolver::new(self.resolver_contract, self.provider.clone());
        match resolver.addr(node).call().await {
            Ok(address) if address.is_zero() => {
                metrics::RESOLVE_TOTAL.with_label_values(&["not_found"]).inc();
                Err(ResolveError::NotFound(name))
            }
            Ok(address) => {
                metrics::RESOLVE_TOTAL.with_label_values(&["found"]).inc();
                tracing::debug!(name = %name, %address, "name resolved");
                Ok(address)
            }
            // a revert comes back as a json-rpc error response
            Err(alloy::contract::Error::TransportError(err)) if err.is_error_resp() => {
                tracing::debug!(name = %name, error = %err, "resolver call reverted");
                metrics::RESOLVE_TOTAL.with_label_values(&["not_found"]).inc();
                Err(ResolveError::NotFound(name))
            }
            Err(err) => {
                metrics::RESOLVE_TOTAL.with_label_values(&["error"]).inc();
                Err(err.into())
            }
        }
    }
}

impl From<NameError> for ResolveError {
    fn from(err: NameError) -> Self {
        match err {
            NameError::Empty => ResolveError::InvalidInput,
            NameError::Invalid(name, _) => ResolveError::NotFound(name),
        }
    }
}
