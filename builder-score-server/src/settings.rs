use blockscout_service_launcher::{
    launcher::{ConfigSettings, MetricsSettings, ServerSettings},
    tracing::{JaegerSettings, TracingSettings},
};
use builder_score_logic::{
    og::{ImageFormat, DEFAULT_ADDRESS_IDENTICON_URL, DEFAULT_NAME_IDENTICON_URL},
    share::DEFAULT_APP_URL,
    Address,
};
use serde::Deserialize;
use std::time;
use url::Url;

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub metrics: MetricsSettings,
    #[serde(default)]
    pub tracing: TracingSettings,
    #[serde(default)]
    pub jaeger: JaegerSettings,

    #[serde(default)]
    pub resolver: ResolverSettings,
    #[serde(default)]
    pub score_api: ScoreApiSettings,
    #[serde(default)]
    pub og: OgSettings,
    #[serde(default)]
    pub share: ShareSettings,
}

impl ConfigSettings for Settings {
    const SERVICE_NAME: &'static str = "BUILDER_SCORE";
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverSettings {
    /// Read-only JSON-RPC endpoint of the chain the names live on.
    pub rpc_url: Url,
    /// Resolver queried with `addr(bytes32)`.
    pub resolver_contract: Address,
    /// Appended to queries without a `.`.
    pub suffix: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            rpc_url: Url::parse("https://mainnet.base.org").expect("should be valid url"),
            resolver_contract: "0xC6d566A56A1aFf6508b41f6c90ff131615583BCD"
                .parse()
                .expect("should be valid address"),
            suffix: "base.eth".to_string(),
        }
    }
}

#[serde_with::serde_as]
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreApiSettings {
    /// Scores are requested from `<url>/<address>`.
    pub url: Url,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub timeout: time::Duration,
}

impl Default for ScoreApiSettings {
    fn default() -> Self {
        Self {
            url: Url::parse("https://www.base.org/api/basenames/talentprotocol")
                .expect("should be valid url"),
            timeout: time::Duration::from_secs(10),
        }
    }
}

#[serde_with::serde_as]
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct OgSettings {
    pub format: ImageFormat,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub avatar_timeout: time::Duration,
    /// In bytes.
    pub avatar_max_size: usize,
    pub address_identicon_url: String,
    pub name_identicon_url: String,
    /// Explicit avatars on loopback or private network hosts are skipped
    /// unless this is set.
    pub allow_private_avatar_hosts: bool,
}

impl Default for OgSettings {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            avatar_timeout: time::Duration::from_secs(5),
            avatar_max_size: 1024 * 1024,
            address_identicon_url: DEFAULT_ADDRESS_IDENTICON_URL.to_string(),
            name_identicon_url: DEFAULT_NAME_IDENTICON_URL.to_string(),
            allow_private_avatar_hosts: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ShareSettings {
    /// Public url of the app, used in share links and page metadata.
    pub app_url: Url,
}

impl Default for ShareSettings {
    fn default() -> Self {
        Self {
            app_url: Url::parse(DEFAULT_APP_URL).expect("should be valid url"),
        }
    }
}
