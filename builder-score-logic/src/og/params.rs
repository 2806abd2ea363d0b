use serde::{Deserialize, Serialize};
use std::{fmt, net::Ipv4Addr};
use url::{form_urlencoded, Host, Url};

pub const DEFAULT_ADDRESS_IDENTICON_URL: &str = "https://effigy.im/a/{address}.png";
pub const DEFAULT_NAME_IDENTICON_URL: &str =
    "https://api.dicebear.com/9.x/identicon/png?seed={name}";

/// Placeholder clients send when they have no address to share.
const UNDEFINED: &str = "undefined";

/// Query of the preview image endpoint. Every field is optional and an empty
/// value counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OgParams {
    pub name: Option<String>,
    pub score: Option<String>,
    pub rank: Option<String>,
    pub address: Option<String>,
    pub avatar: Option<String>,
}

impl OgParams {
    /// Lenient parsing: unknown keys are ignored, the first occurrence of a
    /// key wins and malformed percent-encoding is decoded lossily.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            let slot = match key.as_ref() {
                "name" => &mut params.name,
                "score" => &mut params.score,
                "rank" => &mut params.rank,
                "address" => &mut params.address,
                "avatar" => &mut params.avatar,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    pub fn name(&self) -> Option<&str> {
        present(&self.name)
    }

    pub fn score(&self) -> Option<&str> {
        present(&self.score)
    }

    pub fn rank(&self) -> Option<&str> {
        present(&self.rank)
    }

    pub fn address(&self) -> Option<&str> {
        present(&self.address).filter(|address| *address != UNDEFINED)
    }

    pub fn avatar(&self) -> Option<&str> {
        present(&self.avatar)
    }

    /// Name and score, if both are given. Without them only the fallback
    /// image can be drawn.
    pub fn card(&self) -> Option<(&str, &str)> {
        Some((self.name()?, self.score()?))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankLabel {
    Ranked(u64),
    Unranked,
}

impl RankLabel {
    /// Reads the leading decimal digits after an optional `+`, so `12.9`
    /// and `12abc` both give 12 and `1e3` gives 1. No leading digit,
    /// including `null`, `undefined`, `NaN` and negative values, or a
    /// position below one is unranked.
    pub fn parse(rank: Option<&str>) -> Self {
        let Some(rank) = rank.map(str::trim) else {
            return Self::Unranked;
        };
        let unsigned = rank.strip_prefix('+').unwrap_or(rank);
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        match &unsigned[..end] {
            "" => Self::Unranked,
            digits => Self::from_position(digits.parse().unwrap_or(u64::MAX)),
        }
    }

    pub fn from_position(position: u64) -> Self {
        if position == 0 {
            Self::Unranked
        } else {
            Self::Ranked(position)
        }
    }

    pub fn position(&self) -> Option<u64> {
        match self {
            Self::Ranked(position) => Some(*position),
            Self::Unranked => None,
        }
    }
}

impl fmt::Display for RankLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ranked(position) => write!(f, "Top #{}", group_digits(*position)),
            Self::Unranked => f.write_str("Unranked"),
        }
    }
}

/// `1234567` -> `1,234,567`
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdenticonTemplates {
    /// Must contain `{address}`.
    pub address: String,
    /// Must contain `{name}`.
    pub name: String,
}

impl Default for IdenticonTemplates {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS_IDENTICON_URL.to_string(),
            name: DEFAULT_NAME_IDENTICON_URL.to_string(),
        }
    }
}

impl IdenticonTemplates {
    pub fn for_address(&self, address: &str) -> Option<Url> {
        fill(&self.address, "{address}", address)
    }

    pub fn for_name(&self, name: &str) -> Option<Url> {
        fill(&self.name, "{name}", name)
    }
}

fn fill(template: &str, placeholder: &str, value: &str) -> Option<Url> {
    let value: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    template.replace(placeholder, &value).parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarSource {
    Explicit(Url),
    AddressIdenticon(Url),
    NameIdenticon(Url),
}

impl AvatarSource {
    /// Explicit avatar first, then an identicon of the address, then an
    /// identicon of the name. An explicit avatar that is not an http(s) url
    /// means no avatar at all.
    pub fn choose(params: &OgParams, templates: &IdenticonTemplates) -> Option<Self> {
        if let Some(avatar) = params.avatar() {
            return Url::parse(avatar)
                .ok()
                .filter(|url| matches!(url.scheme(), "http" | "https"))
                .map(Self::Explicit);
        }
        if let Some(address) = params.address() {
            return templates.for_address(address).map(Self::AddressIdenticon);
        }
        params
            .name()
            .and_then(|name| templates.for_name(name))
            .map(Self::NameIdenticon)
    }

    pub fn url(&self) -> &Url {
        match self {
            Self::Explicit(url) | Self::AddressIdenticon(url) | Self::NameIdenticon(url) => url,
        }
    }
}

/// False for `localhost` and for literal loopback, private, shared,
/// link-local and unspecified addresses. Domain names are not resolved.
pub fn is_public_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.trim_end_matches('.').to_ascii_lowercase();
            domain != "localhost" && !domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => is_public_ipv4(ip),
        Some(Host::Ipv6(ip)) => match ip.to_ipv4_mapped() {
            Some(ip) => is_public_ipv4(ip),
            None => {
                let first = ip.segments()[0];
                !(ip.is_loopback()
                    || ip.is_unspecified()
                    || first & 0xfe00 == 0xfc00
                    || first & 0xffc0 == 0xfe80)
            }
        },
        None => false,
    }
}

fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    let [first, second, ..] = ip.octets();
    !(ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        || (first == 100 && second & 0xc0 == 64))
}
