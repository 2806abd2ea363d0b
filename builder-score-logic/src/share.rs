//! Share links and the page metadata that link unfurlers read from them.

use crate::{og::RankLabel, score::ScoreRecord};
use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_APP_URL: &str = "https://builderscore.vercel.app";
pub const APP_NAME: &str = "Base Builder Score";
pub const LANDING_DESCRIPTION: &str = "Check your onchain reputation on Base";
pub const SPLASH_BACKGROUND_COLOR: &str = "#1e293b";

/// Rank value understood as "unranked" by every consumer of share links.
const UNRANKED: &str = "NaN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub name: String,
    pub score: u64,
    pub rank: Option<u64>,
    pub address: Address,
    pub avatar: Option<String>,
}

impl SharePayload {
    pub fn from_record(
        name: impl Into<String>,
        record: &ScoreRecord,
        avatar: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            score: record.score.points,
            rank: record.score.rank_position.filter(|rank| *rank > 0),
            address: record.address,
            avatar: avatar.filter(|avatar| !avatar.trim().is_empty()),
        }
    }

    /// `name`, `score`, `rank`, `t` and then either `avatar` or `address`.
    pub fn to_query_pairs(&self, timestamp: i64) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("name", self.name.clone()),
            ("score", self.score.to_string()),
            ("rank", self.rank_value()),
            ("t", timestamp.to_string()),
        ];
        pairs.push(self.avatar_pair());
        pairs
    }

    /// Link to the app that restores this result on load.
    pub fn share_url(&self, app_url: &Url, timestamp: i64) -> Url {
        let mut url = app_path(app_url, &[]);
        url.query_pairs_mut().extend_pairs(self.to_query_pairs(timestamp));
        url
    }

    pub fn og_image_url(&self, app_url: &Url) -> Url {
        let mut url = app_path(app_url, &["api", "og"]);
        url.query_pairs_mut()
            .append_pair("name", &self.name)
            .append_pair("score", &self.score.to_string())
            .append_pair("rank", &self.rank_value())
            .extend_pairs([self.avatar_pair()]);
        url
    }

    fn rank_value(&self) -> String {
        self.rank
            .map(|rank| rank.to_string())
            .unwrap_or_else(|| UNRANKED.to_string())
    }

    fn avatar_pair(&self) -> (&'static str, String) {
        match &self.avatar {
            Some(avatar) => ("avatar", avatar.clone()),
            None => ("address", self.address.to_checksum(None)),
        }
    }
}

/// Title, description and preview image of the app page, plus the mini app
/// embed that goes into the `fc:frame` meta tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub image_url: Url,
    pub frame: FrameEmbed,
}

impl PageMetadata {
    pub fn landing(app_url: &Url) -> Self {
        let image_url = app_path(app_url, &["hero.png"]);
        Self {
            title: APP_NAME.to_string(),
            description: LANDING_DESCRIPTION.to_string(),
            frame: FrameEmbed::new(app_url, image_url.clone()),
            image_url,
        }
    }

    /// Landing metadata unless both `name` and `score` are given.
    pub fn from_query(
        app_url: &Url,
        name: Option<&str>,
        score: Option<&str>,
        rank: Option<&str>,
    ) -> Self {
        let (Some(name), Some(score)) = (non_empty(name), non_empty(score)) else {
            return Self::landing(app_url);
        };
        let rank = non_empty(rank);

        let mut image_url = app_path(app_url, &["api", "og"]);
        {
            let mut query = image_url.query_pairs_mut();
            query.append_pair("name", name).append_pair("score", score);
            if let Some(rank) = rank {
                query.append_pair("rank", rank);
            }
        }
        let rank = match RankLabel::parse(rank) {
            RankLabel::Ranked(position) => position.to_string(),
            RankLabel::Unranked => "N/A".to_string(),
        };

        Self {
            title: format!("{name}'s Builder Score: {score}"),
            description: format!("Ranked #{rank}. Check your score now!"),
            frame: FrameEmbed::new(app_url, image_url.clone()),
            image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameEmbed {
    pub version: String,
    pub image_url: Url,
    pub button: FrameButton,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameButton {
    pub title: String,
    pub action: FrameAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameAction {
    #[serde(rename = "type")]
    pub action_type: String,
    pub name: String,
    pub url: Url,
    pub splash_image_url: Url,
    pub splash_background_color: String,
}

impl FrameEmbed {
    pub fn new(app_url: &Url, image_url: Url) -> Self {
        Self {
            version: "next".to_string(),
            image_url,
            button: FrameButton {
                title: "Check Your Score".to_string(),
                action: FrameAction {
                    action_type: "launch_frame".to_string(),
                    name: APP_NAME.to_string(),
                    url: app_url.clone(),
                    splash_image_url: app_path(app_url, &["splash.png"]),
                    splash_background_color: SPLASH_BACKGROUND_COLOR.to_string(),
                },
            },
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn app_path(app_url: &Url, segments: &[&str]) -> Url {
    let mut url = app_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    if segments.is_empty() {
        return url;
    }
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
