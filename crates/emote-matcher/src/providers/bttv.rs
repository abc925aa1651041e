//! BTTV wire types.

use serde::{Deserialize, Serialize};

use crate::{AssetInfo, Platform};

const BTTV_CDN: &str = "https://cdn.betterttv.net/emote";

/// A BTTV emote as served by the cached API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BttvEmote {
    pub id: String,
    /// BTTV calls the emote name its `code`.
    pub code: String,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub image_type: String,
}

/// `/3/cached/users/twitch/{id}` response: the broadcaster's own uploads
/// plus emotes shared into the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BttvUserEmotes {
    #[serde(default)]
    pub channel_emotes: Vec<BttvEmote>,
    #[serde(default)]
    pub shared_emotes: Vec<BttvEmote>,
}

impl BttvEmote {
    /// Normalize at the given size token. BTTV reports no dimensions and
    /// has no zero-width concept.
    pub fn to_asset(&self, size: u32) -> AssetInfo {
        let image_type = if self.image_type.is_empty() {
            "png"
        } else {
            &self.image_type
        };
        AssetInfo {
            id: self.id.clone(),
            name: self.code.clone(),
            url: format!("{BTTV_CDN}/{}/{size}x.{image_type}", self.id),
            zero_width: false,
            animated: self.animated,
            width: None,
            height: None,
            platform: Platform::Bttv,
            timestamp: None,
        }
    }
}
