//! FrankerFaceZ wire types.
//!
//! FFZ delivers emotes grouped into sets, keyed by a numeric set id both in
//! the global response and per room.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AssetInfo, Platform};

/// `/v1/set/global` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FfzGlobalSets {
    /// Set ids that apply to every channel.
    #[serde(default)]
    pub default_sets: Vec<u64>,
    #[serde(default)]
    pub sets: BTreeMap<String, FfzSet>,
}

/// `/v1/room/id/{twitch_id}` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FfzRoom {
    #[serde(default)]
    pub room: Option<FfzRoomInfo>,
    #[serde(default)]
    pub sets: BTreeMap<String, FfzSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FfzRoomInfo {
    /// The room's own emote-set id.
    #[serde(rename = "set")]
    pub set_id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FfzSet {
    pub id: u64,
    #[serde(default)]
    pub emoticons: Vec<FfzEmote>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FfzEmote {
    pub id: u64,
    pub name: String,
    /// Image URL per size token ("1", "2", "4").
    #[serde(default)]
    pub urls: BTreeMap<String, String>,
    /// Animated URL map; present only for animated emotes.
    #[serde(default)]
    pub animated: Option<BTreeMap<String, String>>,
}

impl FfzGlobalSets {
    /// Emoticons of every default set, in declared set order.
    pub fn emoticons(&self) -> impl Iterator<Item = &FfzEmote> {
        self.default_sets
            .iter()
            .filter_map(|id| self.sets.get(&id.to_string()))
            .flat_map(|set| set.emoticons.iter())
    }
}

impl FfzRoom {
    /// Emoticons of the room's own set; falls back to every delivered set
    /// when the room header is missing.
    pub fn emoticons(&self) -> Box<dyn Iterator<Item = &FfzEmote> + '_> {
        if let Some(room) = &self.room {
            if let Some(set) = self.sets.get(&room.set_id.to_string()) {
                return Box::new(set.emoticons.iter());
            }
        }
        Box::new(self.sets.values().flat_map(|set| set.emoticons.iter()))
    }
}

impl FfzEmote {
    /// Normalize at the given size token, falling back to the smallest
    /// size FFZ did provide.
    pub fn to_asset(&self, size: u32) -> AssetInfo {
        let url = self
            .urls
            .get(&size.to_string())
            .or_else(|| self.urls.values().next())
            .cloned()
            .unwrap_or_default();
        AssetInfo {
            id: self.id.to_string(),
            name: self.name.clone(),
            url,
            zero_width: false,
            animated: self.animated.is_some(),
            width: None,
            height: None,
            platform: Platform::Ffz,
            timestamp: None,
        }
    }
}
