//! Twitch Helix wire types.

use serde::{Deserialize, Serialize};

use crate::{AssetInfo, Platform};

const TWITCH_CDN: &str = "https://static-cdn.jtvnw.net/emoticons/v2";

/// A Twitch chat emote from the Helix `chat/emotes` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitchEmote {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub format: Vec<String>,
    #[serde(default)]
    pub scale: Vec<String>,
    #[serde(default)]
    pub theme_mode: Vec<String>,
}

impl TwitchEmote {
    /// Normalize at the given size token via the Helix CDN URL template.
    /// Prefers the animated variant and the dark theme when both are
    /// offered.
    pub fn to_asset(&self, size: u32) -> AssetInfo {
        let format = if self.format.len() > 1 {
            "animated"
        } else {
            self.format.first().map(String::as_str).unwrap_or("static")
        };
        let theme = if self.theme_mode.len() > 1 {
            "dark"
        } else {
            self.theme_mode.first().map(String::as_str).unwrap_or("dark")
        };
        AssetInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            url: format!("{TWITCH_CDN}/{}/{format}/{theme}/{size}.0", self.id),
            zero_width: false,
            animated: format == "animated",
            width: None,
            height: None,
            platform: Platform::Twitch,
            timestamp: None,
        }
    }
}
