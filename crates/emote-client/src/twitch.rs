//! Twitch Helix chat-emote endpoints.

use emote_matcher::providers::TwitchEmote;
use serde::Deserialize;

use crate::{EmoteClient, ProviderError, TwitchAuth};

const HELIX_BASE: &str = "https://api.twitch.tv/helix";

/// Helix response wrapper for emotes.
#[derive(Debug, Deserialize)]
struct EmoteResponse {
    data: Vec<TwitchEmote>,
}

impl EmoteClient {
    /// Fetch global emotes from Twitch.
    pub async fn get_twitch_global_emotes(
        &self,
        auth: &TwitchAuth,
    ) -> Result<Vec<TwitchEmote>, ProviderError> {
        let url = format!("{HELIX_BASE}/chat/emotes/global");
        let body = self.fetch_helix(&url, auth).await?;
        let resp: EmoteResponse = serde_json::from_str(&body)?;
        tracing::debug!(count = resp.data.len(), "Fetched Twitch global emotes");
        Ok(resp.data)
    }

    /// Fetch channel-specific emotes from Twitch.
    pub async fn get_twitch_channel_emotes(
        &self,
        auth: &TwitchAuth,
        broadcaster_id: &str,
    ) -> Result<Vec<TwitchEmote>, ProviderError> {
        let url = format!("{HELIX_BASE}/chat/emotes?broadcaster_id={broadcaster_id}");
        let body = self.fetch_helix(&url, auth).await?;
        let resp: EmoteResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            count = resp.data.len(),
            broadcaster_id,
            "Fetched Twitch channel emotes"
        );
        Ok(resp.data)
    }
}
