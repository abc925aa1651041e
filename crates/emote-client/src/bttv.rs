//! BTTV cached API endpoints.

use emote_matcher::providers::{BttvEmote, BttvUserEmotes};

use crate::{EmoteClient, ProviderError};

const BTTV_API: &str = "https://api.betterttv.net/3/cached";

impl EmoteClient {
    /// Fetch the BTTV global emote list.
    pub async fn get_bttv_global_emotes(&self) -> Result<Vec<BttvEmote>, ProviderError> {
        let url = format!("{BTTV_API}/emotes/global");
        let body = self.fetch(&url).await?;
        let emotes: Vec<BttvEmote> = serde_json::from_str(&body)?;
        tracing::debug!(count = emotes.len(), "Fetched BTTV global emotes");
        Ok(emotes)
    }

    /// Fetch a broadcaster's channel and shared emotes.
    pub async fn get_bttv_user_emotes(
        &self,
        twitch_id: &str,
    ) -> Result<BttvUserEmotes, ProviderError> {
        let url = format!("{BTTV_API}/users/twitch/{twitch_id}");
        let body = self.fetch(&url).await?;
        let user: BttvUserEmotes = serde_json::from_str(&body)?;
        tracing::debug!(
            channel = user.channel_emotes.len(),
            shared = user.shared_emotes.len(),
            twitch_id,
            "Fetched BTTV user emotes"
        );
        Ok(user)
    }
}
