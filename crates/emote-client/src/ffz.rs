//! FrankerFaceZ API endpoints.

use emote_matcher::providers::{FfzGlobalSets, FfzRoom};

use crate::{EmoteClient, ProviderError};

const FFZ_API: &str = "https://api.frankerfacez.com/v1";

impl EmoteClient {
    /// Fetch the FFZ global emote sets.
    pub async fn get_ffz_global_sets(&self) -> Result<FfzGlobalSets, ProviderError> {
        let url = format!("{FFZ_API}/set/global");
        let body = self.fetch(&url).await?;
        let sets: FfzGlobalSets = serde_json::from_str(&body)?;
        tracing::debug!(
            sets = sets.sets.len(),
            default_sets = sets.default_sets.len(),
            "Fetched FFZ global sets"
        );
        Ok(sets)
    }

    /// Fetch a broadcaster's FFZ room by Twitch id.
    pub async fn get_ffz_room(&self, twitch_id: &str) -> Result<FfzRoom, ProviderError> {
        let url = format!("{FFZ_API}/room/id/{twitch_id}");
        let body = self.fetch(&url).await?;
        let room: FfzRoom = serde_json::from_str(&body)?;
        tracing::debug!(sets = room.sets.len(), twitch_id, "Fetched FFZ room");
        Ok(room)
    }
}
