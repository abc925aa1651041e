//! Shared global provider collections.

use emote_client::{EmoteClient, ProviderError, TwitchAuth};
use emote_matcher::providers::{BttvEmote, FfzGlobalSets, SevenTvEmoteSet, TwitchEmote};
use tokio::sync::RwLock;

/// Snapshot of the platform-wide collections shared by every guild.
#[derive(Debug, Clone)]
pub struct GlobalCollections {
    pub seventv: SevenTvEmoteSet,
    pub bttv: Vec<BttvEmote>,
    pub ffz: FfzGlobalSets,
    /// Absent when no Twitch credentials were supplied or the fetch
    /// failed; the matcher treats it as an optional collection either way.
    pub twitch: Option<Vec<TwitchEmote>>,
}

/// Process-wide cache of the global emote collections.
///
/// Constructed once and injected into every guild registry; callers
/// decide when to [`refresh`](Self::refresh). Concurrent refreshes race
/// benignly, the last snapshot to land wins.
pub struct GlobalEmoteCache {
    client: EmoteClient,
    twitch_auth: Option<TwitchAuth>,
    collections: RwLock<Option<GlobalCollections>>,
}

impl GlobalEmoteCache {
    pub fn new(client: EmoteClient, twitch_auth: Option<TwitchAuth>) -> Self {
        Self {
            client,
            twitch_auth,
            collections: RwLock::new(None),
        }
    }

    /// Re-fetch every global collection, replacing the previous snapshot.
    ///
    /// The three web collections are required downstream, so any of their
    /// fetches failing fails the refresh; Twitch is optional and only
    /// warns.
    pub async fn refresh(&self) -> Result<GlobalCollections, ProviderError> {
        let seventv = self.client.get_seventv_global_set().await?;
        let bttv = self.client.get_bttv_global_emotes().await?;
        let ffz = self.client.get_ffz_global_sets().await?;
        let twitch = match &self.twitch_auth {
            Some(auth) => match self.client.get_twitch_global_emotes(auth).await {
                Ok(emotes) => Some(emotes),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to fetch Twitch global emotes");
                    None
                }
            },
            None => None,
        };

        let snapshot = GlobalCollections {
            seventv,
            bttv,
            ffz,
            twitch,
        };
        *self.collections.write().await = Some(snapshot.clone());
        tracing::info!("Global emote collections refreshed");
        Ok(snapshot)
    }

    /// Clone out the current snapshot, fetching it first if none exists
    /// yet.
    pub async fn snapshot(&self) -> Result<GlobalCollections, ProviderError> {
        if let Some(collections) = self.collections.read().await.as_ref() {
            return Ok(collections.clone());
        }
        self.refresh().await
    }
}
