//! Per-guild emote registry.
//!
//! Tracks which personal collections and added emotes feed a guild's
//! matcher, and rebuilds it whenever any of them change. Set-level changes
//! always rebuild from scratch; appending one added emote is the only
//! incremental mutation. Readers hold an `Arc` to the current matcher, so
//! a rebuild in flight never disturbs them — the new matcher is swapped
//! in whole when it is ready.

use std::sync::Arc;

use emote_client::{EmoteClient, parse_seventv_emote_link};
use emote_db::Database;
use emote_db::added_emotes::AddedEmote;
use emote_db::guild_settings::GuildEmoteSettings;
use emote_matcher::providers::{BttvUserEmotes, FfzRoom, SevenTvEmote, SevenTvEmoteSet};
use emote_matcher::{AssetInfo, DEFAULT_SIZE, EmoteMatcher, EmoteSources};
use tokio::sync::RwLock;

use crate::{GlobalCollections, GlobalEmoteCache, RegistryError};

/// Which personal provider groups changed. 7TV is configured and
/// refreshed independently of BTTV/FFZ (both keyed by the broadcaster).
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonalRefresh {
    pub seventv: bool,
    pub bttv_ffz: bool,
}

/// Builds and owns the emote matcher for one guild.
pub struct GuildEmoteRegistry {
    guild_id: String,
    client: EmoteClient,
    db: Database,
    globals: Arc<GlobalEmoteCache>,
    state: RwLock<GuildState>,
}

struct GuildState {
    settings: GuildEmoteSettings,
    personal: PersonalCollections,
    added: Vec<AddedRecord>,
    matcher: Arc<EmoteMatcher>,
}

#[derive(Debug, Clone, Default)]
struct PersonalCollections {
    seventv: Option<SevenTvEmoteSet>,
    bttv: Option<BttvUserEmotes>,
    ffz: Option<FfzRoom>,
}

/// An added emote's persisted entry plus its fetched provider record.
#[derive(Debug, Clone)]
struct AddedRecord {
    entry: AddedEmote,
    record: Option<SevenTvEmote>,
}

impl AddedRecord {
    /// The provider record renamed to the stored alias, ready for
    /// ingestion.
    fn named_record(&self) -> Option<SevenTvEmote> {
        let mut record = self.record.clone()?;
        record.name = self.entry.alias.clone();
        Some(record)
    }
}

impl GuildEmoteRegistry {
    /// Load the guild's persisted state and build its initial matcher.
    pub async fn connect(
        guild_id: impl Into<String>,
        client: EmoteClient,
        db: Database,
        globals: Arc<GlobalEmoteCache>,
    ) -> Result<Self, RegistryError> {
        let guild_id = guild_id.into();
        let settings = db
            .get_guild_emote_settings(&guild_id)?
            .unwrap_or_else(|| GuildEmoteSettings {
                guild_id: guild_id.clone(),
                ..Default::default()
            });
        let added: Vec<AddedRecord> = db
            .get_added_emotes(&guild_id)?
            .into_iter()
            .map(|entry| AddedRecord {
                entry,
                record: None,
            })
            .collect();

        let global_collections = globals.snapshot().await?;
        let personal =
            fetch_personal(&client, &settings, PersonalCollections::default()).await;
        let added = fetch_added(&client, added).await;
        let matcher = Arc::new(build_matcher(global_collections, &personal, &added)?);

        tracing::info!(guild_id = %guild_id, "Built guild emote matcher");
        Ok(Self {
            guild_id,
            client,
            db,
            globals,
            state: RwLock::new(GuildState {
                settings,
                personal,
                added,
                matcher,
            }),
        })
    }

    /// The live matcher. The returned reference stays fully queryable
    /// while any rebuild is in flight.
    pub async fn matcher(&self) -> Arc<EmoteMatcher> {
        Arc::clone(&self.state.read().await.matcher)
    }

    /// Rebuild the matcher from scratch, re-fetching whatever collections
    /// are not cached, then swap it in.
    ///
    /// Concurrent rebuilds race benignly; the last one to finish wins the
    /// swap.
    pub async fn rebuild(&self) -> Result<Arc<EmoteMatcher>, RegistryError> {
        let global_collections = self.globals.snapshot().await?;
        let (settings, cached, added) = {
            let state = self.state.read().await;
            (
                state.settings.clone(),
                state.personal.clone(),
                state.added.clone(),
            )
        };

        let personal = fetch_personal(&self.client, &settings, cached).await;
        let added = fetch_added(&self.client, added).await;
        let matcher = Arc::new(build_matcher(global_collections, &personal, &added)?);

        let mut state = self.state.write().await;
        state.personal = personal;
        state.added = added;
        state.matcher = Arc::clone(&matcher);
        tracing::info!(guild_id = %self.guild_id, "Rebuilt guild emote matcher");
        Ok(matcher)
    }

    /// Drop the cached collections of the changed provider group(s) and
    /// rebuild.
    pub async fn refresh_personal(
        &self,
        changed: PersonalRefresh,
    ) -> Result<Arc<EmoteMatcher>, RegistryError> {
        {
            let mut state = self.state.write().await;
            if changed.seventv {
                state.personal.seventv = None;
            }
            if changed.bttv_ffz {
                state.personal.bttv = None;
                state.personal.ffz = None;
            }
        }
        self.rebuild().await
    }

    /// Persist new personal-set settings and rebuild whatever they
    /// changed.
    pub async fn update_settings(
        &self,
        settings: GuildEmoteSettings,
    ) -> Result<Arc<EmoteMatcher>, RegistryError> {
        let settings = GuildEmoteSettings {
            guild_id: self.guild_id.clone(),
            ..settings
        };
        self.db.upsert_guild_emote_settings(&settings)?;

        let changed = {
            let mut state = self.state.write().await;
            let changed = PersonalRefresh {
                seventv: state.settings.seventv_set_id != settings.seventv_set_id,
                bttv_ffz: state.settings.bttv_broadcaster_id != settings.bttv_broadcaster_id
                    || state.settings.ffz_room_id != settings.ffz_room_id,
            };
            state.settings = settings;
            changed
        };
        self.refresh_personal(changed).await
    }

    /// Register one emote from a 7TV link, indexed under `alias` when
    /// given.
    ///
    /// Rejected when the name is already taken by any indexed emote. This
    /// is the one mutation that does not rebuild: the emote is appended
    /// to a copy of the current matcher at the trailing priority and the
    /// copy is swapped in.
    pub async fn add_emote(
        &self,
        link: &str,
        alias: Option<&str>,
    ) -> Result<AssetInfo, RegistryError> {
        let emote_id = parse_seventv_emote_link(link)?;
        let record = self.client.get_seventv_emote(&emote_id).await?;
        let name = match alias.filter(|a| !a.is_empty()) {
            Some(a) => a.to_string(),
            None => record.name.clone(),
        };

        let mut state = self.state.write().await;
        if state.matcher.match_exact(&name) {
            return Err(RegistryError::DuplicateEmote(name));
        }

        let entry = AddedEmote {
            url: link.to_string(),
            alias: name.clone(),
        };
        self.db.insert_added_emote(&self.guild_id, &entry)?;

        let mut named = record.clone();
        named.name = name;
        let asset = named.to_asset(DEFAULT_SIZE);

        let mut next = (*state.matcher).clone();
        next.add_emote(asset.clone());
        state.matcher = Arc::new(next);
        state.added.push(AddedRecord {
            entry,
            record: Some(record),
        });

        tracing::info!(guild_id = %self.guild_id, name = %asset.name, "Added emote");
        Ok(asset)
    }

    /// Remove an added emote by alias or provider name.
    ///
    /// The index has no delete primitive, so removal splices the list and
    /// rebuilds the matcher from scratch.
    pub async fn remove_emote(&self, query: &str) -> Result<Arc<EmoteMatcher>, RegistryError> {
        let removed = {
            let mut state = self.state.write().await;
            match find_added(&state.added, query) {
                Some(position) => state.added.remove(position),
                None => return Err(RegistryError::UnknownEmote(query.to_string())),
            }
        };
        self.db.delete_added_emote(&self.guild_id, &removed.entry.alias)?;
        tracing::info!(guild_id = %self.guild_id, alias = %removed.entry.alias, "Removed emote");
        self.rebuild().await
    }
}

/// Locate an added emote by its alias or its provider name.
fn find_added(added: &[AddedRecord], query: &str) -> Option<usize> {
    added.iter().position(|r| {
        r.entry.alias == query || r.record.as_ref().is_some_and(|rec| rec.name == query)
    })
}

/// Fetch whichever configured personal collections are not cached yet.
///
/// A failed fetch skips that source for this build rather than failing
/// the whole matcher.
async fn fetch_personal(
    client: &EmoteClient,
    settings: &GuildEmoteSettings,
    cached: PersonalCollections,
) -> PersonalCollections {
    let mut personal = cached;

    if personal.seventv.is_none() {
        if let Some(set_id) = &settings.seventv_set_id {
            match client.get_seventv_emote_set(set_id).await {
                Ok(set) => personal.seventv = Some(set),
                Err(e) => tracing::warn!(error = %e, set_id, "Failed to fetch personal 7TV set"),
            }
        }
    }
    if personal.bttv.is_none() {
        if let Some(broadcaster_id) = &settings.bttv_broadcaster_id {
            match client.get_bttv_user_emotes(broadcaster_id).await {
                Ok(user) => personal.bttv = Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, broadcaster_id, "Failed to fetch BTTV user emotes");
                }
            }
        }
    }
    if personal.ffz.is_none() {
        if let Some(room_id) = &settings.ffz_room_id {
            match client.get_ffz_room(room_id).await {
                Ok(room) => personal.ffz = Some(room),
                Err(e) => tracing::warn!(error = %e, room_id, "Failed to fetch FFZ room"),
            }
        }
    }

    personal
}

/// Fetch provider records for added emotes that do not have one yet.
///
/// A failed parse or fetch produces an error-marked record, which
/// ingestion skips.
async fn fetch_added(client: &EmoteClient, added: Vec<AddedRecord>) -> Vec<AddedRecord> {
    let mut out = Vec::with_capacity(added.len());
    for mut item in added {
        if item.record.is_none() {
            let fetched = match parse_seventv_emote_link(&item.entry.url) {
                Ok(emote_id) => client.get_seventv_emote(&emote_id).await,
                Err(e) => Err(e),
            };
            item.record = Some(match fetched {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(error = %e, url = %item.entry.url, "Failed to fetch added emote");
                    SevenTvEmote {
                        error: Some(e.to_string()),
                        ..Default::default()
                    }
                }
            });
        }
        out.push(item);
    }
    out
}

fn build_matcher(
    globals: GlobalCollections,
    personal: &PersonalCollections,
    added: &[AddedRecord],
) -> Result<EmoteMatcher, emote_matcher::MatchError> {
    let sources = EmoteSources {
        global_seventv: Some(globals.seventv),
        global_bttv: Some(globals.bttv),
        global_ffz: Some(globals.ffz),
        global_twitch: globals.twitch,
        personal_seventv: personal.seventv.clone(),
        personal_bttv: personal.bttv.clone(),
        personal_ffz: personal.ffz.clone(),
        added_emotes: added.iter().filter_map(AddedRecord::named_record).collect(),
    };
    EmoteMatcher::new(&sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use emote_matcher::providers::{FfzGlobalSets, SevenTvActiveEmote, SevenTvEmoteData};

    fn record(url: &str, alias: &str, name: Option<&str>) -> AddedRecord {
        AddedRecord {
            entry: AddedEmote {
                url: url.into(),
                alias: alias.into(),
            },
            record: name.map(|name| SevenTvEmote {
                id: "e1".into(),
                name: name.into(),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn find_added_matches_alias_or_provider_name() {
        let added = vec![
            record("https://7tv.app/emotes/a", "aliasOnly", None),
            record("https://7tv.app/emotes/b", "myAlias", Some("RealName")),
        ];

        assert_eq!(find_added(&added, "aliasOnly"), Some(0));
        assert_eq!(find_added(&added, "myAlias"), Some(1));
        assert_eq!(find_added(&added, "RealName"), Some(1));
        assert_eq!(find_added(&added, "unknown"), None);
    }

    #[test]
    fn named_record_applies_alias() {
        let item = record("https://7tv.app/emotes/b", "myAlias", Some("RealName"));
        assert_eq!(item.named_record().unwrap().name, "myAlias");

        let unfetched = record("https://7tv.app/emotes/a", "aliasOnly", None);
        assert!(unfetched.named_record().is_none());
    }

    #[test]
    fn build_matcher_wires_collections_through() {
        let globals = GlobalCollections {
            seventv: SevenTvEmoteSet {
                id: "global".into(),
                name: "global".into(),
                emotes: vec![SevenTvActiveEmote {
                    id: "s1".into(),
                    name: "PogChamp".into(),
                    flags: 0,
                    timestamp: None,
                    data: SevenTvEmoteData {
                        id: "s1".into(),
                        name: "PogChamp".into(),
                        flags: 0,
                        animated: false,
                        host: Default::default(),
                        owner: None,
                    },
                }],
            },
            bttv: vec![],
            ffz: FfzGlobalSets::default(),
            twitch: None,
        };
        let added = vec![record(
            "https://7tv.app/emotes/b",
            "myAlias",
            Some("RealName"),
        )];

        let matcher =
            build_matcher(globals, &PersonalCollections::default(), &added).unwrap();
        assert_eq!(matcher.match_single("pogchamp").unwrap().name, "PogChamp");
        // The added record is indexed under its alias, not its provider
        // name.
        assert_eq!(matcher.match_single("myalias").unwrap().name, "myAlias");
        assert!(matcher.match_single("realname").is_none());
    }
}
