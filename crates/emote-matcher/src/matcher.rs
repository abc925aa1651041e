//! Guild-scoped emote matcher.
//!
//! Owns one suffix index per guild and ingests every provider collection
//! in a fixed precedence order, so collisions across sources always
//! resolve the same way.

use std::sync::Arc;

use crate::index::SuffixIndex;
use crate::providers::{
    BttvEmote, BttvUserEmotes, FfzGlobalSets, FfzRoom, SevenTvEmote, SevenTvEmoteSet, TwitchEmote,
};
use crate::{AssetInfo, DEFAULT_SIZE, MatchError, Platform};

/// Optional filters and ordering for [`EmoteMatcher::match_array`].
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    pub platform: Option<Platform>,
    pub animated: Option<bool>,
    pub zero_width: Option<bool>,
    /// Truncate the result list to this many entries.
    pub max: Option<usize>,
    /// Newest first; takes precedence over the name sort.
    pub sort_by_date_added: bool,
    pub sort_by_name: bool,
}

/// Provider collections feeding one matcher.
///
/// The three global web collections are required; everything else is
/// optional and skipped when absent. Ingestion order (and therefore
/// priority) is fixed regardless of how this struct is filled.
#[derive(Debug, Clone, Default)]
pub struct EmoteSources {
    pub global_seventv: Option<SevenTvEmoteSet>,
    pub global_bttv: Option<Vec<BttvEmote>>,
    pub global_ffz: Option<FfzGlobalSets>,
    pub global_twitch: Option<Vec<TwitchEmote>>,
    pub personal_seventv: Option<SevenTvEmoteSet>,
    pub personal_bttv: Option<BttvUserEmotes>,
    pub personal_ffz: Option<FfzRoom>,
    /// Runtime-added 7TV emotes, ingested last (lowest priority).
    pub added_emotes: Vec<SevenTvEmote>,
}

/// One ingestion pass; each present pass consumes one priority slot.
enum Pass<'a> {
    SevenSet(&'a SevenTvEmoteSet),
    Bttv(&'a [BttvEmote]),
    FfzGlobal(&'a FfzGlobalSets),
    FfzRoom(&'a FfzRoom),
    Twitch(&'a [TwitchEmote]),
    Added(&'a [SevenTvEmote]),
}

/// Suffix-index matcher over every emote available to one guild.
#[derive(Debug, Clone)]
pub struct EmoteMatcher {
    index: SuffixIndex,
    /// Priority for emotes added after construction; strictly below every
    /// ingested collection.
    trailing_priority: u32,
}

impl EmoteMatcher {
    /// Build a matcher from provider collections.
    ///
    /// Collections are ingested in precedence order: global 7TV, global
    /// BTTV, global FFZ, global Twitch, personal 7TV, personal BTTV
    /// channel, personal BTTV shared, personal FFZ, then added emotes.
    /// The first pass gets the highest priority.
    ///
    /// A matcher without the global web collections is never a legitimate
    /// state, so a missing one fails construction.
    pub fn new(sources: &EmoteSources) -> Result<Self, MatchError> {
        let seventv = sources
            .global_seventv
            .as_ref()
            .ok_or(MatchError::MissingGlobalCollection(Platform::SevenInSet))?;
        let bttv = sources
            .global_bttv
            .as_ref()
            .ok_or(MatchError::MissingGlobalCollection(Platform::Bttv))?;
        let ffz = sources
            .global_ffz
            .as_ref()
            .ok_or(MatchError::MissingGlobalCollection(Platform::Ffz))?;

        let mut passes = vec![
            Pass::SevenSet(seventv),
            Pass::Bttv(bttv),
            Pass::FfzGlobal(ffz),
        ];
        if let Some(twitch) = &sources.global_twitch {
            passes.push(Pass::Twitch(twitch));
        }
        if let Some(set) = &sources.personal_seventv {
            passes.push(Pass::SevenSet(set));
        }
        if let Some(user) = &sources.personal_bttv {
            passes.push(Pass::Bttv(&user.channel_emotes));
            passes.push(Pass::Bttv(&user.shared_emotes));
        }
        if let Some(room) = &sources.personal_ffz {
            passes.push(Pass::FfzRoom(room));
        }
        if !sources.added_emotes.is_empty() {
            passes.push(Pass::Added(&sources.added_emotes));
        }

        let mut matcher = Self {
            index: SuffixIndex::new(),
            trailing_priority: 0,
        };
        let collections = passes.len();
        let mut priority = collections as u32;
        let mut total = 0usize;
        for pass in passes {
            total += matcher.ingest(pass, priority);
            priority -= 1;
        }
        matcher.trailing_priority = priority;

        tracing::debug!(collections, emotes = total, "Built emote matcher");
        Ok(matcher)
    }

    fn ingest(&mut self, pass: Pass<'_>, priority: u32) -> usize {
        match pass {
            Pass::SevenSet(set) => {
                let mut count = 0;
                for emote in &set.emotes {
                    self.insert(emote.to_asset(DEFAULT_SIZE), priority);
                    count += 1;
                }
                count
            }
            Pass::Bttv(emotes) => {
                for emote in emotes {
                    self.insert(emote.to_asset(DEFAULT_SIZE), priority);
                }
                emotes.len()
            }
            Pass::FfzGlobal(sets) => {
                let mut count = 0;
                for emote in sets.emoticons() {
                    self.insert(emote.to_asset(DEFAULT_SIZE), priority);
                    count += 1;
                }
                count
            }
            Pass::FfzRoom(room) => {
                let mut count = 0;
                for emote in room.emoticons() {
                    self.insert(emote.to_asset(DEFAULT_SIZE), priority);
                    count += 1;
                }
                count
            }
            Pass::Twitch(emotes) => {
                for emote in emotes {
                    self.insert(emote.to_asset(DEFAULT_SIZE), priority);
                }
                emotes.len()
            }
            Pass::Added(records) => {
                let mut count = 0;
                for record in records {
                    if record.error.is_some() || record.name.is_empty() {
                        tracing::warn!(id = %record.id, "Skipping malformed added emote");
                        continue;
                    }
                    // A set or global emote with the same exact name wins.
                    if self.index.query_exact(&record.name) {
                        continue;
                    }
                    self.insert(record.to_asset(DEFAULT_SIZE), priority);
                    count += 1;
                }
                count
            }
        }
    }

    fn insert(&mut self, asset: AssetInfo, priority: u32) {
        self.index.insert_all_suffixes(&Arc::new(asset), priority);
    }

    /// Best single match for a query.
    pub fn match_single(&self, query: &str) -> Option<Arc<AssetInfo>> {
        self.index.query_single(query)
    }

    /// Every match containing the query, filtered and ordered per
    /// `options`.
    pub fn match_array(&self, query: &str, options: &MatchOptions) -> Option<Vec<Arc<AssetInfo>>> {
        self.index.query_array(query, options)
    }

    /// Whether `query` resolves unambiguously to the emote named
    /// `full_name`.
    pub fn match_unique(&self, query: &str, full_name: &str) -> bool {
        self.index.query_unique(query, full_name)
    }

    /// Whether an emote with exactly this name (case-sensitive) is
    /// indexed.
    pub fn match_exact(&self, name: &str) -> bool {
        self.index.query_exact(name)
    }

    /// Resolve several tokens at once, one result per token, order
    /// preserved.
    ///
    /// Single-character tokens never resolve; they are too ambiguous to
    /// be useful.
    pub fn match_multi(&self, tokens: &[&str]) -> Vec<Option<Arc<AssetInfo>>> {
        tokens
            .iter()
            .map(|token| {
                if token.chars().count() == 1 {
                    None
                } else {
                    self.match_single(token)
                }
            })
            .collect()
    }

    /// Insert one emote at the trailing (lowest) priority without
    /// rebuilding.
    pub fn add_emote(&mut self, asset: AssetInfo) {
        self.index
            .insert_all_suffixes(&Arc::new(asset), self.trailing_priority);
    }

    /// The shortest substrings of `name` that uniquely identify it,
    /// in order of appearance; `None` when even the full name is
    /// ambiguous or unindexed.
    pub fn shortest_unique_substrings(&self, name: &str) -> Option<Vec<String>> {
        let chars: Vec<char> = name.chars().collect();
        for len in 1..=chars.len() {
            let mut found: Vec<String> = Vec::new();
            for start in 0..=(chars.len() - len) {
                let candidate: String = chars[start..start + len].iter().collect();
                if !found.contains(&candidate) && self.match_unique(&candidate, name) {
                    found.push(candidate);
                }
            }
            if !found.is_empty() {
                return Some(found);
            }
        }
        None
    }
}
