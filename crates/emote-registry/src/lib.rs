//! Guild emote registry.
//!
//! Builds and refreshes the [`EmoteMatcher`] for each guild: owns the
//! shared global provider collections, the per-guild personal collections
//! and added emotes, and the swap of a freshly built matcher into place.
//!
//! [`EmoteMatcher`]: emote_matcher::EmoteMatcher

mod global;
mod guild;

pub use global::{GlobalCollections, GlobalEmoteCache};
pub use guild::{GuildEmoteRegistry, PersonalRefresh};

/// Unified error type for the emote-registry crate.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("matcher error: {0}")]
    Match(#[from] emote_matcher::MatchError),

    #[error("provider error: {0}")]
    Provider(#[from] emote_client::ProviderError),

    #[error("database error: {0}")]
    Db(#[from] emote_db::DbError),

    #[error("an emote named {0:?} already exists")]
    DuplicateEmote(String),

    #[error("no added emote matches {0:?}")]
    UnknownEmote(String),
}
