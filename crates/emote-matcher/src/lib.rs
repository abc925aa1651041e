//! Guild emote aggregation and matching core.
//!
//! Normalizes emote records from 7TV, BTTV, FFZ and Twitch into one
//! canonical shape and indexes every suffix of every emote name, so a
//! short, partial or miscased query still resolves to a single
//! deterministic emote.

pub mod providers;

mod index;
mod matcher;

pub use matcher::{EmoteMatcher, EmoteSources, MatchOptions};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default image size token requested from providers (`2x`).
pub const DEFAULT_SIZE: u32 = 2;

/// Which provider collection an asset came from.
///
/// 7TV emotes appear in two shapes: as members of an emote set, and as
/// standalone records fetched by id for runtime-added emotes. The two use
/// different flag semantics, so they stay distinct here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    SevenInSet,
    SevenNotInSet,
    Bttv,
    Ffz,
    Twitch,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::SevenInSet | Platform::SevenNotInSet => "7TV",
            Platform::Bttv => "BTTV",
            Platform::Ffz => "FFZ",
            Platform::Twitch => "Twitch",
        };
        f.write_str(name)
    }
}

/// A canonical emote record normalized from any provider.
///
/// `name` is immutable once indexed; renaming an emote means removing and
/// re-inserting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetInfo {
    pub id: String,
    pub name: String,
    pub url: String,
    /// Overlay decoration rather than a standalone emote.
    pub zero_width: bool,
    pub animated: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub platform: Platform,
    /// Provider-reported add time in unix milliseconds, when available.
    pub timestamp: Option<i64>,
}

/// Unified error type for the emote-matcher crate.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("missing required global {0} collection")]
    MissingGlobalCollection(Platform),
}
