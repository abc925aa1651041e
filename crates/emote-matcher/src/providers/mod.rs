//! Provider wire formats and their normalization into [`AssetInfo`].
//!
//! Each submodule owns one provider's deserialized API shape plus a
//! `to_asset` conversion. Conversions are pure; anything the provider
//! fails to report becomes an absent field, never an error.
//!
//! [`AssetInfo`]: crate::AssetInfo

mod bttv;
mod ffz;
mod seventv;
mod twitch;

pub use bttv::{BttvEmote, BttvUserEmotes};
pub use ffz::{FfzEmote, FfzGlobalSets, FfzRoom, FfzRoomInfo, FfzSet};
pub use seventv::{
    SevenTvActiveEmote, SevenTvEmote, SevenTvEmoteData, SevenTvEmoteSet, SevenTvFile, SevenTvHost,
    SevenTvOwner,
};
pub use twitch::TwitchEmote;
