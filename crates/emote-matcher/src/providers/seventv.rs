//! 7TV v3 wire types.

use serde::{Deserialize, Serialize};

use crate::{AssetInfo, Platform};

/// Zero-width bit on an in-set (`ActiveEmote`) record.
const ACTIVE_FLAG_ZERO_WIDTH: u32 = 1 << 0;
/// Zero-width bit on a standalone emote record. Not the same bit as above;
/// the two record kinds use different flag sets.
const EMOTE_FLAG_ZERO_WIDTH: u32 = 1 << 8;

/// A 7TV emote set (`/v3/emote-sets/{id}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SevenTvEmoteSet {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub emotes: Vec<SevenTvActiveEmote>,
}

/// An emote as it appears inside a set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SevenTvActiveEmote {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub flags: u32,
    /// When the emote was added to the set, unix milliseconds.
    #[serde(default)]
    pub timestamp: Option<i64>,
    pub data: SevenTvEmoteData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SevenTvEmoteData {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub host: SevenTvHost,
    #[serde(default)]
    pub owner: Option<SevenTvOwner>,
}

/// A standalone emote (`/v3/emotes/{id}`), the shape runtime-added emotes
/// are fetched in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SevenTvEmote {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flags: u32,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub host: SevenTvHost,
    #[serde(default)]
    pub owner: Option<SevenTvOwner>,
    /// Provider error marker; a record carrying this is skipped at
    /// ingestion instead of being indexed.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SevenTvHost {
    /// Protocol-relative CDN base, e.g. `//cdn.7tv.app/emote/<id>`.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub files: Vec<SevenTvFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SevenTvFile {
    pub name: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SevenTvOwner {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub display_name: String,
}

impl SevenTvActiveEmote {
    /// Normalize an in-set record at the given size token.
    pub fn to_asset(&self, size: u32) -> AssetInfo {
        let file = pick_file(&self.data.host.files, size, self.data.animated);
        AssetInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            url: host_url(&self.data.host, file),
            zero_width: self.flags & ACTIVE_FLAG_ZERO_WIDTH != 0,
            animated: self.data.animated,
            width: file.map(|f| f.width),
            height: file.map(|f| f.height),
            platform: Platform::SevenInSet,
            timestamp: self.timestamp,
        }
    }
}

impl SevenTvEmote {
    /// Normalize a standalone (added) record at the given size token.
    pub fn to_asset(&self, size: u32) -> AssetInfo {
        let file = pick_file(&self.host.files, size, self.animated);
        AssetInfo {
            id: self.id.clone(),
            name: self.name.clone(),
            url: host_url(&self.host, file),
            zero_width: self.flags & EMOTE_FLAG_ZERO_WIDTH != 0,
            animated: self.animated,
            width: file.map(|f| f.width),
            height: file.map(|f| f.height),
            platform: Platform::SevenNotInSet,
            timestamp: None,
        }
    }
}

/// Select the file variant named `{size}x.gif` / `{size}x.png`.
///
/// A missing variant is not an error; the caller falls back to the bare
/// host URL with no dimensions.
fn pick_file(files: &[SevenTvFile], size: u32, animated: bool) -> Option<&SevenTvFile> {
    let wanted = format!("{size}x.{}", if animated { "gif" } else { "png" });
    files.iter().find(|f| f.name == wanted)
}

fn host_url(host: &SevenTvHost, file: Option<&SevenTvFile>) -> String {
    match file {
        Some(f) => format!("https:{}/{}", host.url, f.name),
        None => format!("https:{}", host.url),
    }
}
