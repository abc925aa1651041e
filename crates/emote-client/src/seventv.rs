//! 7TV API endpoints.

use emote_matcher::providers::{SevenTvEmote, SevenTvEmoteSet};
use url::Url;

use crate::{EmoteClient, ProviderError};

const SEVENTV_API: &str = "https://7tv.io/v3";

impl EmoteClient {
    /// Fetch a 7TV emote set by id.
    pub async fn get_seventv_emote_set(
        &self,
        set_id: &str,
    ) -> Result<SevenTvEmoteSet, ProviderError> {
        let url = format!("{SEVENTV_API}/emote-sets/{set_id}");
        let body = self.fetch(&url).await?;
        let set: SevenTvEmoteSet = serde_json::from_str(&body)?;
        tracing::debug!(count = set.emotes.len(), set_id, "Fetched 7TV emote set");
        Ok(set)
    }

    /// Fetch the platform-wide global set.
    pub async fn get_seventv_global_set(&self) -> Result<SevenTvEmoteSet, ProviderError> {
        self.get_seventv_emote_set("global").await
    }

    /// Fetch a single emote record, the shape runtime-added emotes use.
    pub async fn get_seventv_emote(&self, emote_id: &str) -> Result<SevenTvEmote, ProviderError> {
        let url = format!("{SEVENTV_API}/emotes/{emote_id}");
        let body = self.fetch(&url).await?;
        let emote: SevenTvEmote = serde_json::from_str(&body)?;
        tracing::debug!(emote_id, name = %emote.name, "Fetched 7TV emote");
        Ok(emote)
    }
}

/// Extract the emote id from a user-pasted 7TV link.
///
/// Accepts `https://7tv.app/emotes/<id>` and subdomain variants such as
/// `old.7tv.app`.
pub fn parse_seventv_emote_link(link: &str) -> Result<String, ProviderError> {
    let parsed = Url::parse(link)?;
    let host_ok = parsed
        .host_str()
        .is_some_and(|host| host == "7tv.app" || host.ends_with(".7tv.app"));

    if host_ok {
        if let Some(mut segments) = parsed.path_segments() {
            if segments.next() == Some("emotes") {
                if let Some(id) = segments.next().filter(|id| !id.is_empty()) {
                    return Ok(id.to_string());
                }
            }
        }
    }

    Err(ProviderError::InvalidEmoteLink(link.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_emote_link() {
        let id = parse_seventv_emote_link("https://7tv.app/emotes/01FDMJPSF8000CCAEMKJ3S4N9K");
        assert_eq!(id.unwrap(), "01FDMJPSF8000CCAEMKJ3S4N9K");
    }

    #[test]
    fn parses_subdomain_and_trailing_path() {
        let id = parse_seventv_emote_link("https://old.7tv.app/emotes/abc123/activity");
        assert_eq!(id.unwrap(), "abc123");
    }

    #[test]
    fn rejects_foreign_or_malformed_links() {
        assert!(parse_seventv_emote_link("https://example.com/emotes/abc").is_err());
        assert!(parse_seventv_emote_link("https://7tv.app/users/abc").is_err());
        assert!(parse_seventv_emote_link("https://7tv.app/emotes/").is_err());
        assert!(parse_seventv_emote_link("not a url").is_err());
        // A lookalike host must not pass the suffix check.
        assert!(parse_seventv_emote_link("https://evil7tv.app/emotes/abc").is_err());
    }
}
