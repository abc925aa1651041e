//! HTTP clients for third-party emote providers.
//!
//! Fetches emote collections from 7TV, BTTV, FFZ and Twitch Helix and
//! deserializes them into the wire types consumed by `emote-matcher`.
//! Nothing here retries or schedules; callers decide when to fetch.

mod bttv;
mod ffz;
mod seventv;
mod twitch;

pub use seventv::parse_seventv_emote_link;

use serde::{Deserialize, Serialize};

/// Credentials for Twitch Helix requests.
///
/// The caller is responsible for obtaining and refreshing the token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitchAuth {
    pub client_id: String,
    pub access_token: String,
}

/// Unified error type for the emote-client crate.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("provider API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("not a 7TV emote link: {0}")]
    InvalidEmoteLink(String),
}

/// Shared HTTP client for every provider endpoint.
#[derive(Debug, Clone, Default)]
pub struct EmoteClient {
    http: reqwest::Client,
}

impl EmoteClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Send a plain GET request and return the body.
    pub(crate) async fn fetch(&self, url: &str) -> Result<String, ProviderError> {
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }

    /// Send an authenticated GET request to the Twitch API.
    pub(crate) async fn fetch_helix(
        &self,
        url: &str,
        auth: &TwitchAuth,
    ) -> Result<String, ProviderError> {
        let resp = self
            .http
            .get(url)
            .header("Authorization", format!("Bearer {}", auth.access_token))
            .header("Client-Id", &auth.client_id)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }
}
