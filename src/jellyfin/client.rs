//! Jellyfin API HTTP client

use super::models::{FavoriteItem, ItemsResponse};
use anyhow::{Context, Result};
use reqwest::blocking::Client;

/// Blocking HTTP client for the Jellyfin REST API.
///
/// Conversion runs are fully synchronous, so requests block like every
/// other operation in the pipeline.
pub struct JellyfinClient {
    base_url: String,
    api_key: String,
    user_id: String,
    http_client: Client,
}

impl JellyfinClient {
    /// Create a new Jellyfin client
    pub fn new(base_url: &str, api_key: &str, user_id: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let http_client = Client::builder()
            .user_agent(concat!("traktor-bridge/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            api_key: api_key.to_string(),
            user_id: user_id.to_string(),
            http_client,
        })
    }

    /// Fetch the user's favorite audio items, including library paths.
    pub fn favorite_tracks(&self) -> Result<Vec<FavoriteItem>> {
        let url = format!("{}/Users/{}/Items", self.base_url, self.user_id);
        log::debug!("Fetching favorites from {}", url);

        let response: ItemsResponse = self
            .http_client
            .get(&url)
            .header("X-Emby-Token", &self.api_key)
            .query(&[
                ("IsFavorite", "true"),
                ("Recursive", "true"),
                ("IncludeItemTypes", "Audio"),
                ("Fields", "Path"),
            ])
            .send()
            .context("Failed to connect to Jellyfin server")?
            .error_for_status()
            .context("Jellyfin request failed")?
            .json()
            .context("Failed to parse Jellyfin response")?;

        log::debug!("Found {} favorite items", response.items.len());
        Ok(response.items)
    }
}
