//! Jellyfin API response models

use serde::Deserialize;

/// Items envelope returned by `/Users/{id}/Items`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsResponse {
    #[serde(rename = "Items", default)]
    pub items: Vec<FavoriteItem>,
}

/// One favorited audio item.
#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteItem {
    #[serde(rename = "Name")]
    pub name: Option<String>,

    /// Library path on the server; requested via the `Fields` parameter
    /// and absent for items the server cannot locate on disk.
    #[serde(rename = "Path")]
    pub path: Option<String>,
}
