//! Jellyfin favorites fetching
//!
//! Turns a Jellyfin user's favorite audio items into playlist paths,
//! adjusted for where the library is mounted locally.

mod client;
mod models;

pub use client::JellyfinClient;
pub use models::{FavoriteItem, ItemsResponse};

/// Build playlist paths from favorite items.
///
/// The server-side prefix is stripped once (first occurrence only) before
/// the local prefix is prepended. Items without a path are skipped with a
/// log line.
pub fn playlist_paths(
    items: &[FavoriteItem],
    remove_prefix: Option<&str>,
    add_prefix: &str,
) -> Vec<String> {
    let mut paths = Vec::new();
    for item in items {
        let Some(path) = item.path.as_deref() else {
            log::info!(
                "Skipping item without a path: {}",
                item.name.as_deref().unwrap_or("Unknown Name")
            );
            continue;
        };

        let adjusted = match remove_prefix {
            Some(prefix) if !prefix.is_empty() => path.replacen(prefix, "", 1),
            _ => path.to_string(),
        };

        paths.push(format!("{}{}", add_prefix, adjusted));
    }
    paths
}
