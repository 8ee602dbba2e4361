//! Traktor collection handling
//!
//! Parses and rewrites collection.nml, and locates the collection of the
//! newest installed Traktor version.

mod install;
pub mod reader;
mod writer;

pub use install::{default_collection_path, find_latest_install};
pub use reader::{parse_collection, parse_collection_str};
pub use writer::{append_to_collection, insert_playlist};

use crate::error::ConvertError;
use crate::model::{Playlist, ReservedNames};
use std::path::Path;

/// Read a collection file and flatten it into playlists in document order,
/// applying the reserved-name rules.
pub fn read_playlists(
    path: &Path,
    reserved: &ReservedNames,
) -> Result<Vec<Playlist>, ConvertError> {
    let tree = parse_collection(path)?;
    let playlists = tree.flatten(reserved);
    log::info!("Collection yields {} non-empty playlists", playlists.len());
    Ok(playlists)
}
