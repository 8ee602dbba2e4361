//! Unified data model for playlist conversion
//!
//! This module defines data structures that are independent of
//! both the collection XML dialect and the M3U text format.

mod playlist;
mod reserved;
mod track_ref;
mod tree;

pub use playlist::Playlist;
pub use reserved::ReservedNames;
pub use track_ref::{PathEncoding, TrackRef, PROPRIETARY_SEPARATOR};
pub use tree::{CollectionNode, CollectionTree};
