//! Traktor Bridge - collection.nml to M3U playlist converter
//!
//! This library converts playlists between Traktor's collection.nml
//! format and plain M3U files, in both directions, translating track
//! paths between the collection's colon-marked encoding and OS paths.

pub mod codec;
pub mod convert;
pub mod error;
pub mod jellyfin;
pub mod m3u;
pub mod model;
pub mod stats;
pub mod traktor;

pub use convert::{ConvertOptions, ConvertPipeline};
pub use error::ConvertError;
