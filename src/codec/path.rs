//! Path codec between the collection's colon-marked encoding and OS paths
//!
//! Pure string transforms, no I/O. Decoding applies the output-only
//! transforms (re-rooting, root stripping, prefixing) configured for a run;
//! encoding is purely lexical and never tries to undo them.

use crate::error::ConvertError;
use crate::model::{PathEncoding, TrackRef, PROPRIETARY_SEPARATOR};

/// Home-marker segment used by Traktor's volume-prefixed paths, e.g.
/// `Macintosh HD/:Users/:name/:Music`.
const HOME_SEGMENT: &str = "Users";

/// Path codec configured for one conversion run.
#[derive(Debug, Clone)]
pub struct PathCodec {
    /// Separator written into decoded paths
    separator: String,

    /// Substring removed from every decoded path, all occurrences
    root_strip: Option<String>,

    /// String prepended to every decoded path after stripping
    prefix: String,

    /// Re-root decoded paths at the home-marker segment, discarding any
    /// volume or mount prefix. Only meaningful on single-rooted platforms.
    platform_normalization: bool,
}

/// A decoded path plus whether lossy transforms were applied to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPath {
    path: String,
    lossy: bool,
}

impl DecodedPath {
    pub fn as_str(&self) -> &str {
        &self.path
    }

    pub fn into_string(self) -> String {
        self.path
    }

    /// True when stripping, re-rooting or prefixing changed the path, i.e.
    /// information needed to reconstruct the original key is gone.
    pub fn is_lossy(&self) -> bool {
        self.lossy
    }
}

impl Default for PathCodec {
    fn default() -> Self {
        Self {
            separator: std::path::MAIN_SEPARATOR.to_string(),
            root_strip: None,
            prefix: String::new(),
            platform_normalization: false,
        }
    }
}

impl PathCodec {
    pub fn new(
        separator: Option<String>,
        root_strip: Option<String>,
        prefix: String,
        platform_normalization: bool,
    ) -> Self {
        Self {
            separator: separator.unwrap_or_else(|| std::path::MAIN_SEPARATOR.to_string()),
            root_strip: root_strip.filter(|s| !s.is_empty()),
            prefix,
            platform_normalization,
        }
    }

    /// Decode a proprietary track key into an output path string.
    ///
    /// Decoding an already-Native reference is a guarded no-op: the raw
    /// path is returned untouched, without any of the output transforms.
    pub fn decode(&self, track: &TrackRef) -> DecodedPath {
        if track.encoding() == PathEncoding::Native {
            return DecodedPath {
                path: track.raw().to_string(),
                lossy: false,
            };
        }

        let mut path = track.raw().replace(PROPRIETARY_SEPARATOR, &self.separator);
        let mut lossy = false;

        if self.platform_normalization && cfg!(unix) {
            let marker = format!("{}{}{}", self.separator, HOME_SEGMENT, self.separator);
            if let Some(idx) = path.find(&marker) {
                // Re-root at the home marker, dropping the volume prefix
                path = path[idx..].to_string();
                lossy = true;
            }
        }

        if let Some(root) = &self.root_strip {
            if path.contains(root.as_str()) {
                path = path.replace(root.as_str(), "");
                lossy = true;
            }
        }

        if !self.prefix.is_empty() {
            path = format!("{}{}", self.prefix, path);
            lossy = true;
        }

        DecodedPath { path, lossy }
    }

    /// Encode a native path into the proprietary representation.
    ///
    /// Encoding an already-Proprietary reference is a guarded no-op.
    pub fn encode(&self, track: &TrackRef) -> TrackRef {
        track.clone().into_proprietary()
    }

    /// Re-encode a previously decoded path.
    ///
    /// Fails with [`ConvertError::UnsupportedRoundTrip`] when the decode
    /// was lossy: a stripped root or discarded volume prefix cannot be
    /// recovered, so the caller must keep the original `TrackRef` instead.
    pub fn reencode(&self, decoded: &DecodedPath) -> Result<TrackRef, ConvertError> {
        if decoded.is_lossy() {
            return Err(ConvertError::UnsupportedRoundTrip(decoded.path.clone()));
        }
        Ok(self.encode(&TrackRef::native(decoded.path.clone())))
    }
}
