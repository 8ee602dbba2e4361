use serde::{Deserialize, Serialize};

/// Separator marker used inside collection.nml track keys.
pub const PROPRIETARY_SEPARATOR: &str = "/:";

/// Which representation a track path is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathEncoding {
    /// Traktor's colon-after-slash encoding, e.g. `C:/:Music/:Track.mp3`
    Proprietary,

    /// An OS path using the platform's conventional separator
    Native,
}

/// A track path together with its known encoding.
///
/// The encoding must be known before any codec operation; it is never
/// inferred from the string contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRef {
    raw: String,
    encoding: PathEncoding,
}

impl TrackRef {
    /// Wrap a key read from a collection document.
    pub fn proprietary(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            encoding: PathEncoding::Proprietary,
        }
    }

    /// Wrap an OS path, e.g. a line read from an M3U file.
    pub fn native(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            encoding: PathEncoding::Native,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn encoding(&self) -> PathEncoding {
        self.encoding
    }

    /// Convert to the proprietary encoding. Already-proprietary refs pass
    /// through unchanged (guarded no-op, not an error).
    pub fn into_proprietary(self) -> TrackRef {
        match self.encoding {
            PathEncoding::Proprietary => self,
            PathEncoding::Native => {
                let forward = self.raw.replace('\\', "/");
                TrackRef::proprietary(forward.replace('/', PROPRIETARY_SEPARATOR))
            }
        }
    }
}
