use serde::{Deserialize, Serialize};

/// Names the collection format reserves for itself.
///
/// Traktor marks the implicit top-level container with a `$ROOT` folder and
/// maintains system playlists for the loop library and the recording bin.
/// The lists are injectable rather than hard-coded so the traversal logic
/// stays testable independent of the Traktor vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservedNames {
    /// Folder name prefixes denoting a root container; matching folders are
    /// excluded from traversal together with everything below them.
    root_markers: Vec<String>,

    /// Playlist names excluded from file output (still counted in stats).
    system_playlists: Vec<String>,
}

impl ReservedNames {
    /// The names Traktor actually uses.
    pub fn traktor() -> Self {
        Self {
            root_markers: vec!["$ROOT".to_string()],
            system_playlists: vec!["_LOOPS".to_string(), "_RECORDINGS".to_string()],
        }
    }

    /// A custom denylist, mainly for tests.
    pub fn new(root_markers: Vec<String>, system_playlists: Vec<String>) -> Self {
        Self {
            root_markers,
            system_playlists,
        }
    }

    /// Does this folder name mark a root container?
    pub fn is_root_folder(&self, name: &str) -> bool {
        self.root_markers.iter().any(|m| name.starts_with(m.as_str()))
    }

    /// Is this playlist one of the system-generated ones?
    pub fn is_system_playlist(&self, name: &str) -> bool {
        self.system_playlists.iter().any(|m| name == m)
    }
}

impl Default for ReservedNames {
    fn default() -> Self {
        Self::traktor()
    }
}
