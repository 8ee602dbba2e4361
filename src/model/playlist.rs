use super::TrackRef;
use serde::{Deserialize, Serialize};

/// Represents a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Playlist name
    pub name: String,

    /// Track references (ordered; playback order is meaningful)
    pub entries: Vec<TrackRef>,

    /// Names of the ancestor folders, outermost first. Empty for playlists
    /// sitting directly under the collection's implicit root.
    pub folder_path: Vec<String>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            folder_path: Vec::new(),
        }
    }

    /// Append a track to this playlist
    pub fn push_entry(&mut self, track: TrackRef) {
        self.entries.push(track);
    }

    /// Number of tracks in this playlist
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Output file stem for this playlist.
    ///
    /// With `full_folder_names` the stem is `"{folder} {name}"` using the
    /// innermost folder, disambiguating same-named playlists in different
    /// folders. Otherwise the bare name is used, and colliding names
    /// overwrite each other on disk.
    pub fn file_stem(&self, full_folder_names: bool) -> String {
        match (full_folder_names, self.folder_path.last()) {
            (true, Some(folder)) => format!("{} {}", folder, self.name),
            _ => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_preserve_order() {
        let mut playlist = Playlist::new("Warmup");
        playlist.push_entry(TrackRef::native("/music/a.mp3"));
        playlist.push_entry(TrackRef::native("/music/b.mp3"));
        playlist.push_entry(TrackRef::native("/music/c.mp3"));

        let raws: Vec<&str> = playlist.entries.iter().map(|t| t.raw()).collect();
        assert_eq!(raws, vec!["/music/a.mp3", "/music/b.mp3", "/music/c.mp3"]);
    }

    #[test]
    fn test_file_stem_bare_and_qualified() {
        let mut playlist = Playlist::new("Favorites");
        playlist.folder_path = vec!["Archive".to_string(), "2024".to_string()];

        assert_eq!(playlist.file_stem(false), "Favorites");
        assert_eq!(playlist.file_stem(true), "2024 Favorites");
    }

    #[test]
    fn test_file_stem_qualified_without_folder_falls_back_to_name() {
        let playlist = Playlist::new("Top Level");
        assert_eq!(playlist.file_stem(true), "Top Level");
    }
}
