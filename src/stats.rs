//! File-extension statistics over playlist entries

use crate::model::Playlist;
use std::collections::BTreeMap;
use std::path::Path;

/// Width of the longest possible histogram bar.
const SCALE_FACTOR: usize = 50;

/// Per-extension counts across one or more playlists.
#[derive(Debug, Default)]
pub struct ExtensionStats {
    counts: BTreeMap<String, usize>,
    total: usize,
}

impl ExtensionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every entry of a playlist.
    pub fn record(&mut self, playlist: &Playlist) {
        for entry in &playlist.entries {
            self.record_path(entry.raw());
        }
    }

    fn record_path(&mut self, path: &str) {
        let ext = Path::new(path)
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        *self.counts.entry(ext).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Render the counts as a proportional `#`-bar histogram.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (ext, count) in &self.counts {
            let proportion = *count as f64 / self.total as f64;
            let bar_length = (proportion * SCALE_FACTOR as f64) as usize;
            out.push_str(&format!("{}: {} ({})\n", ext, "#".repeat(bar_length), count));
        }
        out
    }
}
