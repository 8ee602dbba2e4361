//! Conversion pipeline orchestration
//!
//! Strictly sequential: the collection is parsed once, then playlists are
//! processed one at a time in document order, each output file written
//! before the next playlist is touched. Files already written when a later
//! step fails stay on disk; there is no rollback.

use super::options::ConvertOptions;
use crate::error::ConvertError;
use crate::model::{Playlist, TrackRef};
use crate::{m3u, traktor};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a collection-to-M3U run.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Every non-empty playlist found, system playlists included — they
    /// are countable for statistics even though they are never written
    pub playlists: Vec<Playlist>,

    /// Output files, in the order they were written
    pub files_written: Vec<PathBuf>,

    /// Number of system playlists excluded from file output
    pub skipped_system: usize,
}

/// Orchestrates the two supported conversion directions.
pub struct ConvertPipeline {
    options: ConvertOptions,
}

impl ConvertPipeline {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Collection → one M3U file per retained playlist.
    ///
    /// Bare playlist names are not deduplicated: when two folders hold a
    /// playlist with the same name and full folder names are off, the
    /// second write overwrites the first file.
    pub fn collection_to_m3u(
        &self,
        collection: &Path,
        output_dir: &Path,
    ) -> Result<ExportReport, ConvertError> {
        let playlists = traktor::read_playlists(collection, &self.options.reserved)?;

        fs::create_dir_all(output_dir).map_err(|e| ConvertError::io(output_dir, e))?;

        let codec = self.options.codec();
        let mut files_written = Vec::new();
        let mut skipped_system = 0;

        for playlist in &playlists {
            if self.options.reserved.is_system_playlist(&playlist.name) {
                log::debug!("Skipping system playlist: {}", playlist.name);
                skipped_system += 1;
                continue;
            }

            let entries: Vec<String> = playlist
                .entries
                .iter()
                .map(|track| codec.decode(track).into_string())
                .collect();

            let file_name = format!("{}.m3u", playlist.file_stem(self.options.full_folder_names));
            let output_path = output_dir.join(file_name);
            m3u::write_file(&output_path, &entries)?;
            log::info!(
                "Playlist file '{}' written to {:?} ({} tracks)",
                playlist.name,
                output_path,
                entries.len()
            );
            files_written.push(output_path);
        }

        Ok(ExportReport {
            playlists,
            files_written,
            skipped_system,
        })
    }

    /// One M3U file → a new playlist fragment in the target collection.
    ///
    /// Returns the number of tracks inserted. An empty playlist never
    /// touches the collection; that is not an error.
    pub fn m3u_to_collection(
        &self,
        playlist_file: &Path,
        collection: &Path,
        name: &str,
    ) -> Result<usize, ConvertError> {
        let lines = m3u::read_file(playlist_file)?;
        if lines.is_empty() {
            log::warn!("No tracks in {:?}, collection left untouched", playlist_file);
            return Ok(0);
        }

        let codec = self.options.codec();
        let mut playlist = Playlist::new(name);
        for line in lines {
            playlist.push_entry(codec.encode(&TrackRef::native(line)));
        }

        traktor::append_to_collection(collection, &playlist)?;
        Ok(playlist.len())
    }
}
