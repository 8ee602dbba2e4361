//! M3U playlist reading and writing

use crate::error::ConvertError;
use std::fs;
use std::path::Path;

/// Header line of an extended M3U playlist.
pub const HEADER: &str = "#EXTM3U";

/// Extract track paths from M3U text.
///
/// Keeps non-empty, non-comment lines in order; a line is a comment if its
/// first character is `#`. EXTINF and other directives are ignored.
pub fn parse(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read an M3U playlist file.
pub fn read_file(path: &Path) -> Result<Vec<String>, ConvertError> {
    let content = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    let tracks = parse(&content);
    log::debug!("Read {} tracks from {:?}", tracks.len(), path);
    Ok(tracks)
}

/// Render playlist entries as M3U text: the header line, then one path per
/// line. Track paths are never checked against the filesystem.
pub fn render(entries: &[String]) -> String {
    let mut content = String::from(HEADER);
    for entry in entries {
        content.push('\n');
        content.push_str(entry);
    }
    content
}

/// Write an M3U playlist file.
pub fn write_file(path: &Path, entries: &[String]) -> Result<(), ConvertError> {
    fs::write(path, render(entries)).map_err(|e| ConvertError::io(path, e))
}
