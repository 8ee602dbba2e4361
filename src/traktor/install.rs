//! Locating the newest installed Traktor version
//!
//! Traktor keeps one documents folder per installed version, named
//! `Traktor <major>.<minor>.<patch>`, each with its own collection.nml.

use regex::Regex;
use std::fs;
use std::path::PathBuf;

fn version_pattern() -> Option<Regex> {
    Regex::new(r"^Traktor (\d+)\.(\d+)\.(\d+)$").ok()
}

/// Parse a `Traktor 3.11.1`-style folder name into a version triple.
fn parse_version(pattern: &Regex, name: &str) -> Option<(u32, u32, u32)> {
    let caps = pattern.captures(name)?;
    Some((
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    ))
}

/// Find the documents folder of the newest installed Traktor version.
pub fn find_latest_install() -> Option<PathBuf> {
    let documents = dirs::home_dir()?.join("Documents").join("Native Instruments");
    let entries = fs::read_dir(&documents).ok()?;
    let pattern = version_pattern()?;

    let mut best: Option<((u32, u32, u32), String)> = None;
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(version) = parse_version(&pattern, &name) {
            if best.as_ref().map_or(true, |(v, _)| version > *v) {
                best = Some((version, name));
            }
        }
    }

    let (_, name) = best?;
    let install = documents.join(name);
    log::debug!("Using Traktor folder: {:?}", install);
    Some(install)
}

/// Default collection.nml path: the newest install's collection file.
pub fn default_collection_path() -> Option<PathBuf> {
    find_latest_install().map(|install| install.join("collection.nml"))
}
