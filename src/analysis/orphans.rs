//! Audio files on disk that the collection does not know about

use crate::config::AnalyzerConfig;
use crate::error::{Result, TidyError};
use crate::model::Track;
use crate::rekordbox::location;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One entry directly inside a scanned directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEntry {
    File {
        path: PathBuf,
        /// Lower-cased extension, if any
        extension: Option<String>,
    },
    Folder {
        path: PathBuf,
    },
}

/// An audio file with no matching collection entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrphanFile {
    pub path: PathBuf,

    /// Size in bytes
    pub size: u64,
}

/// List the entries of `dir` without descending into subfolders
///
/// Entry paths are absolute so they compare equal to decoded track locations.
pub fn scan_directory_shallow(dir: &Path) -> Result<Vec<DirectoryEntry>> {
    let dir = std::path::absolute(dir)
        .map_err(|e| TidyError::filesystem("Failed to resolve directory", dir, e))?;
    let dir = dir.as_path();
    log::info!("Scanning {:?} (single level)", dir);

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            TidyError::filesystem("Failed to list directory", dir, io::Error::from(e))
        })?;
        let path = entry.path().to_path_buf();

        if entry.file_type().is_dir() {
            entries.push(DirectoryEntry::Folder { path });
        } else {
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase());
            entries.push(DirectoryEntry::File { path, extension });
        }
    }

    log::debug!("Found {} entries in {:?}", entries.len(), dir);
    Ok(entries)
}

/// Audio files among `entries` whose path matches no track location
///
/// Tracks with an empty location are ignored; any other location that fails
/// to decode aborts the scan.
pub fn find_orphans(
    entries: &[DirectoryEntry],
    tracks: &[Track],
    config: &AnalyzerConfig,
) -> Result<Vec<OrphanFile>> {
    let mut known_paths: HashSet<PathBuf> = HashSet::with_capacity(tracks.len());
    for track in tracks.iter().filter(|t| !t.location.is_empty()) {
        known_paths.insert(location::decode(&track.location)?);
    }

    let mut orphans = Vec::new();
    for entry in entries {
        let DirectoryEntry::File { path, extension } = entry else {
            continue;
        };
        let is_audio = extension
            .as_deref()
            .map(|ext| config.is_audio_extension(ext))
            .unwrap_or(false);
        if !is_audio || known_paths.contains(path) {
            continue;
        }

        let size = fs::metadata(path)
            .map_err(|e| TidyError::filesystem("Failed to read file size", path, e))?
            .len();
        log::debug!("Orphan: {:?} ({} bytes)", path, size);
        orphans.push(OrphanFile {
            path: path.clone(),
            size,
        });
    }

    log::info!("Found {} orphan audio files", orphans.len());
    Ok(orphans)
}
