//! User-facing operations over the current collection
//!
//! A [`Session`] owns the current collection and a [`FilePrompt`]. Every
//! operation either returns its payload, [`Outcome::Canceled`] when the user
//! dismissed a picker, or a [`TidyError`].

mod prompt;
mod store;

pub use prompt::{FilePrompt, PresetPrompt};
pub use store::CatalogStore;

use crate::analysis::{find_orphans, scan_directory_shallow, OrphanFile};
use crate::config::AnalyzerConfig;
use crate::error::{Outcome, Result, TidyError};
use crate::export::{move_to_subfolder, render_m3u8, write_playlist, PLAYLIST_EXTENSION};
use crate::model::{ParsedCatalog, Track};
use crate::rekordbox::{parse_collection, read_collection};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Current collection plus the operations the application offers on it
pub struct Session<P: FilePrompt> {
    config: AnalyzerConfig,
    store: CatalogStore,
    prompt: P,
}

impl<P: FilePrompt> Session<P> {
    /// Create a session with no collection loaded
    pub fn new(config: AnalyzerConfig, prompt: P) -> Self {
        Self {
            config,
            store: CatalogStore::new(),
            prompt,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The current collection, or [`TidyError::NoCollectionLoaded`]
    pub fn catalog(&self) -> Result<Arc<ParsedCatalog>> {
        self.store.current()
    }

    /// Ask for a collection file, parse it and make it current
    ///
    /// On any error the previously loaded collection stays current.
    pub fn open_collection(&self) -> Result<Outcome<Arc<ParsedCatalog>>> {
        let path = match self.prompt.pick_collection_file() {
            Outcome::Done(path) => path,
            Outcome::Canceled => return Ok(Outcome::Canceled),
        };

        let catalog = read_collection(&path)?;
        Ok(Outcome::Done(self.store.replace(catalog)))
    }

    /// Parse collection text directly and make it current
    pub fn load_collection(&self, contents: &str, path: &Path) -> Result<Arc<ParsedCatalog>> {
        let catalog = parse_collection(contents, path)?;
        Ok(self.store.replace(catalog))
    }

    /// Save the tracks that are in no playlist as an m3u8 file
    pub fn download_lost_tracks_playlist(&self) -> Result<Outcome<PathBuf>> {
        let catalog = self.catalog()?;
        let contents = render_m3u8(&catalog.unreferenced_tracks);
        self.save_playlist(&contents, "lost_tracks")
    }

    /// Save every probable duplicate pair, flattened pair by pair
    pub fn download_duplicate_tracks_playlist(&self) -> Result<Outcome<PathBuf>> {
        let catalog = self.catalog()?;
        let contents = render_m3u8(catalog.duplicate_pairs.iter().flat_map(|pair| pair.tracks()));
        self.save_playlist(&contents, "duplicate_tracks")
    }

    /// Save one flattened playlist, looked up by exact display name
    pub fn download_playlist(&self, name: &str) -> Result<Outcome<PathBuf>> {
        let tracks = self.playlist_tracks(name)?;
        let contents = render_m3u8(&tracks);
        self.save_playlist(&contents, &default_file_name(name))
    }

    /// Tracks of a playlist in playlist order
    ///
    /// References to unknown track identifiers are skipped.
    pub fn playlist_tracks(&self, name: &str) -> Result<Vec<Track>> {
        let catalog = self.catalog()?;
        let playlist = catalog
            .playlist(name)
            .ok_or_else(|| TidyError::InvalidPlaylistName(name.to_string()))?;

        let by_id: HashMap<&str, &Track> =
            catalog.tracks.iter().map(|t| (t.id.as_str(), t)).collect();
        let mut tracks = Vec::with_capacity(playlist.len());
        for track_id in &playlist.track_ids {
            match by_id.get(track_id.as_str()) {
                Some(track) => tracks.push((*track).clone()),
                None => log::warn!("Playlist '{}' references unknown track {}", name, track_id),
            }
        }
        Ok(tracks)
    }

    /// Ask for a directory and list audio files in it that the collection lacks
    ///
    /// Only the chosen directory itself is scanned, not its subfolders.
    pub fn find_orphan_files(&self) -> Result<Outcome<Vec<OrphanFile>>> {
        let catalog = self.catalog()?;
        let dir = match self.prompt.pick_directory() {
            Outcome::Done(dir) => dir,
            Outcome::Canceled => return Ok(Outcome::Canceled),
        };

        let entries = scan_directory_shallow(&dir)?;
        let orphans = find_orphans(&entries, &catalog.tracks, &self.config)?;
        Ok(Outcome::Done(orphans))
    }

    /// Move a file into the sibling keep folder
    pub fn keep_track_file(&self, path: &Path) -> Result<PathBuf> {
        move_to_subfolder(path, &self.config.keep_folder)
    }

    /// Move a file into the sibling delete folder
    pub fn delete_track_file(&self, path: &Path) -> Result<PathBuf> {
        move_to_subfolder(path, &self.config.delete_folder)
    }

    fn save_playlist(&self, contents: &str, default_name: &str) -> Result<Outcome<PathBuf>> {
        let path = match self.prompt.pick_save_path(default_name, PLAYLIST_EXTENSION) {
            Outcome::Done(path) => path,
            Outcome::Canceled => {
                log::info!("Save canceled");
                return Ok(Outcome::Canceled);
            }
        };

        write_playlist(&path, contents)?;
        Ok(Outcome::Done(path))
    }
}

/// Playlist display name made safe for use as a file name
fn default_file_name(playlist_name: &str) -> String {
    playlist_name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c => c,
        })
        .collect()
}
