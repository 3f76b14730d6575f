use super::{Playlist, Track};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Two tracks sharing the same `"artist - title"` key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicatePair {
    /// The later track in collection order
    pub current: Track,

    /// The first track seen with the same key
    pub first_seen: Track,
}

impl DuplicatePair {
    /// Both tracks, current first
    pub fn tracks(&self) -> [&Track; 2] {
        [&self.current, &self.first_seen]
    }
}

/// Repeated entries of one playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaylistDuplicateEntries {
    pub playlist: String,

    /// Descriptions like `"3. DJ X - Song"`
    pub duplicates: Vec<String>,
}

/// Playlist display name to duplicate descriptions, in playlist order
///
/// Playlists without repeated entries never appear here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlaylistDuplicates {
    entries: Vec<PlaylistDuplicateEntries>,
}

impl PlaylistDuplicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record duplicates for a playlist; a repeated name keeps its position
    /// and takes the new descriptions
    pub fn insert(&mut self, playlist: String, duplicates: Vec<String>) {
        match self.entries.iter_mut().find(|e| e.playlist == playlist) {
            Some(existing) => existing.duplicates = duplicates,
            None => self.entries.push(PlaylistDuplicateEntries {
                playlist,
                duplicates,
            }),
        }
    }

    pub fn get(&self, playlist: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.playlist == playlist)
            .map(|e| e.duplicates.as_slice())
    }

    pub fn contains(&self, playlist: &str) -> bool {
        self.get(playlist).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlaylistDuplicateEntries> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Product descriptor of the collection export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Product {
    pub name: String,
    pub version: String,
    pub company: String,
}

/// Result of one successful collection parse
///
/// Built once and never mutated; a new parse produces a new value.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedCatalog {
    /// Version of the application that exported the collection
    pub version: String,

    /// Version of the XML format itself
    pub format_version: String,

    pub product: Product,

    /// All tracks in collection order
    pub tracks: Vec<Track>,

    /// Flattened playlists in pre-order
    pub playlists: Vec<Playlist>,

    /// Identifiers referenced by at least one playlist
    pub referenced_track_ids: HashSet<String>,

    /// Tracks not referenced by any playlist, in collection order
    pub unreferenced_tracks: Vec<Track>,

    pub duplicate_pairs: Vec<DuplicatePair>,

    pub playlist_duplicates: PlaylistDuplicates,

    /// Where the collection was read from
    pub path: PathBuf,
}

impl ParsedCatalog {
    /// Get a track by identifier
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Get a flattened playlist by exact display name
    pub fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name == name)
    }

    /// Tracks referenced by at least one playlist, in collection order
    pub fn referenced_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks
            .iter()
            .filter(|t| self.referenced_track_ids.contains(&t.id))
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn playlist_count(&self) -> usize {
        self.playlists.len()
    }
}
