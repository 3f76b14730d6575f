use serde::{Deserialize, Serialize};

/// A playlist after flattening, named with its full folder path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Display name, e.g. `"Gigs > 2024 > Warmup"`
    pub name: String,

    /// Track identifiers in playlist order (may repeat)
    pub track_ids: Vec<String>,
}

impl Playlist {
    /// Create a new empty playlist
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            track_ids: Vec::new(),
        }
    }

    /// Append a track reference
    pub fn add_track(&mut self, track_id: impl Into<String>) {
        self.track_ids.push(track_id.into());
    }

    pub fn len(&self) -> usize {
        self.track_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.track_ids.is_empty()
    }
}

/// One node of the playlist tree as it appears in the collection
///
/// Only exists while the tree is being walked; the flattened [`Playlist`]
/// list is what survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistNode {
    Folder {
        name: String,
        children: Vec<PlaylistNode>,
    },
    Playlist {
        name: String,
        track_ids: Vec<String>,
    },
}
