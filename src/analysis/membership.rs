//! Tracks that no playlist refers to

use crate::model::Track;
use std::collections::HashSet;

/// Tracks whose identifier is not in `referenced`, in collection order
pub fn unreferenced_tracks(tracks: &[Track], referenced: &HashSet<String>) -> Vec<Track> {
    tracks
        .iter()
        .filter(|t| !referenced.contains(&t.id))
        .cloned()
        .collect()
}
