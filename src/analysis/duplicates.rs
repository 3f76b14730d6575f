//! Probable duplicates across the collection and repeated playlist entries

use crate::model::{DuplicatePair, Playlist, PlaylistDuplicates, Track};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

/// Bookkeeping for the first track seen under one `"artist - title"` key
struct FirstSeen {
    index: usize,
    reported: bool,
}

/// Pair up tracks whose `"artist - title"` strings match exactly
///
/// Matching is case-sensitive with no normalization. The first track seen
/// under a key wins: the first later collision is reported as
/// `(current, first_seen)` and any further tracks with the same key are not
/// reported. Results follow collection order.
pub fn probable_duplicates(tracks: &[Track]) -> Vec<DuplicatePair> {
    let mut first_seen: HashMap<String, FirstSeen> = HashMap::new();
    let mut pairs = Vec::new();

    for (index, track) in tracks.iter().enumerate() {
        match first_seen.entry(track.display_name()) {
            Entry::Occupied(mut entry) => {
                let seen = entry.get_mut();
                if seen.reported {
                    log::debug!("Further duplicate not reported: {}", entry.key());
                    continue;
                }
                seen.reported = true;
                pairs.push(DuplicatePair {
                    current: track.clone(),
                    first_seen: tracks[seen.index].clone(),
                });
            }
            Entry::Vacant(entry) => {
                entry.insert(FirstSeen {
                    index,
                    reported: false,
                });
            }
        }
    }

    pairs
}

/// Find track identifiers repeated within a single playlist
///
/// Every occurrence after the first is described as
/// `"<1-based position>. <artist> - <title>"`, or just the identifier when it
/// does not resolve to a track. Playlists without repeats are left out.
pub fn playlist_duplicates(playlists: &[Playlist], tracks: &[Track]) -> PlaylistDuplicates {
    let by_id: HashMap<&str, &Track> = tracks.iter().map(|t| (t.id.as_str(), t)).collect();
    let mut result = PlaylistDuplicates::new();

    for playlist in playlists.iter().filter(|p| !p.is_empty()) {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut duplicates = Vec::new();

        for (position, track_id) in playlist.track_ids.iter().enumerate() {
            if seen.insert(track_id.as_str()) {
                continue;
            }
            let description = match by_id.get(track_id.as_str()) {
                Some(track) => format!("{}. {} - {}", position + 1, track.artist, track.title),
                None => track_id.clone(),
            };
            duplicates.push(description);
        }

        if !duplicates.is_empty() {
            log::debug!(
                "Playlist '{}' has {} repeated entries",
                playlist.name,
                duplicates.len()
            );
            result.insert(playlist.name.clone(), duplicates);
        }
    }

    result
}
