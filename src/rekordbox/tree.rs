//! Playlist tree flattening

use crate::model::{Playlist, PlaylistNode};
use std::collections::HashSet;

const PATH_SEPARATOR: &str = " > ";

/// Flatten a folder/playlist tree into playlists named by their folder path
///
/// Depth-first, keeping sibling order. A playlist under folders `A` then `B`
/// is named `"A > B > name"`; with no `prefix`, top-level playlists keep their
/// own name.
pub fn collect_playlists(nodes: &[PlaylistNode], prefix: Option<&str>) -> Vec<Playlist> {
    let mut result = Vec::new();
    walk_playlists(nodes, prefix, &mut result);
    result
}

fn walk_playlists(nodes: &[PlaylistNode], prefix: Option<&str>, out: &mut Vec<Playlist>) {
    for node in nodes {
        match node {
            PlaylistNode::Playlist { name, track_ids } => {
                out.push(Playlist {
                    name: qualified_name(prefix, name),
                    track_ids: track_ids.clone(),
                });
            }
            PlaylistNode::Folder { name, children } => {
                let folder_path = qualified_name(prefix, name);
                walk_playlists(children, Some(&folder_path), out);
            }
        }
    }
}

/// An empty prefix counts as no prefix
fn qualified_name(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}{}{}", prefix, PATH_SEPARATOR, name),
        _ => name.to_string(),
    }
}

/// Every track identifier referenced by any playlist in the tree
pub fn collect_referenced_track_ids(nodes: &[PlaylistNode]) -> HashSet<String> {
    let mut ids = HashSet::new();
    walk_track_ids(nodes, &mut ids);
    ids
}

fn walk_track_ids(nodes: &[PlaylistNode], ids: &mut HashSet<String>) {
    for node in nodes {
        match node {
            PlaylistNode::Playlist { track_ids, .. } => {
                ids.extend(track_ids.iter().cloned());
            }
            PlaylistNode::Folder { children, .. } => walk_track_ids(children, ids),
        }
    }
}
