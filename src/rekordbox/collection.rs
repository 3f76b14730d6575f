//! Rekordbox collection export (rekordbox.xml) parser

use super::tree::{collect_playlists, collect_referenced_track_ids};
use super::xml::{parse_document, Element};
use crate::analysis::{playlist_duplicates, probable_duplicates, unreferenced_tracks};
use crate::error::{Result, TidyError};
use crate::model::{ParsedCatalog, PlaylistNode, Product, Track};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

const FOLDER_TYPE: &str = "0";
const PLAYLIST_TYPE: &str = "1";

/// Parse a collection export and derive every view over it
///
/// `path` only labels where the text came from.
pub fn parse_collection(contents: &str, path: &Path) -> Result<ParsedCatalog> {
    let document = parse_document(contents)?;
    if document.name != "DJ_PLAYLISTS" {
        return Err(TidyError::parse(format!(
            "unexpected root element <{}>, expected <DJ_PLAYLISTS>",
            document.name
        )));
    }

    let product = document
        .child("PRODUCT")
        .map(|p| Product {
            name: p.attr("Name").unwrap_or_default().to_string(),
            version: p.attr("Version").unwrap_or_default().to_string(),
            company: p.attr("Company").unwrap_or_default().to_string(),
        })
        .ok_or_else(|| TidyError::parse("missing PRODUCT node"))?;

    let collection = document
        .child("COLLECTION")
        .ok_or_else(|| TidyError::parse("missing COLLECTION node"))?;
    let tracks = parse_tracks(collection)?;
    log::info!("Parsed {} tracks from collection", tracks.len());

    let root = document
        .child("PLAYLISTS")
        .ok_or_else(|| TidyError::parse("missing PLAYLISTS node"))?
        .child("NODE")
        .ok_or_else(|| TidyError::parse("missing root playlist NODE"))?;
    let tree = parse_nodes(root)?;

    let playlists = collect_playlists(&tree, None);
    let referenced_track_ids = collect_referenced_track_ids(&tree);
    log::info!(
        "Parsed {} playlists referencing {} distinct tracks",
        playlists.len(),
        referenced_track_ids.len()
    );

    let unreferenced = unreferenced_tracks(&tracks, &referenced_track_ids);
    let duplicate_pairs = probable_duplicates(&tracks);
    let duplicates_in_playlists = playlist_duplicates(&playlists, &tracks);
    log::info!(
        "{} tracks outside playlists, {} probable duplicates, {} playlists with repeats",
        unreferenced.len(),
        duplicate_pairs.len(),
        duplicates_in_playlists.len()
    );

    Ok(ParsedCatalog {
        version: product.version.clone(),
        format_version: document.attr("Version").unwrap_or_default().to_string(),
        product,
        tracks,
        playlists,
        referenced_track_ids,
        unreferenced_tracks: unreferenced,
        duplicate_pairs,
        playlist_duplicates: duplicates_in_playlists,
        path: path.to_path_buf(),
    })
}

fn parse_tracks(collection: &Element) -> Result<Vec<Track>> {
    let mut tracks = Vec::new();
    let mut ids = HashSet::new();

    for element in collection.children_named("TRACK") {
        let track = convert_attributes_to_track(&element.attrs)?;
        if !ids.insert(track.id.clone()) {
            return Err(TidyError::parse(format!("duplicate TrackID {}", track.id)));
        }
        tracks.push(track);
    }

    Ok(tracks)
}

/// Map a TRACK attribute bag onto a [`Track`], keeping unknown attributes
fn convert_attributes_to_track(attrs: &BTreeMap<String, String>) -> Result<Track> {
    let mut track = Track::default();

    for (key, value) in attrs {
        let value = value.clone();
        match key.as_str() {
            "TrackID" => track.id = value,
            "Name" => track.title = value,
            "Artist" => track.artist = value,
            "Composer" => track.composer = value,
            "Album" => track.album = value,
            "Grouping" => track.grouping = value,
            "Genre" => track.genre = value,
            "Kind" => track.kind = value,
            "Size" => track.size = value,
            "TotalTime" => track.total_time = value,
            "DiscNumber" => track.disc_number = value,
            "TrackNumber" => track.track_number = value,
            "Year" => track.year = value,
            "AverageBpm" => track.average_bpm = value,
            "DateAdded" => track.date_added = value,
            "BitRate" => track.bit_rate = value,
            "SampleRate" => track.sample_rate = value,
            "Comments" => track.comments = value,
            "PlayCount" => track.play_count = value,
            "Rating" => track.rating = value,
            "Location" => track.location = value,
            "Remixer" => track.remixer = value,
            "Tonality" => track.tonality = value,
            "Label" => track.label = value,
            "Mix" => track.mix = value,
            _ => {
                track.extra.insert(key.clone(), value);
            }
        }
    }

    if track.id.is_empty() {
        return Err(TidyError::parse("TRACK without TrackID"));
    }
    Ok(track)
}

/// Convert the children of a folder NODE into tree nodes
fn parse_nodes(folder: &Element) -> Result<Vec<PlaylistNode>> {
    let mut nodes = Vec::new();

    for element in folder.children_named("NODE") {
        let name = element.attr("Name").unwrap_or_default().to_string();
        match element.attr("Type") {
            Some(FOLDER_TYPE) => nodes.push(PlaylistNode::Folder {
                children: parse_nodes(element)?,
                name,
            }),
            Some(PLAYLIST_TYPE) => {
                let track_ids = element
                    .children_named("TRACK")
                    .map(|t| {
                        t.attr("Key").map(str::to_string).ok_or_else(|| {
                            TidyError::parse(format!("playlist '{}' has a TRACK without Key", name))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                nodes.push(PlaylistNode::Playlist { name, track_ids });
            }
            other => {
                log::warn!("Skipping node '{}' with unknown type {:?}", name, other);
            }
        }
    }

    Ok(nodes)
}
