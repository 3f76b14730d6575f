//! Rekordbox collection parsing
//!
//! Reads the XML collection export (File > Export Collection in xml format)
//! and maps it onto the crate's data model.

mod collection;
pub mod location;
mod tree;
pub mod xml;

pub use collection::parse_collection;
pub use tree::{collect_playlists, collect_referenced_track_ids};

use crate::error::{Result, TidyError};
use crate::model::ParsedCatalog;
use std::fs;
use std::path::Path;

/// Read and parse a collection export from disk
///
/// # Arguments
/// * `path` - Path to the exported XML file (typically rekordbox.xml)
pub fn read_collection(path: &Path) -> Result<ParsedCatalog> {
    log::info!("Reading collection from {:?}", path);
    let contents = fs::read_to_string(path)
        .map_err(|e| TidyError::filesystem("Failed to read collection", path, e))?;

    if contents.trim().is_empty() {
        return Err(TidyError::parse("no content"));
    }

    parse_collection(&contents, path)
}
