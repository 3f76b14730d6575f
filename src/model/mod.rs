//! Data model for a parsed DJ collection
//!
//! These structures are independent of the XML layout they are read from.

mod catalog;
mod playlist;
mod track;

pub use catalog::{
    DuplicatePair, ParsedCatalog, PlaylistDuplicateEntries, PlaylistDuplicates, Product,
};
pub use playlist::{Playlist, PlaylistNode};
pub use track::{format_seconds, Track};
