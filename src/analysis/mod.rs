//! Derived views over a parsed collection
//!
//! Unreferenced tracks, probable duplicates, repeated playlist entries and
//! audio files on disk missing from the collection. Everything here runs
//! sequentially over already-parsed data; only the orphan scan touches the
//! filesystem.

mod duplicates;
mod membership;
mod orphans;

pub use duplicates::{playlist_duplicates, probable_duplicates};
pub use membership::unreferenced_tracks;
pub use orphans::{find_orphans, scan_directory_shallow, DirectoryEntry, OrphanFile};
