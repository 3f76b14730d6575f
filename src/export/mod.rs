//! Output side: playlist files and file triage

pub mod m3u;
pub mod quarantine;

pub use m3u::{render_m3u8, write_playlist, PLAYLIST_EXTENSION};
pub use quarantine::move_to_subfolder;
