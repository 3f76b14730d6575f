//! Extended M3U (m3u8) playlist writer

use crate::error::{Result, TidyError};
use crate::model::Track;
use crate::rekordbox::location;
use std::fs;
use std::path::Path;

/// File extension for written playlists
pub const PLAYLIST_EXTENSION: &str = "m3u8";

const HEADER: &str = "#EXTM3U";

/// Render tracks as an extended M3U playlist
///
/// Tracks are written in the given order, without filtering or dedup.
pub fn render_m3u8<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> String {
    let mut m3u8 = format!("{}\n", HEADER);
    for track in tracks {
        m3u8.push_str(&format!(
            "#EXTINF:{},{} - {}\n",
            track.total_time, track.artist, track.title
        ));
        m3u8.push_str(&location::for_display(&track.location));
        m3u8.push('\n');
    }
    m3u8
}

/// Write a rendered playlist to `path` as UTF-8
pub fn write_playlist(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)
        .map_err(|e| TidyError::filesystem("Failed to write playlist", path, e))?;
    log::info!("Playlist written to {:?}", path);
    Ok(())
}
