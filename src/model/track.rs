use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single audio file entry of the collection
///
/// Every field is kept exactly as the collection stores it. Numeric-looking
/// fields stay strings and are parsed on demand by the accessors below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Identifier, unique within one collection
    pub id: String,

    /// Track title
    pub title: String,

    pub artist: String,
    pub composer: String,
    pub album: String,
    pub grouping: String,
    pub genre: String,

    /// File kind as reported by the DJ software (e.g. "MP3 File")
    pub kind: String,

    /// File size in bytes
    pub size: String,

    /// Duration in seconds
    pub total_time: String,

    pub disc_number: String,
    pub track_number: String,
    pub year: String,
    pub average_bpm: String,

    /// Date the track was added, `YYYY-MM-DD`
    pub date_added: String,

    pub bit_rate: String,
    pub sample_rate: String,
    pub comments: String,
    pub play_count: String,
    pub rating: String,

    /// URL-style reference to the audio file (`file://localhost/...`)
    pub location: String,

    pub remixer: String,
    pub tonality: String,
    pub label: String,
    pub mix: String,

    /// Attributes without a dedicated field, kept verbatim
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl Track {
    /// `"artist - title"`, the key used for duplicate matching and M3U info lines
    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }

    /// Duration in whole seconds, if the stored value is numeric
    pub fn total_time_seconds(&self) -> Option<u32> {
        self.total_time.trim().parse().ok()
    }

    pub fn average_bpm(&self) -> Option<f32> {
        self.average_bpm.trim().parse().ok()
    }

    pub fn size_bytes(&self) -> Option<u64> {
        self.size.trim().parse().ok()
    }

    pub fn date_added(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date_added.trim(), "%Y-%m-%d").ok()
    }
}

/// Format a duration as `m:ss`
pub fn format_seconds(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
