//! Rekordbox Tidy - collection housekeeping for Rekordbox XML exports
//!
//! This library parses a Rekordbox collection export and finds tracks
//! outside any playlist, probable duplicates, repeated playlist entries and
//! audio files on disk the collection does not know about.

pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod rekordbox;
pub mod session;

pub use config::AnalyzerConfig;
pub use error::{Outcome, Result, TidyError};
pub use session::{FilePrompt, PresetPrompt, Session};
