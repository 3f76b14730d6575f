//! File and folder picker abstraction

use crate::error::Outcome;
use std::path::PathBuf;

/// Something that can ask the user for a path
///
/// Implementations return [`Outcome::Canceled`] when the user dismisses the
/// picker. Dialog-based front ends and preset answers both fit behind this.
pub trait FilePrompt {
    /// Ask for a collection file to open
    fn pick_collection_file(&self) -> Outcome<PathBuf>;

    /// Ask where to save a file, suggesting `default_name` with `extension`
    fn pick_save_path(&self, default_name: &str, extension: &str) -> Outcome<PathBuf>;

    /// Ask for a directory to scan
    fn pick_directory(&self) -> Outcome<PathBuf>;
}

/// Prompt that answers from paths given up front
///
/// Used by the command line and tests. A missing answer counts as a cancel.
#[derive(Debug, Clone, Default)]
pub struct PresetPrompt {
    collection: Option<PathBuf>,
    save_path: Option<PathBuf>,
    directory: Option<PathBuf>,
}

impl PresetPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(mut self, path: PathBuf) -> Self {
        self.collection = Some(path);
        self
    }

    /// Answer save prompts with `path`
    ///
    /// If `path` is an existing directory, the suggested file name is saved
    /// inside it.
    pub fn with_save_path(mut self, path: PathBuf) -> Self {
        self.save_path = Some(path);
        self
    }

    pub fn with_directory(mut self, path: PathBuf) -> Self {
        self.directory = Some(path);
        self
    }
}

fn answer(preset: &Option<PathBuf>) -> Outcome<PathBuf> {
    match preset {
        Some(path) => Outcome::Done(path.clone()),
        None => Outcome::Canceled,
    }
}

impl FilePrompt for PresetPrompt {
    fn pick_collection_file(&self) -> Outcome<PathBuf> {
        answer(&self.collection)
    }

    fn pick_save_path(&self, default_name: &str, extension: &str) -> Outcome<PathBuf> {
        answer(&self.save_path).map(|path| {
            if path.is_dir() {
                path.join(format!("{}.{}", default_name, extension))
            } else {
                path
            }
        })
    }

    fn pick_directory(&self) -> Outcome<PathBuf> {
        answer(&self.directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_answers_cancel() {
        let prompt = PresetPrompt::new();
        assert!(prompt.pick_collection_file().is_canceled());
        assert!(prompt.pick_save_path("lost_tracks", "m3u8").is_canceled());
        assert!(prompt.pick_directory().is_canceled());
    }

    #[test]
    fn test_save_into_directory_uses_default_name() {
        let dir = TempDir::new().unwrap();
        let prompt = PresetPrompt::new().with_save_path(dir.path().to_path_buf());
        assert_eq!(
            prompt.pick_save_path("lost_tracks", "m3u8"),
            Outcome::Done(dir.path().join("lost_tracks.m3u8"))
        );
    }

    #[test]
    fn test_save_to_file_path_is_used_as_is() {
        let prompt = PresetPrompt::new().with_save_path(PathBuf::from("/tmp/out/set.m3u8"));
        assert_eq!(
            prompt.pick_save_path("ignored", "m3u8"),
            Outcome::Done(PathBuf::from("/tmp/out/set.m3u8"))
        );
    }
}
