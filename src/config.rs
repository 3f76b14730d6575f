//! Analyzer configuration

/// Extensions treated as audio when looking for orphan files
pub const DEFAULT_AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "wav", "aac", "flac", "alac", "aiff"];

/// Configuration shared by the orphan scan and the quarantine actions
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Lower-case extensions (without the dot) counted as audio files
    pub audio_extensions: Vec<String>,

    /// Sibling folder that kept files are moved into
    pub keep_folder: String,

    /// Sibling folder that files marked for deletion are moved into
    pub delete_folder: String,
}

impl AnalyzerConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self {
            audio_extensions: DEFAULT_AUDIO_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            keep_folder: "KEEP".to_string(),
            delete_folder: "DELETE".to_string(),
        }
    }

    /// Replace the audio extension allowlist
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.audio_extensions = extensions
            .into_iter()
            .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    pub fn is_audio_extension(&self, extension: &str) -> bool {
        self.audio_extensions.iter().any(|e| e == extension)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self::new()
    }
}
