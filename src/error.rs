//! Error types shared by the library

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while loading or analyzing a collection
#[derive(Debug, Error)]
pub enum TidyError {
    /// Malformed or structurally unexpected collection XML
    #[error("Could not parse collection: {0}")]
    Parse(String),

    /// An operation needed a parsed collection but none has been loaded yet
    #[error("No collection loaded")]
    NoCollectionLoaded,

    /// No flattened playlist carries this exact display name
    #[error("Invalid playlist name: {0}")]
    InvalidPlaylistName(String),

    /// A track location could not be decoded into a filesystem path
    #[error("Invalid track location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    /// Directory creation, move, read or stat failure
    #[error("{context} ({path:?}): {source}")]
    Filesystem {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TidyError {
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        TidyError::Parse(message.into())
    }

    pub(crate) fn filesystem(
        context: &'static str,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        TidyError::Filesystem {
            context,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TidyError>;

/// Result of an operation that asks the user to pick a file or folder
///
/// Dismissing the picker is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Done(T),
    Canceled,
}

impl<T> Outcome<T> {
    pub fn is_canceled(&self) -> bool {
        matches!(self, Outcome::Canceled)
    }

    pub fn done(self) -> Option<T> {
        match self {
            Outcome::Done(value) => Some(value),
            Outcome::Canceled => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Done(value) => Outcome::Done(f(value)),
            Outcome::Canceled => Outcome::Canceled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filesystem_error_keeps_os_message() {
        let err = TidyError::filesystem(
            "Failed to create folder",
            "/music/KEEP",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        let message = err.to_string();
        assert!(message.contains("Failed to create folder"));
        assert!(message.contains("permission denied"));
    }

    #[test]
    fn test_outcome_map() {
        assert_eq!(Outcome::Done(2).map(|v| v * 2), Outcome::Done(4));
        assert!(Outcome::<i32>::Canceled.map(|v| v * 2).is_canceled());
    }
}
