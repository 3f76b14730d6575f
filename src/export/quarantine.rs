//! Non-destructive triage of files into sibling KEEP/DELETE folders

use crate::error::{Result, TidyError};
use std::fs;
use std::path::{Path, PathBuf};

/// Move `path` into a sibling folder named `subfolder`, creating it if needed
///
/// Only one directory level is created. A non-directory already occupying
/// the folder name is an error, and so is a file of the same name already
/// inside the folder; nothing is overwritten. If the move fails, the created
/// folder stays and the file is left where it was.
///
/// Returns the new location of the file.
pub fn move_to_subfolder(path: &Path, subfolder: &str) -> Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        TidyError::filesystem(
            "Not a file path",
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let target_dir = parent.join(subfolder);

    match fs::metadata(&target_dir) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(TidyError::filesystem(
                "Quarantine target exists but is not a folder",
                &target_dir,
                std::io::Error::new(std::io::ErrorKind::AlreadyExists, "not a directory"),
            ));
        }
        Err(_) => {
            fs::create_dir(&target_dir)
                .map_err(|e| TidyError::filesystem("Failed to create folder", &target_dir, e))?;
            log::debug!("Created {:?}", target_dir);
        }
    }

    let destination = target_dir.join(file_name);
    let occupied = destination
        .try_exists()
        .map_err(|e| TidyError::filesystem("Failed to check destination", &destination, e))?;
    if occupied {
        return Err(TidyError::filesystem(
            "A file with this name is already in the folder",
            &destination,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "destination exists"),
        ));
    }

    fs::rename(path, &destination)
        .map_err(|e| TidyError::filesystem("Failed to move file", path, e))?;

    log::info!("Moved {:?} to {:?}", path, destination);
    Ok(destination)
}
