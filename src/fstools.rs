use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

#[derive(Debug, PartialEq)]
pub enum DirEntryCategory {
    DoesNotExist,
    RegularFile,
    SymbolicLink,
    Directory,
    Unknown,
}

pub fn classify_file(path: &Path) -> DirEntryCategory {
    match fs::symlink_metadata(path) {
        Ok(metadata) => {
            if metadata.is_symlink() {
                DirEntryCategory::SymbolicLink
            } else if metadata.is_file() {
                DirEntryCategory::RegularFile
            } else if metadata.is_dir() {
                DirEntryCategory::Directory
            } else {
                DirEntryCategory::Unknown
            }
        },
        Err(_) => DirEntryCategory::DoesNotExist,
    }
}

/// The run root must be a directory; a symlink is accepted when it points at one.
pub fn require_directory(path: &Path) -> Result<PathBuf, ConfigError> {
    match classify_file(path) {
        DirEntryCategory::Directory => Ok(PathBuf::from(path)),
        DirEntryCategory::SymbolicLink if path.is_dir() => Ok(PathBuf::from(path)),
        _ => Err(ConfigError::NotADirectory(PathBuf::from(path))),
    }
}
