use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::reporter::{Event, Reporter};

pub struct FileScanner {
    root: PathBuf,
}

impl FileScanner {
    pub fn new(root: &Path) -> Self {
        FileScanner { root: PathBuf::from(root) }
    }

    /// Every regular file below the root, collected up front so files
    /// written during the run are never picked up. Symlinks are reported
    /// and left out.
    pub fn scan(&self, reporter: &dyn Reporter) -> Vec<PathBuf> {
        let mut files = vec![];
        for entry in WalkDir::new(&self.root).follow_links(false).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(entry) if entry.file_type().is_symlink() => reporter.report(Event::LinkSkipped(entry.into_path())),
                Ok(_) => (),
                Err(err) => reporter.report(Event::WalkError(err.to_string())),
            }
        }
        files
    }
}
