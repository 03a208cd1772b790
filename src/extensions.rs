use std::collections::BTreeSet;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::reporter::{Event, Reporter};

pub const DEFAULT_EXTENSIONS: [&str; 9] = ["mp4", "mkv", "avi", "mpg", "mpeg", "mov", "wmv", "flv", "webm"];

/// Lowercased file extensions, stored without the leading dot.
#[derive(Clone, Debug, PartialEq)]
pub struct Extensions(BTreeSet<String>);

impl Default for Extensions {
    fn default() -> Self {
        Extensions::new(DEFAULT_EXTENSIONS)
    }
}

impl Extensions {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Extensions(
            extensions
                .into_iter()
                .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        )
    }

    /// Parse a comma separated list such as `"mp4,.MKV, avi"`.
    pub fn parse(list: &str) -> Result<Self, ConfigError> {
        let extensions = Extensions::new(list.split(','));
        match extensions.0.is_empty() {
            true => Err(ConfigError::NoExtensions),
            false => Ok(extensions),
        }
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.0.contains(&extension.to_lowercase())
    }

    pub fn matches(&self, path: &Path) -> bool {
        match extension_of(path) {
            Some(ext) => self.contains(&ext),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Display for Extensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.iter().collect::<Vec<&str>>().join(","))
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Decide whether `path` should be converted. Rejections are reported as
/// a warning naming the file.
pub fn is_accepted(path: &Path, extensions: &Extensions, reporter: &dyn Reporter) -> bool {
    if extensions.matches(path) {
        true
    } else {
        reporter.report(Event::UnsupportedExtension(PathBuf::from(path)));
        false
    }
}
