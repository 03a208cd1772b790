use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Unable to run ffprobe on {path:?}: {source}")]
    Spawn { path: PathBuf, source: io::Error },

    #[error("Error probing {path:?}: {msg}")]
    Failed { path: PathBuf, msg: String },

    #[error("Error parsing probe output for {path:?}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

impl ProbeError {
    pub fn for_file(path: &Path, msg: &str) -> Self {
        ProbeError::Failed {
            path: PathBuf::from(path),
            msg: String::from(msg),
        }
    }
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("Unable to run ffmpeg for {path:?}: {source}")]
    Spawn { path: PathBuf, source: io::Error },

    #[error("Error compressing {path:?}: {msg}")]
    Failed { path: PathBuf, msg: String },

    #[error("Compression of {path:?} was interrupted")]
    Interrupted { path: PathBuf },
}

impl EncodeError {
    pub fn for_file(path: &Path, msg: &str) -> Self {
        EncodeError::Failed {
            path: PathBuf::from(path),
            msg: String::from(msg),
        }
    }

    pub fn interrupted(path: &Path) -> Self {
        EncodeError::Interrupted { path: PathBuf::from(path) }
    }
}

#[derive(Debug, Error)]
pub enum CompressorError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("I/O error on {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("Run interrupted")]
    Interrupted,
}

impl CompressorError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        CompressorError::Io {
            path: PathBuf::from(path),
            source,
        }
    }

    pub fn is_interrupt(&self) -> bool {
        matches!(
            self,
            CompressorError::Interrupted | CompressorError::Encode(EncodeError::Interrupted { .. })
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Invalid crf {0}, expected a value between 0 and 51")]
    InvalidCrf(i64),

    #[error("No file extensions given")]
    NoExtensions,

    #[error("{0:?} is not a directory")]
    NotADirectory(PathBuf),
}
