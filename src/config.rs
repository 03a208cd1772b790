use std::fmt::Display;
use std::str::FromStr;

use tracing::level_filters::LevelFilter;

use crate::error::ConfigError;
use crate::extensions::Extensions;

pub const DEFAULT_CRF: u8 = 23;
pub const MAX_CRF: i64 = 51;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            _ => Err(ConfigError::InvalidLogLevel(String::from(s))),
        }
    }
}

impl LogLevel {
    /// tracing has no level above ERROR, so CRITICAL shares it.
    pub fn filter(&self) -> LevelFilter {
        match self {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_uppercase())
    }
}

/// What the run does when probing, encoding or file handling fails for a file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ErrorPolicy {
    #[default]
    Halt,
    Continue,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompressorOptions {
    pub dry_run: bool,
    pub quiet: bool,
    pub crf: u8,
    pub extensions: Extensions,
    pub error_policy: ErrorPolicy,
}

impl Default for CompressorOptions {
    fn default() -> Self {
        CompressorOptions {
            dry_run: false,
            quiet: false,
            crf: DEFAULT_CRF,
            extensions: Extensions::default(),
            error_policy: ErrorPolicy::Halt,
        }
    }
}

impl CompressorOptions {
    /// Validate raw command line values.
    pub fn from_args(
        format: Option<&str>,
        crf: i64,
        dry_run: bool,
        quiet: bool,
        keep_going: bool,
    ) -> Result<Self, ConfigError> {
        Ok(CompressorOptions {
            dry_run,
            quiet,
            crf: parse_crf(crf)?,
            extensions: match format {
                Some(list) => Extensions::parse(list)?,
                None => Extensions::default(),
            },
            error_policy: if keep_going { ErrorPolicy::Continue } else { ErrorPolicy::Halt },
        })
    }
}

pub fn parse_crf(crf: i64) -> Result<u8, ConfigError> {
    match crf {
        0..=MAX_CRF => Ok(crf as u8),
        _ => Err(ConfigError::InvalidCrf(crf)),
    }
}
