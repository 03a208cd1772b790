use std::path::Path;

use crate::error::{EncodeError, ProbeError};
use crate::job::ConversionJob;
use crate::probe::MediaProbe;

/// The external probing and transcoding facility.
pub trait MediaTool {
    fn probe(&self, path: &Path) -> Result<MediaProbe, ProbeError>;

    /// Write `job.output` from `job.input`. Must leave `job.input` untouched.
    fn transcode(&self, job: &ConversionJob) -> Result<(), EncodeError>;
}
