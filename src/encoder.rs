use std::time::{Duration, Instant};

use crate::error::EncodeError;
use crate::job::ConversionJob;
use crate::tool::MediaTool;

/// Wall-clock bounds of one transcode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EncodeTiming {
    pub start: Instant,
    pub end: Instant,
}

impl EncodeTiming {
    pub fn elapsed(&self) -> Duration {
        self.end.saturating_duration_since(self.start)
    }
}

/// Run `job` through `tool`, timing the invocation. Failures are returned
/// unchanged so the caller can decide what they mean for the run.
pub fn encode(tool: &dyn MediaTool, job: &ConversionJob) -> Result<EncodeTiming, EncodeError> {
    let start = Instant::now();
    tool.transcode(job)?;
    let end = Instant::now();
    Ok(EncodeTiming { start, end })
}
