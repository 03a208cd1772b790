use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::{CompressorOptions, ErrorPolicy};
use crate::encoder::encode;
use crate::error::CompressorError;
use crate::extensions::is_accepted;
use crate::filescanner::FileScanner;
use crate::job::ConversionJob;
use crate::outcome::{ConversionOutcome, RunStatistics, SkipReason};
use crate::probe::{inspect, Inspection};
use crate::reporter::{Event, Reporter};
use crate::resolver::resolve;
use crate::tool::MediaTool;

/// Walks a directory tree and converts every eligible video in it, one
/// file at a time.
pub struct Compressor<'a> {
    options: CompressorOptions,
    tool: &'a dyn MediaTool,
    reporter: &'a dyn Reporter,
    stop: Option<Arc<AtomicBool>>,
}

impl<'a> Compressor<'a> {
    pub fn new(options: CompressorOptions, tool: &'a dyn MediaTool, reporter: &'a dyn Reporter) -> Self {
        Compressor {
            options,
            tool,
            reporter,
            stop: None,
        }
    }

    pub fn stop_on(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    fn should_stop(&self) -> bool {
        match &self.stop {
            None => false,
            Some(s) => s.load(Ordering::Relaxed),
        }
    }

    /// Process every file under `root` and report the total space saved.
    ///
    /// A failing file either ends the run or is counted and skipped,
    /// according to `options.error_policy`. Interrupts always end the run.
    pub fn run(&self, root: &Path) -> Result<RunStatistics, CompressorError> {
        let mut stats = RunStatistics::new();
        let files = FileScanner::new(root).scan(self.reporter);
        let mut claimed: HashSet<PathBuf> = files.iter().cloned().collect();
        for path in files {
            if self.should_stop() {
                return Err(CompressorError::Interrupted);
            }

            match self.compress_file(&path, &mut claimed) {
                Ok(outcome) => stats.record(&outcome),
                Err(err) => {
                    self.reporter.report(Event::ConversionFailed {
                        input: path.clone(),
                        message: err.to_string(),
                    });
                    if err.is_interrupt() || self.options.error_policy == ErrorPolicy::Halt {
                        return Err(err);
                    }
                    stats.record_failure();
                },
            }
        }

        self.reporter.report(Event::Finished(stats.clone()));
        Ok(stats)
    }

    /// `claimed` holds every file found by the walk plus the outputs earlier
    /// files of this run have written or would write. A job whose output is
    /// already claimed is skipped instead of overwriting that file.
    fn compress_file(&self, input: &Path, claimed: &mut HashSet<PathBuf>) -> Result<ConversionOutcome, CompressorError> {
        self.reporter.report(Event::LookingAt(PathBuf::from(input)));
        if !is_accepted(input, &self.options.extensions, self.reporter) {
            return Ok(ConversionOutcome::Skipped(SkipReason::UnsupportedExtension));
        }

        let job = ConversionJob::new(input, &self.options);
        if claimed.contains(&job.output) {
            self.reporter.report(Event::OutputCollision {
                input: job.input.clone(),
                output: job.output.clone(),
            });
            return Ok(ConversionOutcome::Skipped(SkipReason::OutputCollision));
        }

        if job.dry_run {
            claimed.insert(job.output.clone());
            self.reporter.report(Event::WouldConvert {
                input: job.input.clone(),
                output: job.output.clone(),
            });
            return Ok(ConversionOutcome::DryRunSimulated);
        }

        let original_size = fs::metadata(input)
            .map(|m| m.len())
            .map_err(|e| CompressorError::io(input, e))?;

        let codec = match inspect(self.tool, input, self.reporter)? {
            Inspection::NoVideoStream => return Ok(ConversionOutcome::Skipped(SkipReason::NoVideoStream)),
            Inspection::AlreadyTargetCodec(codec) => {
                return Ok(ConversionOutcome::Skipped(SkipReason::AlreadyTargetCodec(codec)));
            },
            Inspection::Eligible(codec) => codec,
        };

        claimed.insert(job.output.clone());
        self.reporter.report(Event::Converting {
            input: job.input.clone(),
            output: job.output.clone(),
            codec,
        });
        let timing = encode(self.tool, &job)?;
        resolve(&job.input, original_size, &job.output, &timing, self.reporter)
    }
}
