use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{error, info, trace, warn};

use crate::codecs::Codec;
use crate::outcome::RunStatistics;
use crate::size::{format_elapsed, format_size, size_report};

/// Something worth telling the user about while a run progresses.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    LookingAt(PathBuf),
    UnsupportedExtension(PathBuf),
    NoVideoStream(PathBuf),
    AlreadyTargetCodec(PathBuf, Codec),
    OutputCollision { input: PathBuf, output: PathBuf },
    WouldConvert { input: PathBuf, output: PathBuf },
    Converting { input: PathBuf, output: PathBuf, codec: Codec },
    ConversionFailed { input: PathBuf, message: String },
    LargerThanOriginal { input: PathBuf, original_size: u64, new_size: u64 },
    InputVanished { input: PathBuf, output: PathBuf },
    Converted { input: PathBuf, original_size: u64, new_size: u64, elapsed: Duration },
    /// Symlinks are never converted: removing one frees nothing.
    LinkSkipped(PathBuf),
    WalkError(String),
    Finished(RunStatistics),
}

pub trait Reporter {
    fn report(&self, event: Event);
}

/// Writes events through `tracing`.
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: Event) {
        match event {
            Event::LookingAt(path) => trace!("Looking at file: \"{}\"", file_name(&path)),
            Event::UnsupportedExtension(path) => warn!(
                "Skipping file \"{}\", it doesn't have a valid extension",
                file_name(&path)
            ),
            Event::NoVideoStream(path) => warn!("No video stream found in {}", path.display()),
            Event::AlreadyTargetCodec(path, codec) => warn!(
                %codec,
                "File \"{}\" already using H.265 codec, skipping conversion.",
                file_name(&path)
            ),
            Event::OutputCollision { input, output } => warn!(
                "Skipping file \"{}\", {} is already the conversion of another file",
                file_name(&input),
                output.display()
            ),
            Event::WouldConvert { input, output } => {
                info!("Would convert {} to {}", input.display(), output.display())
            },
            Event::Converting { input, output, codec } => info!(
                %codec,
                output = %output.display(),
                "Converting {} to mp4 with H.265 codec",
                input.display()
            ),
            Event::ConversionFailed { input, message } => error!(
                "Error occurred while converting {} to mp4: {}",
                input.display(),
                message
            ),
            Event::LargerThanOriginal { input, original_size, new_size } => warn!(
                path = %input.display(),
                original = %format_size(original_size),
                converted = %format_size(new_size),
                "The converted file is larger than the original file, keeping the original file, removing the converted file"
            ),
            Event::InputVanished { input, output } => warn!(
                "{} disappeared during conversion, leaving {} in place",
                input.display(),
                output.display()
            ),
            Event::Converted { input, original_size, new_size, elapsed } => {
                info!(path = %input.display(), "{}", size_report(original_size, new_size));
                info!("Time elapsed: {}", format_elapsed(elapsed));
            },
            Event::LinkSkipped(path) => warn!("Skipping symbolic link \"{}\"", path.display()),
            Event::WalkError(msg) => warn!("Unable to read directory entry: {}", msg),
            Event::Finished(stats) => info!(
                converted = stats.converted,
                discarded = stats.discarded,
                skipped = stats.skipped,
                simulated = stats.simulated,
                failed = stats.failed,
                "Total space saved: {}",
                format_size(stats.total_space_saved)
            ),
        }
    }
}

fn file_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}
