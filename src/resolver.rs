use std::fs;
use std::path::{Path, PathBuf};

use crate::encoder::EncodeTiming;
use crate::error::CompressorError;
use crate::outcome::{ConversionOutcome, SkipReason};
use crate::reporter::{Event, Reporter};

#[cfg(unix)]
const OUTPUT_MODE: u32 = 0o755;

/// Keep whichever of `input` and `output` is smaller and delete the other.
/// Savings are only reported when the converted file is kept.
pub fn resolve(
    input: &Path,
    original_size: u64,
    output: &Path,
    timing: &EncodeTiming,
    reporter: &dyn Reporter,
) -> Result<ConversionOutcome, CompressorError> {
    if !input.is_file() {
        reporter.report(Event::InputVanished {
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        });
        return Ok(ConversionOutcome::Skipped(SkipReason::InputVanished));
    }

    let new_size = file_size(output)?;
    if new_size > original_size {
        fs::remove_file(output).map_err(|e| CompressorError::io(output, e))?;
        reporter.report(Event::LargerThanOriginal {
            input: PathBuf::from(input),
            original_size,
            new_size,
        });
        return Ok(ConversionOutcome::Discarded);
    }

    fs::remove_file(input).map_err(|e| CompressorError::io(input, e))?;
    set_output_permissions(output)?;
    reporter.report(Event::Converted {
        input: PathBuf::from(input),
        original_size,
        new_size,
        elapsed: timing.elapsed(),
    });
    Ok(ConversionOutcome::Converted {
        space_saved: original_size - new_size,
    })
}

fn file_size(path: &Path) -> Result<u64, CompressorError> {
    fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| CompressorError::io(path, e))
}

#[cfg(unix)]
fn set_output_permissions(path: &Path) -> Result<(), CompressorError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(OUTPUT_MODE)).map_err(|e| CompressorError::io(path, e))
}

#[cfg(not(unix))]
fn set_output_permissions(_path: &Path) -> Result<(), CompressorError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{file_size as size_on_disk, write_file, RecordingReporter};
    use std::time::{Duration, Instant};

    fn ten_seconds() -> EncodeTiming {
        let start = Instant::now();
        EncodeTiming { start, end: start + Duration::from_secs(10) }
    }

    #[test]
    fn test_keeps_smaller_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(&dir.path().join("input.mp4"), 976556);
        let output = write_file(&dir.path().join("output.mp4"), 488556);
        let reporter = RecordingReporter::new();

        let outcome = resolve(&input, 1000000, &output, &ten_seconds(), &reporter).unwrap();

        assert_eq!(outcome, ConversionOutcome::Converted { space_saved: 511444 });
        assert!(!input.exists());
        assert_eq!(size_on_disk(&output), 488556);
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            assert_eq!(fs::metadata(&output).unwrap().permissions().mode() & 0o777, 0o755);
        }
        assert_eq!(
            reporter.events(),
            vec![Event::Converted {
                input: input.clone(),
                original_size: 1000000,
                new_size: 488556,
                elapsed: Duration::from_secs(10),
            }]
        );
    }

    #[test]
    fn test_equal_size_keeps_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(&dir.path().join("a.avi"), 4096);
        let output = write_file(&dir.path().join("a_H265.mp4"), 4096);
        let reporter = RecordingReporter::new();

        let outcome = resolve(&input, 4096, &output, &ten_seconds(), &reporter).unwrap();

        assert_eq!(outcome, ConversionOutcome::Converted { space_saved: 0 });
        assert!(!input.exists());
        assert!(output.exists());
    }

    #[test]
    fn test_discards_larger_conversion() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(&dir.path().join("a.avi"), 1000);
        let output = write_file(&dir.path().join("a_H265.mp4"), 1001);
        let reporter = RecordingReporter::new();

        let outcome = resolve(&input, 1000, &output, &ten_seconds(), &reporter).unwrap();

        assert_eq!(outcome, ConversionOutcome::Discarded);
        assert_eq!(outcome.space_saved(), 0);
        assert!(!output.exists());
        assert_eq!(size_on_disk(&input), 1000);
        assert_eq!(
            reporter.events(),
            vec![Event::LargerThanOriginal {
                input: input.clone(),
                original_size: 1000,
                new_size: 1001,
            }]
        );
    }

    #[test]
    fn test_vanished_input_keeps_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("gone.mkv");
        let output = write_file(&dir.path().join("gone_H265.mp4"), 10);
        let reporter = RecordingReporter::new();

        let outcome = resolve(&input, 100, &output, &ten_seconds(), &reporter).unwrap();

        assert_eq!(outcome, ConversionOutcome::Skipped(SkipReason::InputVanished));
        assert!(output.exists());
        assert_eq!(reporter.events().len(), 1);
    }

    #[test]
    fn test_missing_output_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_file(&dir.path().join("a.mkv"), 100);
        let output = dir.path().join("a_H265.mp4");
        let reporter = RecordingReporter::new();

        let err = resolve(&input, 100, &output, &ten_seconds(), &reporter).unwrap_err();

        assert!(matches!(err, CompressorError::Io { .. }));
        assert!(input.exists());
    }
}
