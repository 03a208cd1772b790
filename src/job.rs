use std::path::{Path, PathBuf};

use crate::codecs::Codec;
use crate::config::CompressorOptions;

pub const OUTPUT_SUFFIX: &str = "_H265.mp4";
pub const AUDIO_ENCODER: &str = "aac";

/// Everything the external tool needs to convert one file.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub video_encoder: &'static str,
    pub audio_encoder: &'static str,
    pub crf: u8,
    pub quiet: bool,
    pub dry_run: bool,
    pub overwrite: bool,
}

impl ConversionJob {
    pub fn new(input: &Path, options: &CompressorOptions) -> Self {
        ConversionJob {
            input: PathBuf::from(input),
            output: generate_output_filename(input),
            video_encoder: Codec::TARGET_ENCODER,
            audio_encoder: AUDIO_ENCODER,
            crf: options.crf,
            quiet: options.quiet,
            dry_run: options.dry_run,
            overwrite: true,
        }
    }
}

/// `dir/name.ext` becomes `dir/name_H265.mp4`.
pub fn generate_output_filename(path: &Path) -> PathBuf {
    match path.file_stem() {
        Some(file_stem) => {
            let mut name = file_stem.to_os_string();
            name.push(OUTPUT_SUFFIX);
            path.with_file_name(name)
        },
        None => path.to_path_buf(),
    }
}
