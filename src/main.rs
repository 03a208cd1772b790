use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use rustop::opts;
use signal_hook::consts::{SIGINT, SIGTERM};
use tracing::{debug, error, info, warn};

use space_saver::compressor::Compressor;
use space_saver::config::{CompressorOptions, LogLevel};
use space_saver::ffmpeg::FFmpeg;
use space_saver::fstools::require_directory;
use space_saver::logging::init_logger;
use space_saver::reporter::TracingReporter;

fn main() -> ExitCode {
    let (args, _rest) = opts! {
        synopsis "Convert video files under a directory to .mp4 with H.265 codec, keeping whichever copy is smaller.";
        opt format:Option<String>, desc:"Comma-separated file extensions to convert. [mp4,mkv,avi,mpg,mpeg,mov,wmv,flv,webm]";
        opt crf:i64=23, desc:"Constant Rate Factor for the encoder (0-51, lower is better quality).";
        opt dry_run:bool=false, desc:"Describe what would be done, but don't actually do anything.";
        opt quiet:bool=false, desc:"Keep the ffmpeg output to a minimum while converting.";
        opt keep_going:bool=false, desc:"Continue with the next file when a file fails to probe or convert.";
        opt log_level:String=String::from("INFO"), desc:"Log level. [DEBUG, INFO, WARNING, ERROR, CRITICAL]";
        param path:String, desc:"Directory containing the files to convert";
    }.parse_or_exit();

    let log_level = match args.log_level.parse::<LogLevel>() {
        Ok(level) => level,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        },
    };
    init_logger(log_level);

    let options = match CompressorOptions::from_args(args.format.as_deref(), args.crf, args.dry_run, args.quiet, args.keep_going) {
        Ok(options) => options,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        },
    };
    debug!(
        extensions = %options.extensions,
        crf = options.crf,
        dry_run = options.dry_run,
        error_policy = ?options.error_policy,
        "Options"
    );
    let root = match require_directory(Path::new(&args.path)) {
        Ok(root) => root,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        },
    };

    let stop = Arc::new(AtomicBool::new(false));
    for signal in [SIGINT, SIGTERM] {
        if let Err(err) = signal_hook::flag::register(signal, Arc::clone(&stop)) {
            warn!("Unable to register handler for signal {}: {}", signal, err);
        }
    }

    let ffmpeg = FFmpeg::new().stop_on(Arc::clone(&stop));
    if !options.dry_run && !ffmpeg.is_installed() {
        error!("ffmpeg is not installed.");
        return ExitCode::FAILURE;
    }

    let reporter = TracingReporter;
    match Compressor::new(options, &ffmpeg, &reporter).stop_on(stop).run(&root) {
        Ok(_) => {
            info!("Done.");
            ExitCode::SUCCESS
        },
        Err(err) => {
            error!("Stopping: {}", err);
            ExitCode::FAILURE
        },
    }
}
