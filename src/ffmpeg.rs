use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{ChildStderr, ChildStdout, Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use human_repr::HumanCount;
use kdam::{term, tqdm, BarExt};
use tracing::debug;

use crate::error::{EncodeError, ProbeError};
use crate::job::ConversionJob;
use crate::probe::{parse_ffprobe_json, MediaProbe};
use crate::tool::MediaTool;

pub mod progress;

use progress::{handle_ffmpeg_stdout_line, EncodeProgress, FFmpegStdoutResult};

const STDERR_TAIL_LINES: usize = 5;

/// `MediaTool` backed by the `ffprobe` and `ffmpeg` executables.
pub struct FFmpeg {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
    stop: Option<Arc<AtomicBool>>,
}

impl FFmpeg {
    pub fn new() -> Self {
        FFmpeg::with_binaries(Path::new("ffmpeg"), Path::new("ffprobe"))
    }

    pub fn with_binaries(ffmpeg: &Path, ffprobe: &Path) -> Self {
        FFmpeg {
            ffmpeg: PathBuf::from(ffmpeg),
            ffprobe: PathBuf::from(ffprobe),
            stop: None,
        }
    }

    /// Kill a running encode once `stop` becomes true.
    pub fn stop_on(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn is_installed(&self) -> bool {
        [&self.ffmpeg, &self.ffprobe].iter().all(|program| {
            match Command::new(program).arg("-version").stdout(Stdio::null()).stderr(Stdio::null()).status() {
                Ok(status) => status.success(),
                Err(_) => false,
            }
        })
    }

    fn should_stop(&self) -> bool {
        match &self.stop {
            None => false,
            Some(s) => s.load(Ordering::Relaxed),
        }
    }

    /// Follow the progress stream until ffmpeg closes it. Returns true if
    /// the encode should be abandoned.
    fn consume_stdout(&self, stdout: ChildStdout, job: &ConversionJob, duration: Option<f64>) -> bool {
        let mut progress = EncodeProgress::new();
        let mut pbar = match job.quiet {
            true => None,
            false => {
                term::init(false);
                let input_size = fs::metadata(&job.input).map(|m| m.len()).unwrap_or(0);
                Some(tqdm!(
                    total = duration.map(|d| d.ceil() as usize).unwrap_or(0),
                    desc = format!("encoding {}", input_size.human_count_bytes()),
                    position = 0,
                    force_refresh = true
                ))
            },
        };

        for line in BufReader::new(stdout).lines() {
            if let Ok(l) = line {
                if let FFmpegStdoutResult::Render | FFmpegStdoutResult::End = handle_ffmpeg_stdout_line(&l, &mut progress) {
                    if let Some(pbar) = pbar.as_mut() {
                        pbar.set_postfix(progress.postfix());
                        let _ = pbar.update_to(progress.seconds());
                    }
                }
            }

            if self.should_stop() {
                return true;
            }
        }

        if pbar.is_some() {
            eprintln!();
        }
        false
    }
}

impl Default for FFmpeg {
    fn default() -> Self {
        FFmpeg::new()
    }
}

impl MediaTool for FFmpeg {
    fn probe(&self, path: &Path) -> Result<MediaProbe, ProbeError> {
        let output = Command::new(&self.ffprobe)
            .args(probe_args(path))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ProbeError::Spawn {
                path: PathBuf::from(path),
                source,
            })?;
        if output.status.success() {
            parse_ffprobe_json(path, &String::from_utf8_lossy(&output.stdout))
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(ProbeError::for_file(path, &failure_message("ffprobe", output.status.code(), &stderr)))
        }
    }

    fn transcode(&self, job: &ConversionJob) -> Result<(), EncodeError> {
        let duration = self.probe(&job.input).ok().and_then(|p| p.duration);
        let args = build_args(job);
        debug!("{:?} {}", self.ffmpeg, args.iter().map(|s| format!("{:?}", s)).collect::<Vec<String>>().join(" "));

        let mut child = Command::new(&self.ffmpeg)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| EncodeError::Spawn {
                path: job.input.clone(),
                source,
            })?;

        let stderr = child.stderr.take();
        let echo = !job.quiet;
        let stderr_reader = thread::spawn(move || read_stderr_to_end(stderr, echo));

        let mut interrupted = match child.stdout.take() {
            Some(stdout) => self.consume_stdout(stdout, job, duration),
            None => false,
        };
        if interrupted {
            let _ = child.kill();
        }

        let status = child.wait().map_err(|source| EncodeError::Spawn {
            path: job.input.clone(),
            source,
        })?;
        let diagnostic = stderr_reader.join().ok().flatten().unwrap_or_default();
        interrupted |= self.should_stop();

        if interrupted {
            let _ = fs::remove_file(&job.output);
            Err(EncodeError::interrupted(&job.input))
        } else if status.success() {
            Ok(())
        } else {
            let _ = fs::remove_file(&job.output);
            Err(EncodeError::for_file(&job.input, &failure_message("ffmpeg", status.code(), &diagnostic)))
        }
    }
}

fn pbs(s: &str) -> PathBuf {
    PathBuf::from(s)
}

fn probe_args(path: &Path) -> Vec<PathBuf> {
    vec![
        pbs("-v"), pbs("error"),
        pbs("-of"), pbs("json"),
        pbs("-show_streams"),
        pbs("-show_format"),
        PathBuf::from(path),
    ]
}

pub fn build_args(job: &ConversionJob) -> Vec<PathBuf> {
    let mut args = vec![
        pbs("-hide_banner"),
        pbs("-nostdin"),
        pbs("-nostats"),
        pbs("-loglevel"), pbs(if job.quiet { "error" } else { "warning" }),
        pbs("-progress"), pbs("pipe:1"),
    ];
    if job.overwrite {
        args.push(pbs("-y"));
    }
    args.push(pbs("-i"));
    args.push(job.input.clone());

    args.push(pbs("-c:v")); args.push(pbs(job.video_encoder));
    args.push(pbs("-crf")); args.push(PathBuf::from(job.crf.to_string()));
    args.push(pbs("-c:a")); args.push(pbs(job.audio_encoder));
    args.push(pbs("-strict")); args.push(pbs("experimental"));

    args.push(job.output.clone());
    args
}

/// Collect ffmpeg's stderr, echoing it when `echo` is set. Bytes that are
/// not UTF-8 (file names, mostly) are replaced rather than ending the read.
fn read_stderr_to_end(stderr: Option<ChildStderr>, echo: bool) -> Option<String> {
    let mut reader = BufReader::new(stderr?);
    let mut buf = String::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&line);
                if echo {
                    eprint!("{}", text);
                }
                buf.push_str(&text);
            },
        }
    }
    Some(buf)
}

/// The last few lines of a tool's stderr, or its exit status when it printed nothing.
fn failure_message(program: &str, code: Option<i32>, stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let status = match code {
        Some(code) => format!("{} exited with {}", program, code),
        None => format!("{} did not exit successfully.", program),
    };
    match lines.len() {
        0 => status,
        n => format!("{}: {}", status, lines[n.saturating_sub(STDERR_TAIL_LINES)..].join("\n")),
    }
}
