//! Test doubles for the external tool and the reporter.

use std::cell::{Cell, RefCell};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::error::{EncodeError, ProbeError};
use crate::job::ConversionJob;
use crate::probe::{MediaProbe, StreamInfo};
use crate::reporter::{Event, Reporter};
use crate::tool::MediaTool;

pub struct RecordingReporter {
    events: RefCell<Vec<Event>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        RecordingReporter { events: RefCell::new(vec![]) }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

/// Scripted stand-in for ffprobe/ffmpeg.
pub struct FakeTool {
    codec: Option<String>,
    probe_fails: bool,
    transcode_error: Option<String>,
    output_size: u64,
    remove_input: bool,
    pub probes: Cell<usize>,
    pub transcodes: RefCell<Vec<ConversionJob>>,
}

impl FakeTool {
    pub fn new() -> Self {
        FakeTool {
            codec: Some(String::from("h264")),
            probe_fails: false,
            transcode_error: None,
            output_size: 0,
            remove_input: false,
            probes: Cell::new(0),
            transcodes: RefCell::new(vec![]),
        }
    }

    pub fn with_codec(mut self, codec: &str) -> Self {
        self.codec = Some(String::from(codec));
        self
    }

    pub fn without_video(mut self) -> Self {
        self.codec = None;
        self
    }

    pub fn failing_probe(mut self) -> Self {
        self.probe_fails = true;
        self
    }

    pub fn failing_transcode(mut self, msg: &str) -> Self {
        self.transcode_error = Some(String::from(msg));
        self
    }

    /// Size in bytes of every file the fake "encodes".
    pub fn output_size(mut self, size: u64) -> Self {
        self.output_size = size;
        self
    }

    /// Delete the input while "encoding" it.
    pub fn removing_input(mut self) -> Self {
        self.remove_input = true;
        self
    }

    pub fn transcode_count(&self) -> usize {
        self.transcodes.borrow().len()
    }
}

impl MediaTool for FakeTool {
    fn probe(&self, path: &Path) -> Result<MediaProbe, ProbeError> {
        self.probes.set(self.probes.get() + 1);
        if self.probe_fails {
            return Err(ProbeError::for_file(path, "ffprobe did not exit successfully."));
        }
        let mut streams = vec![StreamInfo {
            codec_type: String::from("audio"),
            codec_name: String::from("aac"),
        }];
        if let Some(codec) = &self.codec {
            streams.push(StreamInfo {
                codec_type: String::from("video"),
                codec_name: codec.clone(),
            });
        }
        Ok(MediaProbe { streams, duration: Some(60.0) })
    }

    fn transcode(&self, job: &ConversionJob) -> Result<(), EncodeError> {
        self.transcodes.borrow_mut().push(job.clone());
        if let Some(msg) = &self.transcode_error {
            return Err(EncodeError::for_file(&job.input, msg));
        }
        write_file(&job.output, self.output_size);
        if self.remove_input {
            let _ = fs::remove_file(&job.input);
        }
        Ok(())
    }
}

/// Create a sparse file of exactly `size` bytes.
pub fn write_file(path: &Path, size: u64) -> PathBuf {
    let file = File::create(path).unwrap();
    file.set_len(size).unwrap();
    PathBuf::from(path)
}

pub fn file_size(path: &Path) -> u64 {
    fs::metadata(path).unwrap().len()
}
