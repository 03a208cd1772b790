use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codecs::Codec;
use crate::error::ProbeError;
use crate::reporter::{Event, Reporter};
use crate::tool::MediaTool;

#[derive(Clone, Debug, PartialEq)]
pub struct StreamInfo {
    pub codec_type: String,
    pub codec_name: String,
}

impl StreamInfo {
    pub fn is_video(&self) -> bool {
        self.codec_type == "video"
    }

    pub fn codec(&self) -> Codec {
        Codec::from_str(&self.codec_name)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MediaProbe {
    pub streams: Vec<StreamInfo>,
    /// Container duration in seconds.
    pub duration: Option<f64>,
}

impl MediaProbe {
    pub fn video_stream(&self) -> Option<&StreamInfo> {
        self.streams.iter().find(|s| s.is_video())
    }
}

#[derive(Serialize, Deserialize, Debug)]
struct FFProbeJsonOutput {
    #[serde(default)]
    pub streams: Vec<FFProbeJsonStream>,
    pub format: Option<FFProbeJsonFormat>,
}

#[derive(Serialize, Deserialize, Debug)]
struct FFProbeJsonStream {
    pub codec_type: Option<String>,
    pub codec_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
struct FFProbeJsonFormat {
    pub duration: Option<String>,
}

/// Parse the output of `ffprobe -of json -show_streams -show_format`.
pub fn parse_ffprobe_json(path: &Path, json: &str) -> Result<MediaProbe, ProbeError> {
    let deserialized = serde_json::from_str::<FFProbeJsonOutput>(json).map_err(|source| ProbeError::Parse {
        path: PathBuf::from(path),
        source,
    })?;
    Ok(MediaProbe {
        streams: deserialized
            .streams
            .into_iter()
            .map(|s| StreamInfo {
                codec_type: s.codec_type.unwrap_or_default(),
                codec_name: s.codec_name.unwrap_or_default(),
            })
            .collect(),
        duration: deserialized
            .format
            .and_then(|f| f.duration)
            .and_then(|d| d.parse().ok()),
    })
}

#[derive(Clone, Debug, PartialEq)]
pub enum Inspection {
    NoVideoStream,
    AlreadyTargetCodec(Codec),
    Eligible(Codec),
}

/// Look at the first video stream of `path` and decide whether it needs converting.
pub fn inspect(tool: &dyn MediaTool, path: &Path, reporter: &dyn Reporter) -> Result<Inspection, ProbeError> {
    let probe = tool.probe(path)?;
    match probe.video_stream() {
        None => {
            reporter.report(Event::NoVideoStream(PathBuf::from(path)));
            Ok(Inspection::NoVideoStream)
        },
        Some(stream) => match stream.codec() {
            codec if codec.is_target() => {
                reporter.report(Event::AlreadyTargetCodec(PathBuf::from(path), codec.clone()));
                Ok(Inspection::AlreadyTargetCodec(codec))
            },
            codec => Ok(Inspection::Eligible(codec)),
        },
    }
}
