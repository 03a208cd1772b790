use human_repr::HumanCount;

/// Running totals read from ffmpeg's `-progress` key/value stream.
#[derive(Debug, Default, PartialEq)]
pub struct EncodeProgress {
    pub frame: usize,
    pub fps: f64,
    pub total_size: u64,
    pub out_time_us: u64,
}

impl EncodeProgress {
    pub fn new() -> Self {
        EncodeProgress::default()
    }

    pub fn seconds(&self) -> usize {
        (self.out_time_us / 1_000_000) as usize
    }

    /// Progress bar suffix: frame count, encoding speed and bytes written so far.
    pub fn postfix(&self) -> String {
        format!("frame={} fps={:.1} size={}", self.frame, self.fps, self.total_size.human_count_bytes())
    }
}

#[derive(Debug, PartialEq)]
pub enum FFmpegStdoutResult {
    Continue,
    Render,
    End,
}

pub fn handle_ffmpeg_stdout_line(line: &str, progress: &mut EncodeProgress) -> FFmpegStdoutResult {
    match line.split_once('=') {
        Some((key, value)) => {
            let value = value.trim();
            match key.trim() {
                "fps" => progress.fps = value.parse().unwrap_or(progress.fps),
                "frame" => progress.frame = value.parse().unwrap_or(progress.frame),
                "total_size" => progress.total_size = value.parse().unwrap_or(progress.total_size),
                "out_time_us" => progress.out_time_us = value.parse().unwrap_or(progress.out_time_us),
                "progress" => {
                    return match value {
                        "end" => FFmpegStdoutResult::End,
                        _ => FFmpegStdoutResult::Render,
                    };
                },
                _ => (),
            }
            FFmpegStdoutResult::Continue
        },
        None => FFmpegStdoutResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_ffmpeg_stdout_line() {
        let mut progress = EncodeProgress::new();
        let lines = [
            "frame=240",
            "fps=23.97",
            "stream_0_0_q=28.0",
            "total_size=1048576",
            "out_time_us=10010000",
            "out_time=00:00:10.010000",
            "speed=1.2x",
        ];
        for line in lines {
            assert_eq!(handle_ffmpeg_stdout_line(line, &mut progress), FFmpegStdoutResult::Continue);
        }
        assert_eq!(handle_ffmpeg_stdout_line("progress=continue", &mut progress), FFmpegStdoutResult::Render);
        assert_eq!(handle_ffmpeg_stdout_line("progress=end", &mut progress), FFmpegStdoutResult::End);
        assert_eq!(progress.frame, 240);
        assert_eq!(progress.total_size, 1048576);
        assert_eq!(progress.seconds(), 10);
        assert!(progress.postfix().starts_with("frame=240 fps=24.0 size="));
    }

    #[test]
    fn test_ignores_garbage() {
        let mut progress = EncodeProgress::new();
        assert_eq!(handle_ffmpeg_stdout_line("garbage", &mut progress), FFmpegStdoutResult::Continue);
        assert_eq!(handle_ffmpeg_stdout_line("out_time_us=N/A", &mut progress), FFmpegStdoutResult::Continue);
        assert_eq!(progress, EncodeProgress::new());
    }
}
