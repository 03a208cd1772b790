use std::fmt::Display;

/// Video codec as named by ffprobe's `codec_name`.
#[derive(Clone, Debug, PartialEq)]
pub enum Codec {
    Unknown(String),
    AV1,
    HEVC,
    H264,
}

impl Codec {
    /// The codec every conversion produces.
    pub const TARGET: Codec = Codec::HEVC;

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "av1" => Codec::AV1,
            "hevc" => Codec::HEVC,
            "h264" => Codec::H264,
            _ => Codec::Unknown(String::from(s)),
        }
    }

    /// The ffmpeg encoder that produces `TARGET`.
    pub const TARGET_ENCODER: &'static str = "libx265";

    pub fn is_target(&self) -> bool {
        *self == Codec::TARGET
    }
}

impl Default for Codec {
    fn default() -> Self {
        Codec::Unknown(String::new())
    }
}

impl Display for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Codec::Unknown(codec) => write!(f, "{}", codec.to_lowercase()),
            _ => write!(f, "{}", format!("{:?}", self).to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Codec::AV1), "av1");
        assert_eq!(format!("{}", Codec::HEVC), "hevc");
        assert_eq!(format!("{}", Codec::H264), "h264");
        assert_eq!(format!("{}", Codec::from_str("MPEG4")), "mpeg4");
    }

    #[test]
    fn test_target() {
        assert!(Codec::from_str("hevc").is_target());
        assert!(Codec::from_str("HEVC").is_target());
        assert!(!Codec::from_str("h264").is_target());
        assert_eq!(Codec::TARGET_ENCODER, "libx265");
    }
}
