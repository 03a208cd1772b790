use crate::codecs::Codec;

#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    UnsupportedExtension,
    NoVideoStream,
    AlreadyTargetCodec(Codec),
    /// The input disappeared while it was being encoded.
    InputVanished,
    /// Another input of the same run already converts to this output path.
    OutputCollision,
}

/// Terminal state of one discovered file.
#[derive(Clone, Debug, PartialEq)]
pub enum ConversionOutcome {
    Skipped(SkipReason),
    DryRunSimulated,
    Converted { space_saved: u64 },
    /// The converted file was larger than the original and was removed.
    Discarded,
}

impl ConversionOutcome {
    pub fn space_saved(&self) -> u64 {
        match self {
            ConversionOutcome::Converted { space_saved } => *space_saved,
            _ => 0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunStatistics {
    pub total_space_saved: u64,
    pub files_seen: usize,
    pub converted: usize,
    pub discarded: usize,
    pub skipped: usize,
    pub simulated: usize,
    pub failed: usize,
}

impl RunStatistics {
    pub fn new() -> Self {
        RunStatistics::default()
    }

    pub fn record(&mut self, outcome: &ConversionOutcome) {
        self.files_seen += 1;
        match outcome {
            ConversionOutcome::Skipped(_) => self.skipped += 1,
            ConversionOutcome::DryRunSimulated => self.simulated += 1,
            ConversionOutcome::Converted { .. } => self.converted += 1,
            ConversionOutcome::Discarded => self.discarded += 1,
        }
        self.total_space_saved = self.total_space_saved.saturating_add(outcome.space_saved());
    }

    pub fn record_failure(&mut self) {
        self.files_seen += 1;
        self.failed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_conversions_add_to_total() {
        let mut stats = RunStatistics::new();
        stats.record(&ConversionOutcome::Converted { space_saved: 100 });
        stats.record(&ConversionOutcome::Discarded);
        stats.record(&ConversionOutcome::DryRunSimulated);
        stats.record(&ConversionOutcome::Skipped(SkipReason::AlreadyTargetCodec(Codec::HEVC)));
        stats.record(&ConversionOutcome::Converted { space_saved: 0 });
        stats.record_failure();

        assert_eq!(stats.total_space_saved, 100);
        assert_eq!(stats.files_seen, 6);
        assert_eq!(stats.converted, 2);
        assert_eq!(stats.discarded, 1);
        assert_eq!(stats.simulated, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.failed, 1);
    }
}
