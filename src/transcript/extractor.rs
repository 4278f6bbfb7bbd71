//! Transcript extraction pipeline orchestration.

use super::config::TranscriptConfig;
use super::sampler::sample;
use super::transforms::{CollapseDuplicates, NormalizeText, TextNormalizer, Transform};
use super::{Segment, TranscriptResult};
use crate::caption::{parse_with_format, CaptionFormat, Cue};
use crate::text::{detect_language, truncate_chars, word_count};

/// Counters collected while turning cues into segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Cues read from the caption track
    pub cues_parsed: usize,
    /// Cues with nothing left after normalization
    pub empty_dropped: usize,
    /// Cues at or below the minimum duration
    pub short_dropped: usize,
    /// Repeats and superseded progressive cues
    pub duplicates_collapsed: usize,
    /// Segments produced
    pub segments: usize,
}

/// Turns a raw caption track into a bounded [`TranscriptResult`].
///
/// Pipeline: parse → normalize → collapse duplicates → segments → sample.
pub struct TranscriptExtractor {
    config: TranscriptConfig,
    normalizer: TextNormalizer,
}

impl TranscriptExtractor {
    /// Create an extractor with the default text normalizer.
    pub fn new(config: TranscriptConfig) -> Self {
        Self::with_normalizer(config, TextNormalizer::default())
    }

    /// Create an extractor with custom normalization rules.
    pub fn with_normalizer(config: TranscriptConfig, normalizer: TextNormalizer) -> Self {
        Self { config, normalizer }
    }

    pub fn config(&self) -> &TranscriptConfig {
        &self.config
    }

    /// Parse, clean and sample a caption track, detecting its dialect.
    pub fn extract(&self, content: &str) -> TranscriptResult {
        self.extract_with_format(content, CaptionFormat::detect(content))
    }

    /// Parse, clean and sample a caption track of a known dialect.
    pub fn extract_with_format(&self, content: &str, format: CaptionFormat) -> TranscriptResult {
        let (segments, _) = self.segments_with_format(content, format);
        self.build_result(segments)
    }

    /// Clean segments of a caption track, without sampling.
    pub fn segments(&self, content: &str) -> (Vec<Segment>, ExtractionStats) {
        self.segments_with_format(content, CaptionFormat::detect(content))
    }

    fn segments_with_format(
        &self,
        content: &str,
        format: CaptionFormat,
    ) -> (Vec<Segment>, ExtractionStats) {
        let cues = parse_with_format(content, format);
        self.segments_from_cues(cues)
    }

    /// Clean already-parsed cues into segments.
    pub fn segments_from_cues(&self, mut cues: Vec<Cue>) -> (Vec<Segment>, ExtractionStats) {
        let mut stats = ExtractionStats {
            cues_parsed: cues.len(),
            ..Default::default()
        };

        let mut normalize = NormalizeText::new(&self.normalizer);
        normalize.transform(&mut cues);
        stats.empty_dropped = normalize.dropped_count();

        let mut dedupe = CollapseDuplicates::new();
        dedupe.transform(&mut cues);
        stats.short_dropped = dedupe.short_count();
        stats.duplicates_collapsed = dedupe.collapsed_count();

        let segments: Vec<Segment> = cues
            .into_iter()
            .filter_map(|cue| match Segment::new(cue.text, cue.start, cue.end) {
                Ok(segment) => Some(segment),
                Err(err) => {
                    tracing::trace!(%err, start = cue.start, "dropping cue");
                    None
                }
            })
            .collect();
        stats.segments = segments.len();

        tracing::debug!(
            cues = stats.cues_parsed,
            empty = stats.empty_dropped,
            short = stats.short_dropped,
            duplicates = stats.duplicates_collapsed,
            segments = stats.segments,
            "extracted transcript segments"
        );

        (segments, stats)
    }

    /// Assemble the full text and sample segments down to the budget.
    pub fn build_result(&self, segments: Vec<Segment>) -> TranscriptResult {
        let total_segments = segments.len();
        let full_text = segments
            .iter()
            .map(Segment::text)
            .collect::<Vec<_>>()
            .join(" ");
        let word_count = word_count(&full_text);
        let language = detect_language(&full_text);
        let (capped, full_text_truncated) =
            truncate_chars(&full_text, self.config.max_full_text_chars);
        let full_text = capped.to_string();

        let sampled = sample(segments, self.config.mode, self.config.max_segments);

        TranscriptResult {
            segments: sampled.items,
            is_truncated: sampled.is_truncated,
            message: sampled.message,
            total_segments,
            full_text,
            full_text_truncated,
            word_count,
            language,
        }
    }
}

impl Default for TranscriptExtractor {
    fn default() -> Self {
        Self::new(TranscriptConfig::default())
    }
}
