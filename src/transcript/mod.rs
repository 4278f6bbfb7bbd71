//! Transcript pipeline: caption cues in, bounded list of clean segments out.
//!
//! # Module Structure
//!
//! - [`config`] - Transcript budget and sampling configuration
//! - [`transforms`] - Cue cleaning transforms (normalization, duplicates)
//! - [`sampler`] - Budgeted sampling of long segment lists
//! - [`extractor`] - Pipeline orchestration

pub mod config;
pub mod extractor;
pub mod sampler;
pub mod transforms;

use serde::{Deserialize, Serialize};

use crate::error::SegmentError;
use crate::text::Language;
use transforms::MIN_CUE_DURATION;

pub use config::TranscriptConfig;
pub use extractor::{ExtractionStats, TranscriptExtractor};
pub use sampler::{sample, Sample};

/// A cleaned, deduplicated, timed piece of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    text: String,
    start: f64,
    duration: f64,
    timestamp: String,
}

impl Segment {
    /// Build a segment from cleaned text and cue timings.
    ///
    /// Fails when the text is blank, the start is negative or not finite, or
    /// the segment does not last longer than the minimum cue duration.
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Result<Self, SegmentError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SegmentError::EmptyText);
        }
        if !start.is_finite() || start < 0.0 {
            return Err(SegmentError::InvalidStart(start));
        }
        let duration = end - start;
        if duration.is_nan() || duration <= MIN_CUE_DURATION {
            return Err(SegmentError::TooShort {
                duration,
                min: MIN_CUE_DURATION,
            });
        }

        Ok(Self {
            text,
            start,
            duration,
            timestamp: format_timestamp(start),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Start time in seconds.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Duration in seconds, always above [`MIN_CUE_DURATION`].
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// Start time formatted as `H:MM:SS` or `M:SS`.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

/// Format seconds as `H:MM:SS`, or `M:SS` under an hour.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// How a transcript longer than its budget is cut down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum SamplingMode {
    /// Keep the first segments that fit
    Full,
    /// 20% intro, 30% evenly spread middle, 50% conclusion
    #[default]
    Smart,
    /// 10% intro, 20% middle, 70% conclusion
    Summary,
}

impl SamplingMode {
    /// Parse a mode name. Unknown names fall back to [`SamplingMode::Smart`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "full" => SamplingMode::Full,
            "summary" => SamplingMode::Summary,
            _ => SamplingMode::Smart,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SamplingMode::Full => "full",
            SamplingMode::Smart => "smart",
            SamplingMode::Summary => "summary",
        }
    }
}

impl From<String> for SamplingMode {
    fn from(name: String) -> Self {
        SamplingMode::from_name(&name)
    }
}

impl std::fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of running a caption track through the pipeline.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResult {
    /// Sampled segments, at most the configured budget
    pub segments: Vec<Segment>,
    /// True when segments were dropped to fit the budget
    pub is_truncated: bool,
    /// Human-readable description of the sampling, when truncated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Number of segments before sampling
    pub total_segments: usize,
    /// Text of every segment before sampling, possibly capped
    pub full_text: String,
    /// True when `full_text` was capped
    pub full_text_truncated: bool,
    /// Words in the uncapped full text
    pub word_count: usize,
    /// Script-based language guess
    pub language: Language,
}
