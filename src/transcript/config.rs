//! Configuration for the transcript pipeline.

use serde::{Deserialize, Serialize};

use super::SamplingMode;

/// Configuration for the transcript pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Sampling strategy used when a transcript exceeds `max_segments`
    pub mode: SamplingMode,
    /// Maximum number of segments returned
    pub max_segments: usize,
    /// Cap on the characters of the joined full text
    pub max_full_text_chars: usize,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            mode: SamplingMode::Smart,
            max_segments: 100,
            max_full_text_chars: 50_000,
        }
    }
}
