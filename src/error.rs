//! Error types for tubesift.
//!
//! Data-quality problems in captions and comments are never errors: bad cues
//! are skipped and noisy comments are filtered. Errors only come from the
//! edges that touch the filesystem or decode structured input.

use std::path::PathBuf;

/// Errors raised by configuration handling and input decoding.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine the user config directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a cue cannot become a [`crate::transcript::Segment`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SegmentError {
    #[error("segment text is empty")]
    EmptyText,

    #[error("segment duration {duration:.3}s is not above the {min:.1}s minimum")]
    TooShort { duration: f64, min: f64 },

    #[error("segment start {0} is not a valid time")]
    InvalidStart(f64),
}
